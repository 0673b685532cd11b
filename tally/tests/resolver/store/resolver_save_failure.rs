use tally::{AttributionOutcome, TallyError};
use tally_mock::{Report, StoreBehavior};

use crate::helpers::{CHANNEL_URL, W1, channel, harness, key};

#[tokio::test]
async fn save_failure_reports_attribution_failure() {
    let h = harness();
    h.controller
        .set_save_behavior(
            key("UC123"),
            StoreBehavior::Fail(TallyError::store("tally-mock", "disk full")),
        )
        .await;

    let outcome = h
        .tally
        .visit_channel(W1, CHANNEL_URL, channel("UC123", "Acme"))
        .join()
        .await;

    let AttributionOutcome::Failed { reason, .. } = outcome else {
        panic!("expected failure");
    };
    match reason {
        TallyError::SaveFailure { key: k, msg } => {
            assert_eq!(k, "youtube#channel:UC123");
            assert!(msg.contains("disk full"), "{msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(h.controller.is_empty().await);
    assert_eq!(
        h.reporter.reports(),
        vec![Report::Failed {
            window_id: W1,
            url: CHANNEL_URL.to_string(),
        }]
    );
}

#[tokio::test]
async fn no_internal_retry_after_save_failure() {
    let h = harness();
    h.controller
        .set_default_save_behavior(StoreBehavior::Fail(TallyError::store("tally-mock", "nope")))
        .await;

    h.tally
        .visit_channel(W1, CHANNEL_URL, channel("UC123", "Acme"))
        .join()
        .await;

    assert_eq!(h.controller.save_count(), 1);
    assert_eq!(h.controller.lookup_count(), 1);
}
