use tally::TallyError;
use tally_mock::{StoreBehavior, fixtures};

use crate::helpers::{W1, harness, media, user_by_media};

#[tokio::test]
async fn user_visit_resolves_through_media_owner() {
    let h = harness();
    let news = fixtures::verified_news();
    h.controller.seed(news.clone()).await;

    let record = h
        .tally
        .visit_user(W1, "https://www.youtube.com/@dailynews", user_by_media("news0001"))
        .join()
        .await
        .into_result()
        .unwrap();

    assert_eq!(record.key, news.key);
    assert_eq!(record.media_duration(&media("news0001")), Some(120));
    assert_eq!(record.url, "https://www.youtube.com/@dailynews");
    assert_eq!(h.controller.media_lookup_count(), 1);
    assert_eq!(h.reporter.resolved_count(), 1);
}

#[tokio::test]
async fn user_visit_with_unknown_media_is_insufficient() {
    let h = harness();

    let reason = h
        .tally
        .visit_user(W1, "u", user_by_media("nobody"))
        .join()
        .await
        .into_result()
        .unwrap_err();

    assert!(matches!(reason, TallyError::InsufficientSignal { .. }));
    assert_eq!(h.controller.media_lookup_count(), 1);
    assert_eq!(h.controller.save_count(), 0);
    assert_eq!(h.reporter.failed_count(), 1);
}

#[tokio::test]
async fn media_index_failure_counts_as_unknown() {
    let h = harness();
    h.controller.seed(fixtures::verified_news()).await;
    h.controller
        .set_media_behavior(
            media("news0001"),
            StoreBehavior::Fail(TallyError::store("tally-mock", "index offline")),
        )
        .await;

    let outcome = h
        .tally
        .visit_user(W1, "u", user_by_media("news0001"))
        .join()
        .await;

    assert!(!outcome.is_resolved());
    assert_eq!(h.controller.save_count(), 0);
    assert_eq!(h.reporter.failed_count(), 1);
}
