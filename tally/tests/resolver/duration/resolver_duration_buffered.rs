use tally::{DurationOutcome, DurationUpdate, TallyError};
use tally_mock::StoreBehavior;

use crate::helpers::{VIDEO_URL, W1, W2, harness, harness_with, key, media, video};

#[tokio::test]
async fn unknown_media_is_buffered_then_folded_in_by_visit() {
    let h = harness();

    let first = h
        .tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("v1", 20))
        .await;
    let second = h
        .tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("youtube_v1", 5))
        .await;
    assert_eq!(first, DurationOutcome::Buffered { pending_secs: 20 });
    assert_eq!(second, DurationOutcome::Buffered { pending_secs: 25 });
    assert_eq!(h.tally.pending_duration("v1"), Some(25));
    assert!(h.reporter.is_empty());

    let record = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 0))
        .join()
        .await
        .into_result()
        .unwrap();

    assert_eq!(record.media_duration(&media("v1")), Some(25));
    assert_eq!(h.tally.pending_duration("v1"), None);
}

#[tokio::test]
async fn full_buffer_rejects_and_notifies() {
    let h = harness_with(|b| b.max_pending_media(1));

    let kept = h
        .tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("a", 3))
        .await;
    let rejected = h
        .tally
        .update_media_duration(W2, "https://www.youtube.com/watch?v=b", DurationUpdate::new("b", 4))
        .await;

    assert_eq!(kept, DurationOutcome::Buffered { pending_secs: 3 });
    assert_eq!(
        rejected,
        DurationOutcome::Rejected {
            reason: TallyError::PendingBufferFull { capacity: 1 }
        }
    );
    assert_eq!(h.reporter.for_window(W2).len(), 1);
    assert_eq!(h.reporter.failed_count(), 1);
    assert_eq!(h.tally.pending_duration("b"), None);
}

#[tokio::test]
async fn buffered_seconds_survive_failed_save() {
    let h = harness();
    h.tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("v1", 9))
        .await;
    h.controller
        .set_save_behavior(key("UC123"), StoreBehavior::Fail(TallyError::store("tally-mock", "x")))
        .await;

    let failed = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 1))
        .join()
        .await;
    assert!(!failed.is_resolved());
    assert_eq!(h.tally.pending_duration("v1"), Some(9));

    h.controller.clear_behaviors().await;
    let record = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 1))
        .join()
        .await
        .into_result()
        .unwrap();
    assert_eq!(record.media_duration(&media("v1")), Some(10));
}

#[tokio::test]
async fn empty_media_key_is_rejected() {
    let h = harness();
    let outcome = h
        .tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("  ", 9))
        .await;
    assert!(matches!(
        outcome,
        DurationOutcome::Rejected {
            reason: TallyError::InsufficientSignal { .. }
        }
    ));
    assert_eq!(h.controller.io_count(), 0);
    assert_eq!(h.reporter.failed_count(), 1);
}
