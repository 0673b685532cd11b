use std::time::Duration;

use tally::{DurationOutcome, DurationUpdate, TallyError, WatchtimeBeacon};
use tally_mock::{StoreBehavior, fixtures};

use crate::helpers::{VIDEO_URL, W1, harness, key, media, video};

#[tokio::test]
async fn hint_applies_directly() {
    let h = harness();

    let outcome = h
        .tally
        .update_media_duration(
            W1,
            VIDEO_URL,
            DurationUpdate::new("v1", 40).with_publisher("youtube#channel:UC123"),
        )
        .await;

    let DurationOutcome::Applied { record } = outcome else {
        panic!("expected applied");
    };
    assert_eq!(record.key, key("UC123"));
    assert_eq!(record.channel_id, "UC123");
    assert_eq!(record.media_duration(&media("v1")), Some(40));
    assert_eq!(h.controller.record(&key("UC123")).await, Some(record));
    assert!(h.reporter.is_empty());
}

#[tokio::test]
async fn store_media_index_routes_known_media() {
    let h = harness();
    h.controller.seed(fixtures::verified_news()).await;

    let outcome = h
        .tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("news0001", 30))
        .await;

    assert_eq!(
        outcome.publisher_key(),
        Some(&key(fixtures::NEWS_CHANNEL))
    );
    let stored = h
        .controller
        .record(&key(fixtures::NEWS_CHANNEL))
        .await
        .unwrap();
    assert_eq!(stored.media_duration(&media("news0001")), Some(150));
    assert!(stored.is_verified());
}

#[tokio::test(start_paused = true)]
async fn update_reconciles_with_in_flight_visit() {
    let h = harness();
    h.controller
        .set_default_lookup_behavior(StoreBehavior::Delay(Duration::from_millis(50)))
        .await;

    let handle = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 30));
    let update = h
        .tally
        .update_media_duration(W1, VIDEO_URL, DurationUpdate::new("v1", 20))
        .await;

    assert!(matches!(update, DurationOutcome::Applied { .. }));
    assert!(handle.join().await.is_resolved());
    assert_eq!(h.tally.pending_duration("v1"), None);
    let stored = h.controller.record(&key("UC123")).await.unwrap();
    assert_eq!(stored.media_duration(&media("v1")), Some(50));
}

#[tokio::test]
async fn lookup_failure_rejects_update() {
    let h = harness();
    h.controller
        .set_lookup_behavior(
            key("UC123"),
            StoreBehavior::Fail(TallyError::store("tally-mock", "offline")),
        )
        .await;

    let outcome = h
        .tally
        .update_media_duration(
            W1,
            VIDEO_URL,
            DurationUpdate::new("v1", 5).with_publisher("UC123"),
        )
        .await;

    assert!(matches!(
        outcome,
        DurationOutcome::Rejected {
            reason: TallyError::LookupFailure { .. }
        }
    ));
    assert_eq!(h.controller.save_count(), 0);
    assert_eq!(h.reporter.failed_count(), 1);
}

#[tokio::test]
async fn beacon_feeds_duration_update() {
    let h = harness();
    let beacon = "https://www.youtube.com/api/stats/watchtime?docid=v9&st=0,100&et=30,110";
    let update = WatchtimeBeacon::parse(beacon)
        .and_then(|b| b.into_update(h.tally.platform()))
        .unwrap()
        .with_publisher("UC123");

    let outcome = h.tally.update_media_duration(W1, VIDEO_URL, update).await;

    let record = match outcome {
        DurationOutcome::Applied { record } => record,
        other => panic!("unexpected: {other:?}"),
    };
    assert_eq!(record.media_duration(&media("v9")), Some(40));
}
