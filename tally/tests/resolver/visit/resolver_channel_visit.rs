use tally::{AttributionOutcome, PublisherStatus};
use tally_mock::{Report, fixtures};

use crate::helpers::{CHANNEL_URL, W1, W2, channel, harness, key};

#[tokio::test]
async fn channel_visit_creates_record_and_reports() {
    let h = harness();

    let outcome = h
        .tally
        .visit_channel(W1, CHANNEL_URL, channel("UC123", "Acme"))
        .join()
        .await;

    let AttributionOutcome::Resolved { window_id, url, record } = outcome else {
        panic!("expected resolved outcome");
    };
    assert_eq!(window_id, W1);
    assert_eq!(url, CHANNEL_URL);
    assert_eq!(record.key, key("UC123"));
    assert_eq!(record.name, "Acme");
    assert_eq!(record.channel_id, "UC123");
    assert_eq!(record.url, CHANNEL_URL);
    assert_eq!(record.favicon_url, "https://yt3.ggpht.com/UC123.jpg");
    assert!(record.media.is_empty());
    assert!(record.last_visited.is_some());

    assert_eq!(h.controller.record(&key("UC123")).await, Some(record.clone()));
    assert_eq!(
        h.reporter.reports(),
        vec![Report::Resolved {
            window_id: W1,
            url: CHANNEL_URL.to_string(),
            record,
        }]
    );
}

#[tokio::test]
async fn hint_and_channel_id_land_on_same_record() {
    let h = harness();
    let mut by_hint = channel("", "Acme");
    by_hint.publisher_key_hint = "youtube#channel:UC123".to_string();

    h.tally
        .visit_channel(W1, CHANNEL_URL, channel("UC123", "Acme"))
        .join()
        .await;
    h.tally.visit_channel(W2, CHANNEL_URL, by_hint).join().await;

    assert_eq!(h.controller.len().await, 1);
    assert_eq!(h.reporter.resolved_count(), 2);
}

#[tokio::test]
async fn revisit_refreshes_display_fields_and_keeps_status() {
    let h = harness();
    let mut seeded = fixtures::verified_news();
    seeded.name = "Old name".to_string();
    h.controller.seed(seeded.clone()).await;

    let record = h
        .tally
        .visit_channel(
            W1,
            "https://www.youtube.com/@dailynews",
            channel(fixtures::NEWS_CHANNEL, "Daily News"),
        )
        .join()
        .await
        .into_result()
        .unwrap();

    assert_eq!(record.name, "Daily News");
    assert_eq!(record.url, "https://www.youtube.com/@dailynews");
    assert_eq!(record.status, PublisherStatus::Verified);
    // Media entries owned by the record survive a channel-level visit
    assert_eq!(record.media, seeded.media);
}

#[tokio::test]
async fn custom_visit_with_channel_id_resolves() {
    let h = harness();
    let visit = tally::CustomVisit {
        channel_id: "UC123".to_string(),
        title: "Acme".to_string(),
        ..tally::CustomVisit::default()
    };

    let outcome = h.tally.visit_custom(W1, "", visit).join().await;

    let record = outcome.into_result().unwrap();
    assert_eq!(record.key, key("UC123"));
    // No page url supplied: falls back to the channel page
    assert_eq!(record.url, CHANNEL_URL);
}

#[tokio::test]
async fn dropped_handle_still_persists() {
    let h = harness();
    drop(h.tally.visit_channel(W1, CHANNEL_URL, channel("UC123", "Acme")));

    h.reporter.wait_for(1).await;
    assert!(h.controller.record(&key("UC123")).await.is_some());
}
