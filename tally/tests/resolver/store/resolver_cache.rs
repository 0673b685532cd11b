use tally::CacheConfig;

use crate::helpers::{CHANNEL_URL, W1, W2, channel, harness_with, key};

#[tokio::test]
async fn cached_store_serves_repeat_visits() {
    let h = harness_with(|b| b.with_cache(CacheConfig::default()));

    h.tally
        .visit_channel(W1, CHANNEL_URL, channel("UC123", "Acme"))
        .join()
        .await;
    let record = h
        .tally
        .visit_channel(W2, CHANNEL_URL, channel("UC123", "Acme Renamed"))
        .join()
        .await
        .into_result()
        .unwrap();

    // First visit misses (not cached), then its save writes through
    assert_eq!(h.controller.lookup_count(), 1);
    assert_eq!(h.controller.save_count(), 2);
    assert_eq!(record.name, "Acme Renamed");
    assert_eq!(
        h.controller.record(&key("UC123")).await.map(|r| r.name),
        Some("Acme Renamed".to_string())
    );
}
