use crate::helpers::{VIDEO_URL, W1, W2, harness, key, media, video};

#[tokio::test]
async fn two_video_visits_accumulate() {
    let h = harness();

    h.tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 30))
        .join()
        .await;
    let record = h
        .tally
        .visit_video(W2, VIDEO_URL, video("UC123", "v1", 45))
        .join()
        .await
        .into_result()
        .unwrap();

    assert_eq!(record.media_duration(&media("v1")), Some(75));
    let entry = &record.media[&media("v1")];
    assert_eq!(entry.publisher_key, key("UC123"));
    assert_eq!(
        h.controller
            .record(&key("UC123"))
            .await
            .and_then(|r| r.media_duration(&media("v1"))),
        Some(75)
    );
}

#[tokio::test]
async fn zero_duration_resave_is_idempotent() {
    let h = harness();
    h.tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 30))
        .join()
        .await;
    let saves_before = h.controller.save_count();

    let record = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 0))
        .join()
        .await
        .into_result()
        .unwrap();

    assert_eq!(record.media_duration(&media("v1")), Some(30));
    assert_eq!(h.controller.save_count(), saves_before + 1);
}

#[tokio::test]
async fn first_visit_creates_entry_even_without_duration() {
    let h = harness();
    let record = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 0))
        .join()
        .await
        .into_result()
        .unwrap();
    assert_eq!(record.media_duration(&media("v1")), Some(0));
}

#[tokio::test]
async fn media_keys_accumulate_independently() {
    let h = harness();
    for (m, d) in [("v1", 10), ("v2", 5), ("v1", 7), ("v2", 1)] {
        h.tally
            .visit_video(W1, VIDEO_URL, video("UC123", m, d))
            .join()
            .await;
    }
    let stored = h.controller.record(&key("UC123")).await.unwrap();
    assert_eq!(stored.media_duration(&media("v1")), Some(17));
    assert_eq!(stored.media_duration(&media("v2")), Some(6));
    assert_eq!(stored.total_duration(), 23);
}

#[tokio::test]
async fn video_visit_records_channel_page_as_url() {
    let h = harness();
    let record = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "v1", 3))
        .join()
        .await
        .into_result()
        .unwrap();
    assert_eq!(record.url, "https://www.youtube.com/channel/UC123");
}

#[tokio::test]
async fn prefixed_media_key_is_not_double_prefixed() {
    let h = harness();
    let record = h
        .tally
        .visit_video(W1, VIDEO_URL, video("UC123", "youtube_v1", 4))
        .join()
        .await
        .into_result()
        .unwrap();
    assert_eq!(record.media_duration(&media("v1")), Some(4));
}
