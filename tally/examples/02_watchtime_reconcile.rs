mod common;
use tally::{CacheConfig, DurationOutcome, Tally, VideoVisit, WatchtimeBeacon, WindowId};
use tally_mock::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_logging();

    let tally = Tally::builder()
        .with_store(MemoryStore::new("demo"))
        .with_reporter(common::windows())
        .with_cache(CacheConfig::default())
        .build()?;
    let window = WindowId(7);
    let page = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    // 1. A watch-time beacon arrives before any visit names the video's channel.
    let beacon = "https://www.youtube.com/api/stats/watchtime?docid=dQw4w9WgXcQ&st=0,61.2&et=42.7,90";
    let Some(update) = WatchtimeBeacon::parse(beacon).and_then(|b| b.into_update(tally.platform()))
    else {
        return Err("beacon without media id".into());
    };
    match tally.update_media_duration(window, page, update).await {
        DurationOutcome::Buffered { pending_secs } => println!("buffered {pending_secs}s"),
        other => println!("{other:?}"),
    }

    // 2. The video visit resolves the channel and folds the buffered seconds in.
    let visit = VideoVisit {
        channel_id: "UCuAXFkgsw1L7xaCfnd5JJOw".into(),
        media_key: "dQw4w9WgXcQ".into(),
        title: "Rick Astley".into(),
        ..VideoVisit::default()
    };
    let record = tally
        .visit_video(window, page, visit)
        .join()
        .await
        .into_result()?;
    println!("{record:#?}");

    // 3. Later beacons find the publisher directly.
    let beacon = "https://www.youtube.com/api/stats/watchtime?docid=dQw4w9WgXcQ&st=90&et=120";
    if let Some(update) = WatchtimeBeacon::parse(beacon).and_then(|b| b.into_update(tally.platform())) {
        let outcome = tally.update_media_duration(window, page, update).await;
        println!("{outcome:#?}");
    }

    Ok(())
}
