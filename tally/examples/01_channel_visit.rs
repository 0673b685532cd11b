mod common;
use tally::{ChannelVisit, Tally, VideoVisit, WindowId};
use tally_mock::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_logging();

    // 1. Wire an in-memory store and a reporter that prints to stdout.
    let tally = Tally::builder()
        .with_store(MemoryStore::new("demo"))
        .with_reporter(common::windows())
        .build()?;

    // 2. A channel page visit creates the publisher.
    let channel = tally.visit_channel(
        WindowId(1),
        "https://www.youtube.com/channel/UC123",
        ChannelVisit {
            channel_id: "UC123".into(),
            title: "Acme".into(),
            favicon_url: "https://yt3.ggpht.com/acme.jpg".into(),
            ..ChannelVisit::default()
        },
    );
    channel.join().await.into_result()?;

    // 3. Two video visits on the same media accumulate watch time.
    for seconds in [30, 45] {
        let visit = VideoVisit {
            channel_id: "UC123".into(),
            media_key: "v1".into(),
            title: "Acme".into(),
            duration: seconds,
            ..VideoVisit::default()
        };
        let record = tally
            .visit_video(WindowId(1), "https://www.youtube.com/watch?v=v1", visit)
            .join()
            .await
            .into_result()?;
        println!("{record:#?}");
    }

    Ok(())
}
