use std::sync::Arc;
use std::time::Duration;

use tally::{Platform, Tally, TallyConfig, TallyError};
use tally_mock::{MemoryStore, RecordingReporter};

#[test]
fn build_requires_store() {
    let err = Tally::builder()
        .with_reporter(Arc::new(RecordingReporter::new()))
        .build()
        .err()
        .expect("missing store");
    assert!(matches!(err, TallyError::InvalidArg(msg) if msg.contains("store")));
}

#[test]
fn build_requires_reporter() {
    let err = Tally::builder()
        .with_store(MemoryStore::new("mem"))
        .build()
        .err()
        .expect("missing reporter");
    assert!(matches!(err, TallyError::InvalidArg(msg) if msg.contains("reporter")));
}

#[test]
fn builder_defaults_and_overrides() {
    let tally = Tally::builder()
        .with_store(MemoryStore::new("mem"))
        .with_reporter(Arc::new(RecordingReporter::new()))
        .build()
        .unwrap();
    assert_eq!(tally.config(), &TallyConfig::default());
    assert_eq!(tally.platform(), Platform::YOUTUBE);

    let tuned = Tally::builder()
        .with_store(MemoryStore::new("mem"))
        .with_reporter(Arc::new(RecordingReporter::new()))
        .store_timeout(Duration::from_millis(250))
        .max_pending_media(8)
        .serialize_per_key(false)
        .build()
        .unwrap();
    assert_eq!(
        tuned.config(),
        &TallyConfig {
            store_timeout: Some(Duration::from_millis(250)),
            max_pending_media: 8,
            serialize_per_key: false,
        }
    );
}

#[tokio::test]
async fn custom_platform_prefixes_keys() {
    let (store, controller) = MemoryStore::new_with_controller("mem");
    let tally = Tally::builder()
        .with_store(store)
        .with_reporter(Arc::new(RecordingReporter::new()))
        .platform(Platform::new("twitch"))
        .build()
        .unwrap();

    let record = tally
        .visit_channel(
            crate::helpers::W1,
            "https://twitch.tv/acme",
            crate::helpers::channel("acme", "Acme"),
        )
        .join()
        .await
        .into_result()
        .unwrap();

    assert_eq!(record.key.as_str(), "twitch#channel:acme");
    assert!(controller.record(&record.key).await.is_some());
}
