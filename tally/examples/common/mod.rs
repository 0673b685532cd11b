use std::sync::Arc;

use tally::{PublisherRecord, WindowId, WindowReporter};
use tracing_subscriber::EnvFilter;

/// Window reporter that prints every report to stdout.
pub struct PrintingWindows;

impl WindowReporter for PrintingWindows {
    fn report_publisher_resolved(&self, window_id: WindowId, url: &str, record: &PublisherRecord) {
        println!(
            "[window {window_id}] {url} -> {} ({}), {}s watched",
            record.name,
            record.key,
            record.total_duration()
        );
    }

    fn report_attribution_failed(&self, window_id: WindowId, url: &str) {
        println!("[window {window_id}] {url} -> no publisher");
    }
}

#[must_use]
pub fn windows() -> Arc<PrintingWindows> {
    Arc::new(PrintingWindows)
}

/// Log to stderr; override the level with `RUST_LOG`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tally=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
