use crate::{AttributionOutcome, PublisherRecord, WindowId};

/// Receiver of attribution results, owned by the UI layer.
///
/// Both calls are fire-and-forget. Reports addressed to a window that no longer
/// exists must be ignored by the implementation.
pub trait WindowReporter: Send + Sync {
    /// A publisher was resolved for the visit made from `window_id` at `url`.
    fn report_publisher_resolved(&self, window_id: WindowId, url: &str, record: &PublisherRecord);

    /// No publisher could be attributed for the visit made from `window_id` at `url`.
    fn report_attribution_failed(&self, window_id: WindowId, url: &str);

    /// Deliver a terminal outcome through the matching call above.
    fn report(&self, outcome: &AttributionOutcome) {
        match outcome {
            AttributionOutcome::Resolved {
                window_id,
                url,
                record,
            } => self.report_publisher_resolved(*window_id, url, record),
            AttributionOutcome::Failed { window_id, url, .. } => {
                self.report_attribution_failed(*window_id, url);
            }
        }
    }
}
