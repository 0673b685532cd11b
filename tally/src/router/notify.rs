use tally_core::{AttributionOutcome, TallyError, WindowId};

use crate::Tally;

impl Tally {
    /// Tell `window_id` that no publisher could be attributed for the visit at `url`.
    ///
    /// Always succeeds and never retries; retrying is the window's business (for
    /// example on its next navigation).
    pub fn notify_media_activity_error(&self, window_id: WindowId, url: &str) {
        self.inner.reporter.report_attribution_failed(window_id, url);
    }

    /// Notify the window and produce the terminal `Failed` outcome.
    pub(crate) fn fail(
        &self,
        window_id: WindowId,
        url: String,
        reason: TallyError,
    ) -> AttributionOutcome {
        #[cfg(feature = "tracing")]
        tracing::warn!(window = %window_id, url = %url, error = %reason, "attribution failed");
        let outcome = AttributionOutcome::Failed {
            window_id,
            url,
            reason,
        };
        self.inner.reporter.report(&outcome);
        outcome
    }
}
