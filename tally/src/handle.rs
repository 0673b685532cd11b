use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use tally_core::{AttributionOutcome, TallyError, WindowId, WindowReporter};

/// Handle to an attribution running on its own Tokio task.
///
/// Dropping the handle detaches: the task still completes, persists and reports.
/// A task that panics is reported to its window as a failure by a watcher task, so
/// every dispatch ends in exactly one report unless the reporter itself panics.
pub struct AttributionHandle {
    window_id: WindowId,
    url: String,
    join: JoinHandle<AttributionOutcome>,
}

impl AttributionHandle {
    /// Spawn `work` and a watcher that turns a panic into a reported failure.
    pub(crate) fn spawn<F>(
        reporter: Arc<dyn WindowReporter>,
        window_id: WindowId,
        url: String,
        work: F,
    ) -> Self
    where
        F: Future<Output = AttributionOutcome> + Send + 'static,
    {
        let work = tokio::spawn(work);
        let task_url = url.clone();
        let join = tokio::spawn(async move {
            match work.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let outcome = abnormal(window_id, task_url, &e);
                    #[cfg(feature = "tracing")]
                    tracing::warn!(window = %window_id, error = %e, "attribution task ended abnormally");
                    reporter.report(&outcome);
                    outcome
                }
            }
        });
        Self {
            window_id,
            url,
            join,
        }
    }

    /// Window the attribution reports to.
    #[must_use]
    pub const fn window_id(&self) -> WindowId {
        self.window_id
    }

    /// Url the attribution reports to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Return `true` once the task has delivered its report.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the terminal outcome.
    ///
    /// A task that died without producing an outcome yields `Failed` with
    /// `TallyError::Other`; the window has already been told by then.
    pub async fn join(self) -> AttributionOutcome {
        match self.join.await {
            Ok(outcome) => outcome,
            Err(e) => abnormal(self.window_id, self.url, &e),
        }
    }
}

fn abnormal(window_id: WindowId, url: String, e: &tokio::task::JoinError) -> AttributionOutcome {
    AttributionOutcome::Failed {
        window_id,
        url,
        reason: TallyError::Other(format!("attribution task ended abnormally: {e}")),
    }
}
