use std::sync::Mutex;

use tokio::sync::Notify;

use tally_core::{PublisherRecord, WindowId, WindowReporter};

/// One call observed by a [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// `report_publisher_resolved` was called.
    Resolved {
        /// Window the report was addressed to.
        window_id: WindowId,
        /// Url of the visit.
        url: String,
        /// Record delivered with the report.
        record: PublisherRecord,
    },
    /// `report_attribution_failed` was called.
    Failed {
        /// Window the report was addressed to.
        window_id: WindowId,
        /// Url of the visit.
        url: String,
    },
}

impl Report {
    /// Window the report was addressed to.
    #[must_use]
    pub const fn window_id(&self) -> WindowId {
        match self {
            Self::Resolved { window_id, .. } | Self::Failed { window_id, .. } => *window_id,
        }
    }

    /// The delivered record for a resolved report.
    #[must_use]
    pub const fn record(&self) -> Option<&PublisherRecord> {
        match self {
            Self::Resolved { record, .. } => Some(record),
            Self::Failed { .. } => None,
        }
    }
}

/// Window reporter that remembers every call in order.
#[derive(Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
    notify: Notify,
}

impl RecordingReporter {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, report: Report) {
        if let Ok(mut guard) = self.reports.lock() {
            guard.push(report);
        }
        self.notify.notify_waiters();
    }

    /// Every report received so far.
    #[must_use]
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Reports addressed to one window.
    #[must_use]
    pub fn for_window(&self, window_id: WindowId) -> Vec<Report> {
        self.reports()
            .into_iter()
            .filter(|r| r.window_id() == window_id)
            .collect()
    }

    /// Number of reports received.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reports.lock().map(|g| g.len()).unwrap_or_default()
    }

    /// True when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `Resolved` reports.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.reports()
            .iter()
            .filter(|r| matches!(r, Report::Resolved { .. }))
            .count()
    }

    /// Number of `Failed` reports.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.reports()
            .iter()
            .filter(|r| matches!(r, Report::Failed { .. }))
            .count()
    }

    /// Wait until at least `n` reports were received.
    pub async fn wait_for(&self, n: usize) {
        loop {
            let notified = self.notify.notified();
            if self.len() >= n {
                return;
            }
            notified.await;
        }
    }
}

impl WindowReporter for RecordingReporter {
    fn report_publisher_resolved(&self, window_id: WindowId, url: &str, record: &PublisherRecord) {
        self.push(Report::Resolved {
            window_id,
            url: url.to_string(),
            record: record.clone(),
        });
    }

    fn report_attribution_failed(&self, window_id: WindowId, url: &str) {
        self.push(Report::Failed {
            window_id,
            url: url.to_string(),
        });
    }
}
