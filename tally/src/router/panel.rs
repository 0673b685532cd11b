use std::sync::Arc;

use tally_core::{
    AttributionOutcome, PanelInfoRequest, PublisherRecord, WindowId, derive_publisher_key,
};

use crate::router::resolve::{fresh_record, non_empty};
use crate::{AttributionHandle, Tally};

impl Tally {
    /// Resolve publisher info for a panel on a spawned task and return immediately.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn request_panel_info(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        request: PanelInfoRequest,
    ) -> AttributionHandle {
        let url = url.into();
        let this = self.clone();
        let task_url = url.clone();
        AttributionHandle::spawn(
            Arc::clone(&self.inner.reporter),
            window_id,
            url,
            async move { this.panel_info(window_id, task_url, request).await },
        )
    }

    /// Resolve publisher info for a panel and report it to the window.
    ///
    /// Behavior:
    /// - A stored record is returned with blank display fields filled from the request.
    /// - An unknown publisher yields a provisional record built from the request alone.
    /// - Never writes to the store and never touches media entries.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::router::panel_info",
            skip(self, url, request),
            fields(window = %window_id),
        )
    )]
    pub async fn panel_info(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        request: PanelInfoRequest,
    ) -> AttributionOutcome {
        let url = url.into();
        let platform = self.inner.platform;
        let key = match derive_publisher_key(platform, &request.channel_id, &request.publisher_key_hint)
        {
            Ok(key) => key,
            Err(e) => return self.fail(window_id, url, e),
        };

        let mut record = match self.lookup_or_absent(&key).await {
            Some(stored) => stored,
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = %key, "publisher not stored; reporting provisional record");
                fresh_record(platform, key)
            }
        };
        fill_blank_fields(&mut record, &request);

        let outcome = AttributionOutcome::Resolved {
            window_id,
            url,
            record,
        };
        self.inner.reporter.report(&outcome);
        outcome
    }
}

fn fill_blank_fields(record: &mut PublisherRecord, request: &PanelInfoRequest) {
    if record.name.is_empty()
        && let Some(title) = non_empty(&request.title)
    {
        record.name = title.to_string();
    }
    if record.favicon_url.is_empty()
        && let Some(favicon) = non_empty(&request.favicon_url)
    {
        record.favicon_url = favicon.to_string();
    }
}
