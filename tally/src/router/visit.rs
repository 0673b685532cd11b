use std::sync::Arc;

use tally_core::{
    AttributionOutcome, AttributionRequest, ChannelVisit, CustomVisit, TallyError, UserVisit,
    VideoVisit, VisitSignals, WindowId, derive_media_key, derive_publisher_key,
};

use crate::router::ledger::MediaClaim;
use crate::{AttributionHandle, Tally};

/// How a visit reaches its publisher, decided synchronously at dispatch.
pub(crate) enum Route {
    /// Key derived from the visit's own signals.
    Keyed(tally_core::PublisherKey),
    /// User page without identity: ask the store who owns the media.
    ByMedia(tally_core::MediaKey),
    /// Nothing to attribute; report failure without store I/O.
    Unattributable(TallyError),
}

impl Tally {
    /// Attribute a channel page visit.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn visit_channel(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        visit: ChannelVisit,
    ) -> AttributionHandle {
        self.visit(window_id, url, visit)
    }

    /// Attribute a user (vanity url) page visit.
    ///
    /// Without a channel id or publisher key hint, the media key is used to find
    /// the owning publisher in the store.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn visit_user(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        visit: UserVisit,
    ) -> AttributionHandle {
        self.visit(window_id, url, visit)
    }

    /// Attribute a video page visit and accrue its observed duration.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn visit_video(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        visit: VideoVisit,
    ) -> AttributionHandle {
        self.visit(window_id, url, visit)
    }

    /// Attribute a visit to a page layout the caller did not recognize.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn visit_custom(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        visit: CustomVisit,
    ) -> AttributionHandle {
        self.visit(window_id, url, visit)
    }

    /// Dispatch a visit of any shape and return immediately.
    ///
    /// Behavior:
    /// - The publisher and media keys are derived before returning, so duration
    ///   updates sent right after dispatch are routed to this visit.
    /// - Resolution, persistence and the single window report happen on a spawned
    ///   task; dropping the returned handle does not cancel it.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn visit(
        &self,
        window_id: WindowId,
        url: impl Into<String>,
        signals: impl Into<VisitSignals>,
    ) -> AttributionHandle {
        let request = AttributionRequest::new(window_id, url, signals);
        let (route, claim) = self.classify(&request);
        let url = request.url.clone();
        let this = self.clone();
        AttributionHandle::spawn(
            Arc::clone(&self.inner.reporter),
            window_id,
            url,
            async move { this.run(request, route, claim).await },
        )
    }

    /// Attribute a visit on the current task and wait for the outcome.
    ///
    /// The window is notified exactly as for [`visit`](Self::visit).
    pub async fn attribute(&self, request: AttributionRequest) -> AttributionOutcome {
        let (route, claim) = self.classify(&request);
        self.run(request, route, claim).await
    }

    pub(crate) fn classify(&self, request: &AttributionRequest) -> (Route, Option<MediaClaim>) {
        let platform = self.inner.platform;
        let signals = &request.signals;
        let media = signals
            .media_key()
            .and_then(|id| derive_media_key(platform, id));

        match derive_publisher_key(platform, signals.channel_id(), signals.publisher_key_hint()) {
            Ok(key) => {
                let claim = media.map(|m| self.inner.ledger.claim(m, key.clone()));
                (Route::Keyed(key), claim)
            }
            Err(e) => match (signals, media) {
                (VisitSignals::User(_), Some(m)) => (Route::ByMedia(m), None),
                _ => (Route::Unattributable(e), None),
            },
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tally::router::visit::run",
            skip(self, request, route, claim),
            fields(
                window = %request.window_id,
                shape = request.signals.shape(),
                url = %request.url,
            ),
        )
    )]
    async fn run(
        &self,
        request: AttributionRequest,
        route: Route,
        claim: Option<MediaClaim>,
    ) -> AttributionOutcome {
        let resolved = match route {
            Route::Unattributable(reason) => {
                return self.fail(request.window_id, request.url, reason);
            }
            Route::Keyed(key) => self.resolve(&request, key, claim.as_ref()).await,
            Route::ByMedia(media) => match self.owner_of_media(&media).await {
                Some(key) => {
                    let claim = self.inner.ledger.claim(media, key.clone());
                    self.resolve(&request, key, Some(&claim)).await
                }
                None => Err(TallyError::insufficient_signal(format!(
                    "{} user visit without channel id, publisher key or known media",
                    self.inner.platform
                ))),
            },
        };
        drop(claim);

        match resolved {
            Ok(record) => {
                let outcome = AttributionOutcome::Resolved {
                    window_id: request.window_id,
                    url: request.url,
                    record,
                };
                self.inner.reporter.report(&outcome);
                outcome
            }
            Err(reason) => self.fail(request.window_id, request.url, reason),
        }
    }
}
