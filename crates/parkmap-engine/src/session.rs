//! The load-once session: fetch, normalize, index, draw; geolocate on the
//! side; route selections to the renderer.
//!
//! Fetching and geolocation run as spawned tasks that report back over a
//! channel. Only the session owner touches the renderer and the index, and
//! only while applying an event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parkmap_core::{Coordinate, RawLotRecord, RawZoneRecord, RendererConfig};
use parkmap_feeds::{FeedError, FeedSource};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::geolocation::{GeolocationError, Geolocator};
use crate::index::RecordIndex;
use crate::normalize::normalize_all;
use crate::render::RendererAdapter;
use crate::search::{ranked_search, RankedRecord, SearchableRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Ready => "ready",
            SessionState::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session already started (state: {0})")]
    AlreadyStarted(SessionState),
}

/// Completion report from one of the session's background tasks.
#[derive(Debug)]
pub enum SessionEvent {
    FeedsLoaded(Result<(Vec<RawLotRecord>, Vec<RawZoneRecord>), FeedError>),
    Located(Result<Coordinate, GeolocationError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    FetchFailure,
    GeolocationUnavailable,
}

/// A user-visible, non-fatal message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Counts from the load that moved the session to `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub lots: usize,
    pub zones: usize,
    pub overlays: usize,
    pub skipped_lots: usize,
    pub skipped_zones: usize,
    pub loaded_at: DateTime<Utc>,
}

/// Owns the renderer for its whole lifetime. Dropping the session aborts
/// any in-flight task and tears the renderer down exactly once.
pub struct Session<R: RendererAdapter> {
    renderer: R,
    config: RendererConfig,
    state: SessionState,
    index: RecordIndex,
    location: Option<Coordinate>,
    notices: Vec<Notice>,
    summary: Option<LoadSummary>,
    events: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    tasks: Vec<JoinHandle<()>>,
    outstanding: usize,
    awaiting_location: bool,
    torn_down: bool,
}

impl<R: RendererAdapter> Session<R> {
    #[must_use]
    pub fn new(renderer: R, config: &RendererConfig) -> Self {
        Self {
            renderer,
            config: config.clone(),
            state: SessionState::Idle,
            index: RecordIndex::new(),
            location: None,
            notices: Vec::new(),
            summary: None,
            events: None,
            tasks: Vec::new(),
            outstanding: 0,
            awaiting_location: false,
            torn_down: false,
        }
    }

    /// Starts the feed load and the geolocation request. Must be called
    /// from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStarted`] unless the session is `Idle`.
    pub fn start<F, G>(&mut self, feeds: Arc<F>, geolocator: Arc<G>) -> Result<(), SessionError>
    where
        F: FeedSource + 'static,
        G: Geolocator + 'static,
    {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyStarted(self.state));
        }

        let (tx, rx) = mpsc::unbounded_channel();

        let load_tx = tx.clone();
        self.tasks.push(tokio::spawn(async move {
            let result = futures::future::try_join(feeds.fetch_lots(), feeds.fetch_zones()).await;
            if load_tx.send(SessionEvent::FeedsLoaded(result)).is_err() {
                tracing::debug!("session closed before feeds loaded");
            }
        }));

        self.tasks.push(tokio::spawn(async move {
            let result = geolocator.locate().await;
            if tx.send(SessionEvent::Located(result)).is_err() {
                tracing::debug!("session closed before geolocation resolved");
            }
        }));

        self.events = Some(rx);
        self.outstanding = self.tasks.len();
        self.awaiting_location = true;
        self.state = SessionState::Loading;
        tracing::info!("session started; loading parking feeds");
        Ok(())
    }

    /// Applies task reports until both tasks have reported. A task that
    /// ends without reporting (it panicked) is treated as a failure of
    /// whatever it was producing.
    pub async fn settle(&mut self) {
        while self.outstanding > 0 {
            let Some(events) = self.events.as_mut() else {
                break;
            };
            let event = events.recv().await;
            match event {
                Some(event) => self.apply(event),
                None => {
                    self.abandon_pending();
                    break;
                }
            }
        }
    }

    fn abandon_pending(&mut self) {
        tracing::error!(
            outstanding = self.outstanding,
            "session task ended without reporting"
        );
        self.outstanding = 0;
        if self.state == SessionState::Loading {
            self.fail_load("the load task stopped unexpectedly");
        }
        if self.awaiting_location {
            self.awaiting_location = false;
            self.notices.push(Notice {
                kind: NoticeKind::GeolocationUnavailable,
                message: "Could not determine your location: lookup stopped unexpectedly"
                    .to_string(),
            });
        }
    }

    /// Applies a single task report. Reports can arrive in any order.
    pub fn apply(&mut self, event: SessionEvent) {
        self.outstanding = self.outstanding.saturating_sub(1);
        match event {
            SessionEvent::FeedsLoaded(result) => {
                if matches!(self.state, SessionState::Ready | SessionState::Failed) {
                    tracing::warn!(state = %self.state, "ignoring repeated feed load");
                    return;
                }
                match result {
                    Ok((lots, zones)) => self.finish_load(lots, zones),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to load parking data");
                        self.fail_load(&e.to_string());
                    }
                }
            }
            SessionEvent::Located(Ok(at)) => {
                self.awaiting_location = false;
                tracing::info!(location = %at, "location resolved");
                self.location = Some(at);
                self.renderer
                    .place_marker(at, &self.config.marker.location_title);
                self.renderer.focus(at, self.config.locate_zoom);
            }
            SessionEvent::Located(Err(e)) => {
                self.awaiting_location = false;
                tracing::warn!(error = %e, "geolocation unavailable");
                self.notices.push(Notice {
                    kind: NoticeKind::GeolocationUnavailable,
                    message: format!("Could not determine your location: {e}"),
                });
            }
        }
    }

    fn finish_load(&mut self, lots: Vec<RawLotRecord>, zones: Vec<RawZoneRecord>) {
        let set = normalize_all(&lots, &zones);
        for overlay in &set.overlays {
            self.renderer.draw_overlay(overlay);
        }

        let summary = LoadSummary {
            lots: lots.len(),
            zones: zones.len(),
            overlays: set.overlays.len(),
            skipped_lots: set.skipped_lots,
            skipped_zones: set.skipped_zones,
            loaded_at: Utc::now(),
        };
        tracing::info!(
            lots = summary.lots,
            zones = summary.zones,
            overlays = summary.overlays,
            "parking data loaded"
        );

        self.index.load(lots, zones);
        self.summary = Some(summary);
        self.state = SessionState::Ready;
    }

    fn fail_load(&mut self, reason: &str) {
        self.notices.push(Notice {
            kind: NoticeKind::FetchFailure,
            message: format!("Failed to load parking data: {reason}"),
        });
        self.state = SessionState::Failed;
    }

    /// Searches the loaded records, ranked from the resolved location when
    /// there is one.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<RankedRecord> {
        ranked_search(&self.index, query, self.location)
    }

    /// Focuses the renderer on `record` and presents its detail. Returns the
    /// anchor used, or `None` when the record has no usable geometry.
    pub fn select(&mut self, record: &SearchableRecord) -> Option<Coordinate> {
        let Some(anchor) = record.anchor() else {
            tracing::warn!(label = record.label(), "selected record has no usable geometry");
            return None;
        };
        self.renderer.focus(anchor, self.config.focus_zoom);
        self.renderer
            .present_detail(anchor, record.label(), &record.detail());
        Some(anchor)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    #[must_use]
    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    #[must_use]
    pub fn index(&self) -> &RecordIndex {
        &self.index
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn load_summary(&self) -> Option<&LoadSummary> {
        self.summary.as_ref()
    }

    /// Ends the session. Equivalent to dropping it.
    pub fn teardown(self) {
        drop(self);
    }

    fn release(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if !self.torn_down {
            self.torn_down = true;
            self.renderer.teardown();
        }
    }
}

impl<R: RendererAdapter> Drop for Session<R> {
    fn drop(&mut self) {
        self.release();
    }
}
