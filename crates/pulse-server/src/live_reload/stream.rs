//! Server-sent event stream for live reload.
//!
//! Each connected browser tab holds one stream open. The stream polls the
//! shared [`VersionState`] and emits a `reload` event whenever the version
//! moved past the last value this client was told about.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::Stream;
use futures::stream;

use super::version::VersionState;
use crate::state::AppState;

/// Default interval between version polls.
pub(crate) const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Payload of every event sent to clients.
const RELOAD_MESSAGE: &str = "reload";

/// Last version a single client has been notified about.
pub(crate) struct ReloadCursor {
    version: Arc<VersionState>,
    last_seen: u64,
}

impl ReloadCursor {
    /// Start tracking from the current version.
    pub(crate) fn new(version: Arc<VersionState>) -> Self {
        let last_seen = version.read();
        tracing::debug!(version = last_seen, "Reload client connected");
        Self { version, last_seen }
    }

    /// Record the current version, returning `true` if it changed.
    pub(crate) fn advance(&mut self) -> bool {
        let current = self.version.read();
        if current == self.last_seen {
            return false;
        }
        self.last_seen = current;
        true
    }
}

impl Drop for ReloadCursor {
    fn drop(&mut self) {
        tracing::debug!(version = self.last_seen, "Reload client disconnected");
    }
}

/// Stream of reload events for one client.
///
/// Ends only when dropped, which happens once the connection is gone.
pub(crate) fn reload_events(
    version: Arc<VersionState>,
    poll_interval: Duration,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(ReloadCursor::new(version), move |mut cursor| async move {
        loop {
            tokio::time::sleep(poll_interval).await;
            if cursor.advance() {
                return Some((Ok(Event::default().data(RELOAD_MESSAGE)), cursor));
            }
        }
    })
}

/// Open a reload event stream.
pub(crate) async fn reload_handler(State(state): State<Arc<AppState>>) -> Response {
    let Some(ref live_reload) = state.live_reload else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let events = reload_events(Arc::clone(&live_reload.version), live_reload.poll_interval);

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(events),
    )
        .into_response()
}
