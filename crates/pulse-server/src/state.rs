//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use crate::live_reload::LiveReload;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Canonical path of the served directory.
    pub(crate) root_dir: PathBuf,
    /// Live reload state (if enabled).
    pub(crate) live_reload: Option<LiveReload>,
}

impl AppState {
    /// Check if live reload is enabled.
    #[must_use]
    pub(crate) fn live_reload_enabled(&self) -> bool {
        self.live_reload.is_some()
    }
}
