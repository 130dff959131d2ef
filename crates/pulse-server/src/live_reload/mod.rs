//! Live reload: directory polling plus a server-sent event stream.
//!
//! ```text
//! ChangeWatcher ──increment──► VersionState ◄──read── reload stream (one per tab)
//! ```

mod client;
mod scan;
mod stream;
mod version;
mod watcher;

use std::sync::Arc;
use std::time::Duration;

pub(crate) use client::client_script;
pub use scan::{Snapshot, SnapshotError, WatchedExtensions, snapshot};
pub(crate) use stream::{DEFAULT_POLL_INTERVAL, reload_handler};
pub use version::VersionState;
pub(crate) use watcher::{ChangeWatcher, DEFAULT_WATCH_INTERVAL};

/// Path of the reload event stream.
pub const RELOAD_PATH: &str = "/__reload";

/// Path of the client script.
pub const CLIENT_SCRIPT_PATH: &str = "/__reload.js";

/// Live reload state shared with request handlers.
pub(crate) struct LiveReload {
    /// Version published by the watcher.
    pub(crate) version: Arc<VersionState>,
    /// Interval between version polls on each stream.
    pub(crate) poll_interval: Duration,
}
