//! Polling watcher for the served directory.
//!
//! Rescans the directory on a fixed interval and bumps the shared
//! [`VersionState`] once per scan that differs from the previous one.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::scan::{Snapshot, SnapshotError, WatchedExtensions, snapshot};
use super::version::VersionState;

/// Default interval between directory scans.
pub(crate) const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(1);

/// Detects changes among watched files and publishes them as version bumps.
pub(crate) struct ChangeWatcher {
    root: PathBuf,
    extensions: WatchedExtensions,
    version: Arc<VersionState>,
    interval: Duration,
    previous: Snapshot,
}

impl ChangeWatcher {
    /// Create a watcher, taking the baseline snapshot immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be scanned.
    pub(crate) fn new(
        root: PathBuf,
        extensions: WatchedExtensions,
        version: Arc<VersionState>,
        interval: Duration,
    ) -> Result<Self, SnapshotError> {
        let previous = snapshot(&root, &extensions)?;
        tracing::debug!(
            root = %root.display(),
            files = previous.len(),
            "Initial snapshot taken"
        );
        Ok(Self {
            root,
            extensions,
            version,
            interval,
            previous,
        })
    }

    /// Run one watch tick.
    ///
    /// Returns `true` if the directory changed since the previous tick, in
    /// which case the version has been incremented exactly once.
    pub(crate) fn tick(&mut self) -> Result<bool, SnapshotError> {
        let current = snapshot(&self.root, &self.extensions)?;
        if current == self.previous {
            return Ok(false);
        }
        let version = self.version.increment();
        tracing::info!(version, files = current.len(), "Change detected");
        self.previous = current;
        Ok(true)
    }

    /// Spawn the watch loop as a background task.
    ///
    /// The loop runs until a scan fails. A failed scan is logged and ends
    /// live reload for the process; static serving keeps working.
    pub(crate) fn spawn(self) -> JoinHandle<()> {
        let period = self.interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut watcher = self;
            loop {
                ticker.tick().await;

                // Directory reads block, keep them off the async workers.
                let scan = tokio::task::spawn_blocking(move || {
                    let result = watcher.tick();
                    (watcher, result)
                })
                .await;

                let result = match scan {
                    Ok((returned, result)) => {
                        watcher = returned;
                        result
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "Watcher scan task failed");
                        break;
                    }
                };

                if let Err(err) = result {
                    tracing::error!(
                        error = %err,
                        "Watcher stopped; live reload is disabled until restart"
                    );
                    break;
                }
            }
        })
    }
}
