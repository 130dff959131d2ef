//! Server error types.

use std::io;
use std::path::PathBuf;

use crate::live_reload::SnapshotError;

/// Errors that prevent the server from starting or keep it from running.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The served directory does not exist or cannot be resolved.
    #[error("cannot serve {}: {source}", path.display())]
    RootDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The initial directory scan failed.
    #[error("failed to start watcher: {0}")]
    Watch(#[from] SnapshotError),

    /// The listener could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
