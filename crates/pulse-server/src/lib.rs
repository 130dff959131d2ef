//! Development HTTP server with live reload.
//!
//! Serves static files from a directory and tells connected browser tabs to
//! reload whenever a watched file in that directory changes.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use pulse_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         root_dir: PathBuf::from("public"),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (pulse-server)
//!                        │
//!                        ├─► GET /__reload  (server-sent events)
//!                        │       │
//!                        │       └─► polls VersionState ◄── ChangeWatcher (polls directory)
//!                        │
//!                        ├─► GET /__reload.js (client script)
//!                        │
//!                        └─► Static files (tower-http ServeDir)
//! ```
//!
//! Only `.html`, `.css`, `.js`, `.webmanifest` and `.json` files directly
//! inside the served directory are watched.

mod app;
mod error;
mod live_reload;
mod middleware;
mod state;
mod static_files;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub use error::ServerError;
pub use live_reload::{
    CLIENT_SCRIPT_PATH, RELOAD_PATH, Snapshot, SnapshotError, VersionState, WatchedExtensions,
    snapshot,
};

use live_reload::{ChangeWatcher, DEFAULT_POLL_INTERVAL, DEFAULT_WATCH_INTERVAL, LiveReload};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory to serve and watch.
    pub root_dir: PathBuf,
    /// Enable live reload.
    pub live_reload_enabled: bool,
    /// Interval between directory scans.
    pub watch_interval: Duration,
    /// Interval between version polls on each reload stream.
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            root_dir: PathBuf::from("."),
            live_reload_enabled: true,
            watch_interval: DEFAULT_WATCH_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// A bound server, ready to accept connections.
pub struct Server {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
    root_dir: PathBuf,
    watcher: Option<JoinHandle<()>>,
}

impl Server {
    /// Resolve the served directory, start the watcher and bind the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the served directory cannot be scanned or the
    /// address cannot be bound.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let root_dir = config
            .root_dir
            .canonicalize()
            .map_err(|source| ServerError::RootDir {
                path: config.root_dir.clone(),
                source,
            })?;

        let (live_reload, watcher) = if config.live_reload_enabled {
            let version = Arc::new(VersionState::new());
            let watcher = ChangeWatcher::new(
                root_dir.clone(),
                WatchedExtensions::default(),
                Arc::clone(&version),
                config.watch_interval,
            )?;
            let live_reload = LiveReload {
                version,
                poll_interval: config.poll_interval,
            };
            (Some(live_reload), Some(watcher))
        } else {
            (None, None)
        };

        let listener = TcpListener::bind((config.host.as_str(), config.port))
            .await
            .map_err(|source| ServerError::Bind {
                address: format!("{}:{}", config.host, config.port),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        let state = Arc::new(AppState {
            root_dir: root_dir.clone(),
            live_reload,
        });
        let router = app::create_router(state);

        Ok(Self {
            listener,
            router,
            local_addr,
            root_dir,
            watcher: watcher.map(ChangeWatcher::spawn),
        })
    }

    /// Address the server is listening on.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Canonical path of the served directory.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Serve requests until Ctrl-C is received.
    ///
    /// Open reload streams never finish on their own, so shutdown does not
    /// wait for in-flight connections.
    ///
    /// # Errors
    ///
    /// Returns an error if accepting connections fails.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(address = %self.local_addr, root = %self.root_dir.display(), "Serving");

        let serve = axum::serve(self.listener, self.router).into_future();
        let result = tokio::select! {
            result = serve => result,
            () = shutdown_signal() => Ok(()),
        };

        if let Some(watcher) = self.watcher {
            watcher.abort();
        }
        result.map_err(ServerError::from)
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    Server::bind(config).await?.run().await
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from pulse config.
#[must_use]
pub fn server_config_from_config(config: &pulse_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        root_dir: config.root_dir.clone(),
        live_reload_enabled: config.live_reload.enabled,
        watch_interval: config.live_reload.watch_interval(),
        poll_interval: config.live_reload.poll_interval(),
    }
}
