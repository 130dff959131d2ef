//! `pulse serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use pulse_config::{CliSettings, Config};
use pulse_server::{CLIENT_SCRIPT_PATH, Server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover pulse.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to serve and watch (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Enable verbose output (request and watcher logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable live reload (default: enabled).
    #[arg(long)]
    live_reload: Option<bool>,

    /// Disable live reload.
    #[arg(long, conflicts_with = "live_reload")]
    no_live_reload: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let live_reload_enabled = self.resolve_live_reload_enabled();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            root_dir: self.root,
            live_reload_enabled,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        let server = Server::bind(server_config_from_config(&config)).await?;

        output.highlight(&format!("Serving at http://{}", server.local_addr()));
        output.info(&format!("Root directory: {}", server.root_dir().display()));
        if config.live_reload.enabled {
            output.info(&format!(
                "Live reload: enabled (include <script src=\"{CLIENT_SCRIPT_PATH}\"></script>)"
            ));
        } else {
            output.info("Live reload: disabled");
        }

        server.run().await?;

        Ok(())
    }

    /// Resolve `live_reload_enabled` from --live-reload/--no-live-reload flags.
    fn resolve_live_reload_enabled(&self) -> Option<bool> {
        self.no_live_reload.then_some(false).or(self.live_reload)
    }
}
