//! CLI error types.

use pulse_config::ConfigError;
use pulse_server::ServerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
