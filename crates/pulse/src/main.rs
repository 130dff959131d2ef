//! pulse CLI - static file server with live reload.
//!
//! Provides commands for:
//! - `serve`: Serve a directory and reload browsers when its files change

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ServeArgs;
use output::Output;

/// pulse - static file server with live reload.
#[derive(Parser)]
#[command(name = "pulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve a directory with live reload.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(err) => Err(err.into()),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "pulse", "serve", "--root", "public", "--port", "3000", "--verbose",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command;
        assert!(args.verbose);
    }

    #[test]
    fn test_live_reload_flags_conflict() {
        let result = Cli::try_parse_from([
            "pulse",
            "serve",
            "--live-reload",
            "true",
            "--no-live-reload",
        ]);
        assert!(result.is_err());
    }
}
