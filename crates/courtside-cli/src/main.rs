//! courtside - CLI for manual exploration and debugging against the
//! Courtside backend.
//!
//! This is a thin wrapper over the `courtside` library; it adds session
//! persistence and human-readable output, nothing more.

mod cli;
mod commands;
mod output;
mod session_store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Auth(cmd) => commands::auth::handle(cmd, &cli.api).await,
        Commands::Venues(cmd) => commands::venues::handle(cmd, &cli.api).await,
        Commands::Bookings(cmd) => commands::bookings::handle(cmd, &cli.api).await,
        Commands::Clips(cmd) => commands::clips::handle(cmd, &cli.api).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
