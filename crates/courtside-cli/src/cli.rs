//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::auth::AuthCommand;
use crate::commands::bookings::BookingCommand;
use crate::commands::clips::ClipCommand;
use crate::commands::venues::VenueCommand;

/// Courtside CLI for venue booking and highlight exploration.
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL
    #[arg(
        long,
        global = true,
        default_value = "https://api.courtside.app/v1"
    )]
    pub api: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Session management
    #[command(subcommand)]
    Auth(AuthCommand),

    /// Venue and court discovery
    #[command(subcommand)]
    Venues(VenueCommand),

    /// Court bookings
    #[command(subcommand)]
    Bookings(BookingCommand),

    /// Highlight clips
    #[command(subcommand)]
    Clips(ClipCommand),
}
