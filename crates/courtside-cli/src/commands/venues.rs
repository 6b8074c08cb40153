//! Venue discovery commands.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use courtside::services::VenueFilter;
use courtside::{CourtId, VenueId};

use crate::output;

use super::anonymous_client;

#[derive(Subcommand, Debug)]
pub enum VenueCommand {
    /// List venues
    List(ListArgs),
    /// List the courts of a venue
    Courts {
        /// Venue id
        #[arg(long)]
        venue: String,
    },
    /// Show a court's slots for a day
    Slots {
        /// Court id
        #[arg(long)]
        court: String,

        /// Day to query (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by city
    #[arg(long)]
    pub city: Option<String>,

    /// Filter by sport
    #[arg(long)]
    pub sport: Option<String>,

    /// Maximum number of venues
    #[arg(long)]
    pub limit: Option<u32>,

    /// Print the raw response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handle(cmd: VenueCommand, api: &str) -> Result<()> {
    match cmd {
        VenueCommand::List(args) => list(args, api).await,
        VenueCommand::Courts { venue } => courts(&venue, api).await,
        VenueCommand::Slots { court, date } => slots(&court, date, api).await,
    }
}

async fn list(args: ListArgs, api: &str) -> Result<()> {
    let client = anonymous_client(api)?;

    let filter = VenueFilter {
        city: args.city.as_deref(),
        sport: args.sport.as_deref(),
        limit: args.limit,
        cursor: None,
    };

    let page = client
        .venues()
        .list_venues(&filter)
        .await
        .context("Failed to list venues")?;

    if args.json {
        return output::json_pretty(&page);
    }

    for venue in &page.venues {
        println!(
            "{}  {} — {}",
            venue.id.as_str().dimmed(),
            venue.name.bold(),
            venue.city
        );
    }
    if let Some(cursor) = &page.cursor {
        output::field("Next cursor", cursor);
    }

    Ok(())
}

async fn courts(venue: &str, api: &str) -> Result<()> {
    let client = anonymous_client(api)?;
    let venue = VenueId::new(venue).context("Invalid venue id")?;

    let courts = client
        .venues()
        .list_courts(&venue)
        .await
        .context("Failed to list courts")?;

    for court in &courts {
        println!(
            "{}  {} ({}, {:.2}/h)",
            court.id.as_str().dimmed(),
            court.name.bold(),
            court.sport,
            court.price_cents as f64 / 100.0
        );
    }

    Ok(())
}

async fn slots(court: &str, date: NaiveDate, api: &str) -> Result<()> {
    let client = anonymous_client(api)?;
    let court = CourtId::new(court).context("Invalid court id")?;

    let slots = client
        .venues()
        .court_slots(&court, date)
        .await
        .context("Failed to list slots")?;

    for slot in &slots {
        let marker = if slot.available {
            "open".green()
        } else {
            "taken".red()
        };
        println!(
            "{} – {}  {}  ({:.2})",
            slot.starts_at.format("%H:%M"),
            slot.ends_at.format("%H:%M"),
            marker,
            slot.price_cents as f64 / 100.0
        );
    }

    Ok(())
}
