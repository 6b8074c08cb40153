//! Booking commands.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

use courtside::services::{BookingFilter, BookingStatus, CreateBookingRequest};
use courtside::{BookingId, CourtId};

use crate::output;

use super::signed_in_client;

#[derive(Subcommand, Debug)]
pub enum BookingCommand {
    /// List your bookings
    List(ListArgs),
    /// Book a court slot
    Create(CreateArgs),
    /// Cancel a booking
    Cancel {
        /// Booking id
        #[arg(long)]
        booking: String,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by status (pending, confirmed, cancelled, completed)
    #[arg(long)]
    pub status: Option<String>,

    /// Maximum number of bookings
    #[arg(long)]
    pub limit: Option<u32>,

    /// Print the raw response as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Court id
    #[arg(long)]
    pub court: String,

    /// Slot start (RFC 3339, e.g. 2026-08-07T18:00:00Z)
    #[arg(long)]
    pub starts_at: DateTime<Utc>,

    /// Slot end (RFC 3339)
    #[arg(long)]
    pub ends_at: DateTime<Utc>,
}

pub async fn handle(cmd: BookingCommand, api: &str) -> Result<()> {
    match cmd {
        BookingCommand::List(args) => list(args, api).await,
        BookingCommand::Create(args) => create(args, api).await,
        BookingCommand::Cancel { booking } => cancel(&booking, api).await,
    }
}

fn parse_status(s: &str) -> Result<BookingStatus> {
    Ok(match s.to_lowercase().as_str() {
        "pending" => BookingStatus::Pending,
        "confirmed" => BookingStatus::Confirmed,
        "cancelled" => BookingStatus::Cancelled,
        "completed" => BookingStatus::Completed,
        other => bail!("unknown booking status '{other}'"),
    })
}

async fn list(args: ListArgs, api: &str) -> Result<()> {
    let (client, _session) = signed_in_client(api).await?;

    let filter = BookingFilter {
        status: args.status.as_deref().map(parse_status).transpose()?,
        limit: args.limit,
        cursor: None,
    };

    let page = client
        .bookings()
        .list(&filter)
        .await
        .context("Failed to list bookings")?;

    if args.json {
        return output::json_pretty(&page);
    }

    for booking in &page.bookings {
        println!(
            "{}  {}  {} – {}  {:?}",
            booking.id,
            booking.court_id,
            booking.starts_at.format("%Y-%m-%d %H:%M"),
            booking.ends_at.format("%H:%M"),
            booking.status
        );
    }
    if let Some(cursor) = &page.cursor {
        output::field("Next cursor", cursor);
    }

    Ok(())
}

async fn create(args: CreateArgs, api: &str) -> Result<()> {
    let (client, _session) = signed_in_client(api).await?;
    let court = CourtId::new(&args.court).context("Invalid court id")?;

    let request = CreateBookingRequest {
        court_id: &court,
        starts_at: args.starts_at,
        ends_at: args.ends_at,
    };

    let booking = client
        .bookings()
        .create(&request)
        .await
        .context("Failed to create booking")?;

    output::success("Booked");
    output::field("Booking", booking.id.as_str());
    output::field(
        "Slot",
        &format!(
            "{} – {}",
            booking.starts_at.format("%Y-%m-%d %H:%M"),
            booking.ends_at.format("%H:%M")
        ),
    );

    Ok(())
}

async fn cancel(booking: &str, api: &str) -> Result<()> {
    let (client, _session) = signed_in_client(api).await?;
    let booking = BookingId::new(booking).context("Invalid booking id")?;

    let cancelled = client
        .bookings()
        .cancel(&booking)
        .await
        .context("Failed to cancel booking")?;

    output::success("Cancelled");
    output::field("Booking", cancelled.id.as_str());

    Ok(())
}
