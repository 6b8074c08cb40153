//! Venue and court discovery.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::types::{CourtId, VenueId};

/// GET: venue listing with optional filters.
const VENUES: &str = "venues";

fn venue_path(venue: &VenueId) -> String {
    format!("venues/{}", venue)
}

fn courts_path(venue: &VenueId) -> String {
    format!("venues/{}/courts", venue)
}

fn slots_path(court: &CourtId) -> String {
    format!("courts/{}/slots", court)
}

/// Browse venues, courts, and availability. Works unauthenticated.
#[derive(Clone)]
pub struct VenueService {
    api: Arc<ApiClient>,
}

impl VenueService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List venues matching the filter.
    #[instrument(skip(self, filter))]
    pub async fn list_venues(&self, filter: &VenueFilter<'_>) -> ApiResult<VenuePage> {
        debug!("listing venues");
        self.api.get(VENUES, filter).await
    }

    /// Fetch a single venue.
    #[instrument(skip(self), fields(venue = %venue))]
    pub async fn get_venue(&self, venue: &VenueId) -> ApiResult<Venue> {
        self.api.get(&venue_path(venue), &()).await
    }

    /// List the courts of a venue.
    #[instrument(skip(self), fields(venue = %venue))]
    pub async fn list_courts(&self, venue: &VenueId) -> ApiResult<Vec<Court>> {
        debug!("listing courts");
        self.api.get(&courts_path(venue), &()).await
    }

    /// List a court's bookable slots for one day.
    #[instrument(skip(self), fields(court = %court, %date))]
    pub async fn court_slots(&self, court: &CourtId, date: NaiveDate) -> ApiResult<Vec<CourtSlot>> {
        debug!("listing court slots");
        self.api.get(&slots_path(court), &SlotQuery { date }).await
    }
}

/// Query parameters for venue listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SlotQuery {
    date: NaiveDate,
}

/// A sports venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}

/// One page of venues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuePage {
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// A single court within a venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: CourtId,
    pub venue_id: VenueId,
    pub name: String,
    pub sport: String,
    #[serde(default)]
    pub surface: Option<String>,
    /// Hourly rate in minor currency units.
    pub price_cents: i64,
}

/// A bookable time slot on a court.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtSlot {
    pub court_id: CourtId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    /// Slot price in minor currency units.
    pub price_cents: i64,
    pub available: bool,
}
