//! Court booking operations.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::types::{BookingId, CourtId, UserId, VenueId};

/// GET/POST: the caller's bookings.
const BOOKINGS: &str = "bookings";

fn booking_path(booking: &BookingId) -> String {
    format!("bookings/{}", booking)
}

fn cancel_path(booking: &BookingId) -> String {
    format!("bookings/{}/cancel", booking)
}

/// Create, list, and cancel court bookings. Requires a session.
#[derive(Clone)]
pub struct BookingService {
    api: Arc<ApiClient>,
}

impl BookingService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// List the caller's bookings.
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &BookingFilter<'_>) -> ApiResult<BookingPage> {
        debug!("listing bookings");
        self.api.get(BOOKINGS, filter).await
    }

    /// Fetch a single booking.
    #[instrument(skip(self), fields(booking = %booking))]
    pub async fn get(&self, booking: &BookingId) -> ApiResult<Booking> {
        self.api.get(&booking_path(booking), &()).await
    }

    /// Book a court slot.
    ///
    /// A slot taken between browsing and booking surfaces as
    /// `BOOKING_SLOT_TAKEN`; the server is the only authority on
    /// availability.
    #[instrument(skip(self, request), fields(court = %request.court_id))]
    pub async fn create(&self, request: &CreateBookingRequest<'_>) -> ApiResult<Booking> {
        debug!("creating booking");
        self.api.post(BOOKINGS, request).await
    }

    /// Cancel a booking.
    #[instrument(skip(self), fields(booking = %booking))]
    pub async fn cancel(&self, booking: &BookingId) -> ApiResult<Booking> {
        debug!("cancelling booking");
        self.api.post(&cancel_path(booking), &()).await
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Query parameters for booking listing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

/// Request body for booking creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest<'a> {
    pub court_id: &'a CourtId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

/// A court booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub court_id: CourtId,
    pub venue_id: VenueId,
    pub user_id: UserId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: BookingStatus,
    /// Total price in minor currency units.
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// One page of bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub cursor: Option<String>,
}
