//! Typed domain services: thin pass-throughs over the request pipeline.
//!
//! Services hold no business logic; every rejection surfaces through the
//! normalized error taxonomy, so a caller only ever deals with
//! `Result<T, ApiError>`.

mod bookings;
mod highlights;
mod social;
mod venues;

pub use bookings::{
    Booking, BookingFilter, BookingPage, BookingService, BookingStatus, CreateBookingRequest,
};
pub use highlights::{Clip, ClipFeedQuery, ClipPage, CreateClipRequest, HighlightService};
pub use social::{
    Comment, CommentPage, FollowState, LikeState, SocialService, UserProfile,
};
pub use venues::{Court, CourtSlot, Venue, VenueFilter, VenuePage, VenueService};

use serde::Serialize;

/// Cursor-based paging parameters shared by list endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}
