//! Validated value types used across the client.

mod base_url;
mod ids;
mod request_id;

pub use base_url::ApiBaseUrl;
pub use ids::{BookingId, ClipId, CourtId, UserId, VenueId};
pub use request_id::RequestId;
