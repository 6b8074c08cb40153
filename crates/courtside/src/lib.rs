//! courtside - Client library for the Courtside venue booking and
//! highlights platform.
//!
//! All traffic to the backend flows through one request pipeline that
//! attaches the session's bearer token, tags each call with a trace id,
//! refreshes the session once on a 401, retries calls that produced no
//! response with bounded exponential backoff, and normalizes every failure
//! into a closed, user-displayable error taxonomy.
//!
//! # Example
//!
//! ```no_run
//! use courtside::{ApiBaseUrl, ApiConfig, CourtsideClient, Credentials};
//!
//! # async fn example() -> courtside::Result<()> {
//! let config = ApiConfig::new(ApiBaseUrl::new("https://api.courtside.app/v1")?);
//! let client =
//!     CourtsideClient::login(config, Credentials::new("alice@example.com", "hunter2")).await?;
//!
//! let venues = client.venues().list_venues(&Default::default()).await?;
//! for venue in venues.venues {
//!     println!("{}: {}", venue.city, venue.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod services;
pub mod telemetry;
pub mod types;

// Re-export primary types at crate root for convenience
pub use api::{ApiClient, ApiConfig, ApiEnvelope, CallConfig};
pub use auth::{AnonymousSession, Credentials, Session, SessionProvider};
pub use client::CourtsideClient;
pub use error::{ApiError, ApiResult, Error, ErrorKind};
pub use telemetry::{ErrorContext, NoopTelemetry, TelemetrySink, TracingTelemetry};
pub use types::{ApiBaseUrl, BookingId, ClipId, CourtId, RequestId, UserId, VenueId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
