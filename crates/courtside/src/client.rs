//! High-level client facade wiring config, session, and telemetry.

use std::sync::Arc;

use crate::api::{ApiClient, ApiConfig};
use crate::auth::{AnonymousSession, Credentials, Session, SessionProvider};
use crate::error::ApiError;
use crate::services::{BookingService, HighlightService, SocialService, VenueService};
use crate::telemetry::{TelemetrySink, TracingTelemetry};

/// Entry point for applications: one pipeline shared by all services.
///
/// # Example
///
/// ```no_run
/// use courtside::{ApiBaseUrl, ApiConfig, CourtsideClient, Credentials};
///
/// # async fn example() -> courtside::Result<()> {
/// let config = ApiConfig::new(ApiBaseUrl::new("https://api.courtside.app/v1")?);
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// let client = CourtsideClient::login(config, creds).await?;
///
/// let bookings = client.bookings().list(&Default::default()).await?;
/// println!("{} bookings", bookings.bookings.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CourtsideClient {
    api: Arc<ApiClient>,
}

impl CourtsideClient {
    /// Create a client with explicit session and telemetry wiring.
    pub fn new(
        config: ApiConfig,
        session: Arc<dyn SessionProvider>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            api: Arc::new(ApiClient::new(config, session, telemetry)),
        }
    }

    /// Authenticate and create a client for the resulting session.
    pub async fn login(config: ApiConfig, credentials: Credentials) -> Result<Self, ApiError> {
        let session = Session::login(&config, credentials).await?;
        Ok(Self::with_session(config, session))
    }

    /// Create a client around an existing session (for example one restored
    /// from persisted tokens). Keep a clone of the session to export tokens.
    pub fn with_session(config: ApiConfig, session: Session) -> Self {
        Self::new(config, Arc::new(session), Arc::new(TracingTelemetry))
    }

    /// Create a client with no session, for browse-only use.
    pub fn anonymous(config: ApiConfig) -> Self {
        Self::new(config, Arc::new(AnonymousSession), Arc::new(TracingTelemetry))
    }

    /// Returns the underlying pipeline client.
    pub fn api(&self) -> Arc<ApiClient> {
        self.api.clone()
    }

    /// Returns the injected session accessor.
    pub fn session(&self) -> Arc<dyn SessionProvider> {
        self.api.session().clone()
    }

    /// Venue and court discovery.
    pub fn venues(&self) -> VenueService {
        VenueService::new(self.api.clone())
    }

    /// Court bookings.
    pub fn bookings(&self) -> BookingService {
        BookingService::new(self.api.clone())
    }

    /// Highlight clips.
    pub fn highlights(&self) -> HighlightService {
        HighlightService::new(self.api.clone())
    }

    /// Likes, follows, and comments.
    pub fn social(&self) -> SocialService {
        SocialService::new(self.api.clone())
    }
}
