//! Command implementations and shared wiring.

pub mod auth;
pub mod bookings;
pub mod clips;
pub mod venues;

use anyhow::{Context, Result};

use courtside::{ApiBaseUrl, ApiConfig, CourtsideClient, Session};

use crate::session_store;

/// Build an API config from the `--api` flag.
pub(crate) fn api_config(api: &str) -> Result<ApiConfig> {
    let base = ApiBaseUrl::new(api).context("Invalid API base URL")?;
    Ok(ApiConfig::new(base))
}

/// A client backed by the persisted session, for commands that need auth.
pub(crate) async fn signed_in_client(api: &str) -> Result<(CourtsideClient, Session)> {
    let config = api_config(api)?;
    let session = session_store::load(&config)
        .await?
        .context("Not signed in; run `courtside auth login` first")?;

    Ok((
        CourtsideClient::with_session(config, session.clone()),
        session,
    ))
}

/// A client with no session, for browse-only commands.
pub(crate) fn anonymous_client(api: &str) -> Result<CourtsideClient> {
    Ok(CourtsideClient::anonymous(api_config(api)?))
}
