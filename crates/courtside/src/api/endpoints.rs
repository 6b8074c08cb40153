//! Auth endpoint definitions and wire types.
//!
//! Domain services define their own paths and payloads next to their
//! operations; only the auth contract, shared between the pipeline and the
//! session, lives here.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// POST: exchange credentials for a token pair.
pub const AUTH_LOGIN: &str = "auth/login";

/// POST: exchange a refresh token for a new token pair.
pub const AUTH_REFRESH: &str = "auth/refresh";

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokensResponse {
    pub user_id: UserId,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Error body shape used by the backend for rejected requests.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}
