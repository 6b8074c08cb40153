//! Bearer token types.

use std::fmt;

/// A short-lived access token attached to authenticated requests.
///
/// Treat as opaque; never logged or displayed in Debug output.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for the authorization header.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide the token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A longer-lived token used to obtain new access tokens without
/// re-authenticating.
///
/// Treat as opaque; never logged or displayed in Debug output.
#[derive(Clone)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for refresh requests.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide the token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}
