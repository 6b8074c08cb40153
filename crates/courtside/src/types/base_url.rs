//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL for the Courtside backend.
///
/// The URL must be absolute and use HTTPS (HTTP is allowed for loopback
/// hosts, which the integration tests rely on). Trailing slashes are
/// normalized away so endpoint paths join cleanly.
///
/// # Example
///
/// ```
/// use courtside::ApiBaseUrl;
///
/// let base = ApiBaseUrl::new("https://api.courtside.app/v1").unwrap();
/// assert_eq!(base.endpoint("bookings"), "https://api.courtside.app/v1/bookings");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiBaseUrl(Url);

impl ApiBaseUrl {
    /// Create a new base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is relative, has no host, or uses a
    /// scheme other than HTTPS (HTTP only for loopback).
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BaseUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an endpoint path (given without a leading
    /// slash).
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let is_loopback = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        let scheme = url.scheme();
        if scheme != "https" && !(scheme == "http" && is_loopback) {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for loopback)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BaseUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiBaseUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiBaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiBaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiBaseUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiBaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let base = ApiBaseUrl::new("https://api.courtside.app/v1").unwrap();
        assert_eq!(base.host(), Some("api.courtside.app"));
    }

    #[test]
    fn valid_loopback_http() {
        let base = ApiBaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(base.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_join() {
        let base = ApiBaseUrl::new("https://api.courtside.app/v1").unwrap();
        assert_eq!(
            base.endpoint("bookings"),
            "https://api.courtside.app/v1/bookings"
        );
    }

    #[test]
    fn endpoint_join_with_trailing_slash() {
        let base = ApiBaseUrl::new("https://api.courtside.app/").unwrap();
        assert_eq!(base.endpoint("venues"), "https://api.courtside.app/venues");
    }

    #[test]
    fn rejects_http_non_loopback() {
        assert!(ApiBaseUrl::new("http://api.courtside.app").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(ApiBaseUrl::new("/v1/bookings").is_err());
    }
}
