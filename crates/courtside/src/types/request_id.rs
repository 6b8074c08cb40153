//! Per-call trace identifier.

use rand::Rng;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Number of random base36 characters in a generated identifier.
const SUFFIX_LEN: usize = 9;

/// Trace identifier attached to every outbound call.
///
/// Generated once per logical call (redispatches reuse it) and carried on
/// the `X-Request-ID` header, in log events, and on normalized errors so a
/// failure can be correlated across the three.
///
/// Format: `req_<epoch-ms>_<random-base36>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| {
                let digit = rng.random_range(0..36);
                char::from_digit(digit, 36).unwrap_or('0')
            })
            .collect();

        Self(format!("req_{}_{}", millis, suffix))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
