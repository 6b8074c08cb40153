//! Client and per-call configuration.

use std::time::Duration;

use crate::types::ApiBaseUrl;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on transparent network retries per logical call.
const DEFAULT_NETWORK_RETRIES: u32 = 2;

/// Default base unit for the exponential backoff ladder.
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Configuration for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: ApiBaseUrl,
    timeout: Duration,
    max_network_retries: u32,
    retry_base_delay: Duration,
    user_agent: String,
}

impl ApiConfig {
    /// Create a configuration with defaults for everything but the base URL.
    pub fn new(base_url: ApiBaseUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            max_network_retries: DEFAULT_NETWORK_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            user_agent: concat!("courtside/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the default request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the cap on transparent network retries per logical call.
    pub fn with_max_network_retries(mut self, retries: u32) -> Self {
        self.max_network_retries = retries;
        self
    }

    /// Set the base unit for the backoff ladder.
    ///
    /// The delay before retry `n` (1-based) is `base * 2^n`; with the 1 s
    /// default that gives 2 s, then 4 s. Tests shrink the base to keep the
    /// ladder shape without the wait.
    pub fn with_retry_base_delay(mut self, base: Duration) -> Self {
        self.retry_base_delay = base;
        self
    }

    /// Set the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &ApiBaseUrl {
        &self.base_url
    }

    /// Returns the default request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the network retry cap.
    pub fn max_network_retries(&self) -> u32 {
        self.max_network_retries
    }

    /// Returns the user agent string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Backoff delay before retry `attempt` (1-based), pure exponential
    /// with no jitter.
    pub(crate) fn retry_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Per-call overrides for a single pipeline dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallConfig {
    /// Override the client-level timeout for this call.
    pub timeout: Option<Duration>,
    /// Skip the auth-attach step and the 401 refresh path.
    pub skip_auth: bool,
    /// Override the network retry cap for this call.
    pub max_network_retries: Option<u32>,
}

impl CallConfig {
    /// A call that must not carry credentials (login, refresh).
    pub fn unauthenticated() -> Self {
        Self {
            skip_auth: true,
            ..Self::default()
        }
    }

    /// Override the timeout for this call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the network retry cap for this call.
    pub fn with_max_network_retries(mut self, retries: u32) -> Self {
        self.max_network_retries = Some(retries);
        self
    }
}
