//! Session management and the injectable session accessor.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::api::endpoints::{
    AUTH_LOGIN, AUTH_REFRESH, LoginRequest, RefreshRequest, SessionTokensResponse,
};
use crate::api::{ApiClient, ApiConfig, CallConfig};
use crate::error::{ApiError, ErrorKind};
use crate::types::UserId;

use super::credentials::Credentials;
use super::tokens::{AccessToken, RefreshToken};

/// Access to the current authentication state, injected into the request
/// pipeline instead of being reached through ambient global state.
///
/// The pipeline reads the token on every dispatch, invokes [`refresh`] on a
/// 401, and invokes [`sign_out`] when refresh fails. Implementations must
/// tolerate concurrent calls: two in-flight requests that both hit a 401
/// will both invoke [`refresh`] independently (refresh is idempotent
/// server-side, so the race is documented rather than serialized).
///
/// [`refresh`]: SessionProvider::refresh
/// [`sign_out`]: SessionProvider::sign_out
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current access token, if an unexpired one is held.
    ///
    /// `None` is not an error: the call simply proceeds unauthenticated.
    async fn access_token(&self) -> Option<AccessToken>;

    /// Obtain a fresh access token, replacing the stored pair.
    async fn refresh(&self) -> Result<AccessToken, ApiError>;

    /// Tear the session down.
    async fn sign_out(&self);
}

/// An authenticated session against the Courtside backend.
///
/// Sessions are cheap to clone (internal `Arc`) and safe to share across
/// tasks. Obtain one via [`Session::login`] or restore one from persisted
/// tokens via [`Session::from_persisted`].
///
/// # Example
///
/// ```no_run
/// use courtside::{ApiBaseUrl, ApiConfig, Credentials, Session};
///
/// # async fn example() -> courtside::Result<()> {
/// let config = ApiConfig::new(ApiBaseUrl::new("https://api.courtside.app/v1")?);
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// let session = Session::login(&config, creds).await?;
///
/// println!("signed in as {}", session.user_id());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    user_id: UserId,
    transport: ApiClient,
    tokens: RwLock<Option<SessionTokens>>,
    sign_out_hook: OnceLock<Box<dyn Fn() + Send + Sync>>,
}

struct SessionTokens {
    access: AccessToken,
    refresh: Option<RefreshToken>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Authenticate and create a new session.
    ///
    /// # Errors
    ///
    /// Returns a normalized error if authentication fails or the backend is
    /// unreachable.
    #[instrument(skip(config, credentials), fields(identifier = credentials.identifier()))]
    pub async fn login(config: &ApiConfig, credentials: Credentials) -> Result<Self, ApiError> {
        info!("creating new session");

        let transport = ApiClient::unauthenticated(config.clone());
        let request = LoginRequest {
            identifier: credentials.identifier(),
            password: credentials.password(),
        };

        let response: SessionTokensResponse = transport
            .post_with(AUTH_LOGIN, &request, CallConfig::unauthenticated())
            .await?;

        debug!(user = %response.user_id, "session created");
        Ok(Self::from_response(transport, response))
    }

    /// Restore a session from persisted tokens without re-authenticating.
    ///
    /// The caller is responsible for the tokens being plausible; an expired
    /// access token is recovered through the normal 401/refresh path.
    pub fn from_persisted(
        config: &ApiConfig,
        user_id: UserId,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Self {
        let tokens = SessionTokens {
            access: AccessToken::new(access_token),
            refresh: refresh_token.map(RefreshToken::new),
            expires_at: None,
        };

        Self {
            inner: Arc::new(SessionInner {
                user_id,
                transport: ApiClient::unauthenticated(config.clone()),
                tokens: RwLock::new(Some(tokens)),
                sign_out_hook: OnceLock::new(),
            }),
        }
    }

    fn from_response(transport: ApiClient, response: SessionTokensResponse) -> Self {
        let tokens = SessionTokens {
            access: AccessToken::new(response.access_token),
            refresh: response.refresh_token.map(RefreshToken::new),
            expires_at: expiry(response.expires_in),
        };

        Self {
            inner: Arc::new(SessionInner {
                user_id: response.user_id,
                transport,
                tokens: RwLock::new(Some(tokens)),
                sign_out_hook: OnceLock::new(),
            }),
        }
    }

    /// Returns the user this session belongs to.
    pub fn user_id(&self) -> &UserId {
        &self.inner.user_id
    }

    /// Whether the session currently holds tokens.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.tokens.read().await.is_some()
    }

    /// Export the current access token for persistence.
    ///
    /// Handle the returned value securely; it grants access to the account.
    pub async fn export_access_token(&self) -> Option<String> {
        let tokens = self.inner.tokens.read().await;
        tokens.as_ref().map(|t| t.access.as_str().to_string())
    }

    /// Export the current refresh token for persistence.
    pub async fn export_refresh_token(&self) -> Option<String> {
        let tokens = self.inner.tokens.read().await;
        tokens
            .as_ref()
            .and_then(|t| t.refresh.as_ref().map(|r| r.as_str().to_string()))
    }

    /// Register a callback invoked when the session is torn down.
    ///
    /// The application typically navigates to its login surface here. Only
    /// the first registered hook takes effect.
    pub fn set_sign_out_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        let _ = self.inner.sign_out_hook.set(Box::new(hook));
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// The session is updated in place. If the backend does not rotate the
    /// refresh token, the existing one is kept.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::AuthSessionNotFound`] when no refresh token
    /// is held, or with the backend's normalized rejection otherwise.
    #[instrument(skip(self), fields(user = %self.inner.user_id))]
    pub async fn refresh(&self) -> Result<AccessToken, ApiError> {
        info!("refreshing session");

        let refresh_token = {
            let tokens = self.inner.tokens.read().await;
            tokens.as_ref().and_then(|t| t.refresh.clone())
        };

        let Some(refresh_token) = refresh_token else {
            return Err(ApiError::new(ErrorKind::AuthSessionNotFound));
        };

        let request = RefreshRequest {
            refresh_token: refresh_token.as_str(),
        };

        let response: SessionTokensResponse = self
            .inner
            .transport
            .post_with(AUTH_REFRESH, &request, CallConfig::unauthenticated())
            .await?;

        let access = AccessToken::new(response.access_token);

        {
            let mut tokens = self.inner.tokens.write().await;
            *tokens = Some(SessionTokens {
                access: access.clone(),
                refresh: response
                    .refresh_token
                    .map(RefreshToken::new)
                    .or(Some(refresh_token)),
                expires_at: expiry(response.expires_in),
            });
        }

        debug!("session refreshed");
        Ok(access)
    }

    /// Drop the token pair and notify the sign-out hook.
    pub async fn sign_out(&self) {
        info!(user = %self.inner.user_id, "signing out");

        {
            let mut tokens = self.inner.tokens.write().await;
            *tokens = None;
        }

        if let Some(hook) = self.inner.sign_out_hook.get() {
            hook();
        }
    }
}

fn expiry(expires_in: Option<i64>) -> Option<DateTime<Utc>> {
    expires_in.map(|secs| Utc::now() + TimeDelta::seconds(secs))
}

#[async_trait]
impl SessionProvider for Session {
    async fn access_token(&self) -> Option<AccessToken> {
        let tokens = self.inner.tokens.read().await;
        let tokens = tokens.as_ref()?;

        // An expired token is never attached; the 401/refresh path recovers.
        if tokens.expires_at.is_some_and(|at| at <= Utc::now()) {
            return None;
        }

        Some(tokens.access.clone())
    }

    async fn refresh(&self) -> Result<AccessToken, ApiError> {
        Session::refresh(self).await
    }

    async fn sign_out(&self) {
        Session::sign_out(self).await;
    }
}

// Custom Debug impl that hides token state
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.inner.user_id)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

/// A provider with no authentication state, for browse-only surfaces.
///
/// Calls dispatched with it proceed unauthenticated, and a 401 fails fast
/// because [`SessionProvider::refresh`] has nothing to exchange.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymousSession;

#[async_trait]
impl SessionProvider for AnonymousSession {
    async fn access_token(&self) -> Option<AccessToken> {
        None
    }

    async fn refresh(&self) -> Result<AccessToken, ApiError> {
        Err(ApiError::new(ErrorKind::AuthSessionNotFound))
    }

    async fn sign_out(&self) {}
}
