//! Auth-aware HTTP dispatch against the Courtside backend.
//!
//! Every call flows through the same pipeline: attach the current bearer
//! token, tag the call with a trace identifier, dispatch, then recover
//! locally where the failure allows it: one refresh-and-redispatch for a
//! 401, and a bounded exponential backoff for calls that produced no HTTP
//! response at all. Everything else is normalized into an [`ApiError`] and
//! reported to the telemetry sink before it is returned; no raw transport
//! error crosses this boundary.
//!
//! Concurrent calls are fully independent: attempt state is local to each
//! logical call, and the 401 path is deliberately not serialized. Two
//! calls that both hit a 401 will both invoke refresh (see
//! [`SessionProvider`]).

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::auth::{AnonymousSession, SessionProvider};
use crate::error::{ApiError, ApiResult, ErrorKind, Failure};
use crate::telemetry::{ErrorContext, TelemetrySink, TracingTelemetry};
use crate::types::RequestId;

use super::config::{ApiConfig, CallConfig};
use super::endpoints::ErrorBody;

/// Trace header attached to every outbound call.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client wrapping the backend with the request pipeline.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<dyn SessionProvider>,
    telemetry: Arc<dyn TelemetrySink>,
}

/// Everything needed to (re)build one attempt of a logical call.
struct RequestParts<'a> {
    method: Method,
    path: &'a str,
    query: Option<serde_json::Value>,
    body: Option<serde_json::Value>,
    call: CallConfig,
}

/// Immutable attempt state threaded through the dispatch loop.
///
/// Replaces a mutable "already retried" flag on the request itself: each
/// iteration rebinds a fresh value, so no attempt can observe another's
/// counters.
#[derive(Clone, Copy, Debug, Default)]
struct Attempt {
    network_retries: u32,
    auth_retried: bool,
}

impl ApiClient {
    /// Create a client with an injected session accessor and telemetry sink.
    pub fn new(
        config: ApiConfig,
        session: Arc<dyn SessionProvider>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            config,
            session,
            telemetry,
        }
    }

    /// Create a client with no session, for unauthenticated surfaces and
    /// for the session's own login/refresh transport.
    pub fn unauthenticated(config: ApiConfig) -> Self {
        Self::new(
            config,
            Arc::new(AnonymousSession),
            Arc::new(TracingTelemetry),
        )
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the injected session accessor.
    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    // ========================================================================
    // Verbs
    // ========================================================================

    /// GET with query parameters (pass `&()` for none).
    pub async fn get<Q, R>(&self, path: &str, query: &Q) -> ApiResult<R>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        self.get_with(path, query, CallConfig::default()).await
    }

    /// GET with per-call overrides.
    pub async fn get_with<Q, R>(&self, path: &str, query: &Q, call: CallConfig) -> ApiResult<R>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let parts = RequestParts {
            method: Method::GET,
            path,
            query: encode(query)?,
            body: None,
            call,
        };
        self.dispatch(parts).await
    }

    /// POST a JSON body.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.post_with(path, body, CallConfig::default()).await
    }

    /// POST with per-call overrides.
    pub async fn post_with<B, R>(&self, path: &str, body: &B, call: CallConfig) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let parts = RequestParts {
            method: Method::POST,
            path,
            query: None,
            body: encode(body)?,
            call,
        };
        self.dispatch(parts).await
    }

    /// PUT a JSON body.
    pub async fn put<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.put_with(path, body, CallConfig::default()).await
    }

    /// PUT with per-call overrides.
    pub async fn put_with<B, R>(&self, path: &str, body: &B, call: CallConfig) -> ApiResult<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let parts = RequestParts {
            method: Method::PUT,
            path,
            query: None,
            body: encode(body)?,
            call,
        };
        self.dispatch(parts).await
    }

    /// DELETE, decoding a JSON response body.
    pub async fn delete<R>(&self, path: &str) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        self.delete_with(path, CallConfig::default()).await
    }

    /// DELETE with per-call overrides.
    pub async fn delete_with<R>(&self, path: &str, call: CallConfig) -> ApiResult<R>
    where
        R: DeserializeOwned,
    {
        let parts = RequestParts {
            method: Method::DELETE,
            path,
            query: None,
            body: None,
            call,
        };
        self.dispatch(parts).await
    }

    /// DELETE an endpoint that returns no body.
    pub async fn delete_no_content(&self, path: &str) -> ApiResult<()> {
        let parts = RequestParts {
            method: Method::DELETE,
            path,
            query: None,
            body: None,
            call: CallConfig::default(),
        };
        self.dispatch_raw(&parts).await.map(|_| ())
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    async fn dispatch<R: DeserializeOwned>(&self, parts: RequestParts<'_>) -> ApiResult<R> {
        let (response, request_id) = self.dispatch_raw(&parts).await?;

        response
            .json::<R>()
            .await
            .map_err(|err| self.fail(Failure::from_transport(&err), &parts, &request_id))
    }

    /// Drive one logical call to a success-status response or a normalized
    /// error, applying the refresh and backoff recovery paths.
    #[instrument(skip(self, parts), fields(method = %parts.method, path = parts.path))]
    async fn dispatch_raw(
        &self,
        parts: &RequestParts<'_>,
    ) -> ApiResult<(reqwest::Response, RequestId)> {
        let request_id = RequestId::generate();
        let retry_cap = parts
            .call
            .max_network_retries
            .unwrap_or(self.config.max_network_retries());

        let mut attempt = Attempt::default();

        loop {
            debug!(
                request_id = %request_id,
                network_retries = attempt.network_retries,
                auth_retried = attempt.auth_retried,
                "dispatching request"
            );

            let response = match self.execute(parts, &request_id).await {
                Ok(response) => response,
                Err(err) if is_no_response(&err) && attempt.network_retries < retry_cap => {
                    let delay = self.config.retry_delay(attempt.network_retries + 1);
                    debug!(
                        request_id = %request_id,
                        delay_ms = delay.as_millis() as u64,
                        "no response, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = Attempt {
                        network_retries: attempt.network_retries + 1,
                        ..attempt
                    };
                    continue;
                }
                Err(err) => {
                    return Err(self.fail(Failure::from_transport(&err), parts, &request_id));
                }
            };

            let status = response.status();
            debug!(request_id = %request_id, status = status.as_u16(), "received response");

            if status.is_success() {
                return Ok((response, request_id));
            }

            let failure = read_failure(response).await;

            if status == StatusCode::UNAUTHORIZED
                && !attempt.auth_retried
                && !parts.call.skip_auth
            {
                match self.session.refresh().await {
                    Ok(_) => {
                        debug!(request_id = %request_id, "session refreshed, redispatching");
                        attempt = Attempt {
                            auth_retried: true,
                            ..attempt
                        };
                        continue;
                    }
                    Err(refresh_err) => {
                        warn!(
                            request_id = %request_id,
                            error = %refresh_err,
                            "session refresh failed, signing out"
                        );
                        self.session.sign_out().await;
                        // The caller sees the original 401, not the refresh
                        // failure.
                        return Err(self.fail(failure, parts, &request_id));
                    }
                }
            }

            return Err(self.fail(failure, parts, &request_id));
        }
    }

    /// Build and send one attempt. The token is re-read from the session
    /// accessor each time, so a redispatch picks up a refreshed token.
    async fn execute(
        &self,
        parts: &RequestParts<'_>,
        request_id: &RequestId,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = self.config.base_url().endpoint(parts.path);
        let mut builder = self
            .http
            .request(parts.method.clone(), &url)
            .header(REQUEST_ID_HEADER, request_id.as_str());

        if let Some(query) = &parts.query {
            builder = builder.query(query);
        }
        if let Some(body) = &parts.body {
            builder = builder.json(body);
        }
        if let Some(timeout) = parts.call.timeout {
            builder = builder.timeout(timeout);
        }
        if !parts.call.skip_auth {
            if let Some(token) = self.session.access_token().await {
                builder = builder.bearer_auth(token.as_str());
            }
        }

        builder.send().await
    }

    /// Normalize, report, and log a failure.
    fn fail(&self, failure: Failure, parts: &RequestParts<'_>, request_id: &RequestId) -> ApiError {
        let status = failure.status;
        let error = ApiError::from_failure(failure, request_id.clone());

        let context = ErrorContext {
            method: parts.method.as_str(),
            path: parts.path,
            status,
        };
        self.telemetry.report_error(&error, &context);

        warn!(
            request_id = %request_id,
            code = error.kind.code(),
            status,
            "request failed"
        );

        error
    }
}

/// Whether a transport error means the call produced no HTTP response.
fn is_no_response(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Read the error body of a non-success response into a failure description.
async fn read_failure(response: reqwest::Response) -> Failure {
    let status = response.status().as_u16();

    match response.json::<ErrorBody>().await {
        Ok(body) => Failure::from_response(status, body.code, body.message, body.details),
        Err(_) => Failure::from_response(status, None, None, None),
    }
}

/// Pre-serialize a query or body value; `Null` and empty maps mean "none".
fn encode<T: Serialize>(value: &T) -> ApiResult<Option<serde_json::Value>> {
    let value = serde_json::to_value(value).map_err(|err| {
        ApiError::new(ErrorKind::Validation)
            .with_details(serde_json::json!({ "reason": err.to_string() }))
    })?;

    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::Object(map) if map.is_empty() => None,
        other => Some(other),
    })
}
