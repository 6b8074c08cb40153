//! Error reporting sink consumed by the request pipeline.

use crate::error::ApiError;

/// Call context attached to an error report.
#[derive(Debug, Clone, Copy)]
pub struct ErrorContext<'a> {
    /// HTTP method of the failed call.
    pub method: &'a str,
    /// Endpoint path of the failed call.
    pub path: &'a str,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
}

/// Receives every normalized failure, exactly once, before it is returned
/// to the caller.
pub trait TelemetrySink: Send + Sync {
    fn report_error(&self, error: &ApiError, context: &ErrorContext<'_>);
}

/// Default sink: emits a structured `error!` event tagged with the error
/// code and request id so failures can be correlated with the pipeline's
/// own log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn report_error(&self, error: &ApiError, context: &ErrorContext<'_>) {
        tracing::error!(
            target: "courtside::telemetry",
            code = error.kind.code(),
            request_id = %error.request_id,
            method = context.method,
            path = context.path,
            status = context.status,
            message = %error.message,
            "api failure"
        );
    }
}

/// Sink that drops every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn report_error(&self, _error: &ApiError, _context: &ErrorContext<'_>) {}
}
