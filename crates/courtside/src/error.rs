//! Error types for the courtside client.
//!
//! Every failure that crosses the API boundary is normalized into an
//! [`ApiError`] carrying a kind from the closed [`ErrorKind`] taxonomy and a
//! user-displayable message. Callers never see a raw transport error.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::RequestId;

/// The unified error type for courtside operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A normalized API failure from the request pipeline.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input validation errors (invalid URL or identifier format).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Result alias for pipeline and service operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Input validation errors raised by typed constructors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Invalid identifier value.
    #[error("invalid {field} '{value}': {reason}")]
    Identifier {
        field: &'static str,
        value: String,
        reason: String,
    },
}

// ============================================================================
// Error taxonomy
// ============================================================================

/// Closed taxonomy of normalized failure kinds.
///
/// Each kind has a stable wire code and a fixed user-displayable message.
/// Localization layers should key off [`ErrorKind::code`]; the `message`
/// carried by [`ApiError`] is always safe to show as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // Authentication
    AuthInvalidCredentials,
    AuthTokenExpired,
    AuthUnauthorized,
    AuthSessionNotFound,
    // Booking
    BookingNotFound,
    BookingSlotTaken,
    BookingCancelClosed,
    BookingLimitReached,
    // Video
    VideoNotFound,
    VideoTooLarge,
    VideoProcessingFailed,
    // Payment
    PaymentDeclined,
    PaymentRequired,
    // Social
    SocialSelfFollow,
    SocialCommentRejected,
    // Court
    CourtNotFound,
    CourtClosed,
    // Network
    NetworkTimeout,
    NetworkOffline,
    NetworkServerError,
    // Catch-alls
    Validation,
    Unknown,
}

impl ErrorKind {
    /// Every kind in the taxonomy.
    pub const ALL: [ErrorKind; 22] = [
        ErrorKind::AuthInvalidCredentials,
        ErrorKind::AuthTokenExpired,
        ErrorKind::AuthUnauthorized,
        ErrorKind::AuthSessionNotFound,
        ErrorKind::BookingNotFound,
        ErrorKind::BookingSlotTaken,
        ErrorKind::BookingCancelClosed,
        ErrorKind::BookingLimitReached,
        ErrorKind::VideoNotFound,
        ErrorKind::VideoTooLarge,
        ErrorKind::VideoProcessingFailed,
        ErrorKind::PaymentDeclined,
        ErrorKind::PaymentRequired,
        ErrorKind::SocialSelfFollow,
        ErrorKind::SocialCommentRejected,
        ErrorKind::CourtNotFound,
        ErrorKind::CourtClosed,
        ErrorKind::NetworkTimeout,
        ErrorKind::NetworkOffline,
        ErrorKind::NetworkServerError,
        ErrorKind::Validation,
        ErrorKind::Unknown,
    ];

    /// The stable wire code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::AuthInvalidCredentials => "AUTH_INVALID_CREDENTIALS",
            ErrorKind::AuthTokenExpired => "AUTH_TOKEN_EXPIRED",
            ErrorKind::AuthUnauthorized => "AUTH_UNAUTHORIZED",
            ErrorKind::AuthSessionNotFound => "AUTH_SESSION_NOT_FOUND",
            ErrorKind::BookingNotFound => "BOOKING_NOT_FOUND",
            ErrorKind::BookingSlotTaken => "BOOKING_SLOT_TAKEN",
            ErrorKind::BookingCancelClosed => "BOOKING_CANCEL_CLOSED",
            ErrorKind::BookingLimitReached => "BOOKING_LIMIT_REACHED",
            ErrorKind::VideoNotFound => "VIDEO_NOT_FOUND",
            ErrorKind::VideoTooLarge => "VIDEO_TOO_LARGE",
            ErrorKind::VideoProcessingFailed => "VIDEO_PROCESSING_FAILED",
            ErrorKind::PaymentDeclined => "PAYMENT_DECLINED",
            ErrorKind::PaymentRequired => "PAYMENT_REQUIRED",
            ErrorKind::SocialSelfFollow => "SOCIAL_SELF_FOLLOW",
            ErrorKind::SocialCommentRejected => "SOCIAL_COMMENT_REJECTED",
            ErrorKind::CourtNotFound => "COURT_NOT_FOUND",
            ErrorKind::CourtClosed => "COURT_CLOSED",
            ErrorKind::NetworkTimeout => "NETWORK_TIMEOUT",
            ErrorKind::NetworkOffline => "NETWORK_OFFLINE",
            ErrorKind::NetworkServerError => "NETWORK_SERVER_ERROR",
            ErrorKind::Validation => "VALIDATION_FAILED",
            ErrorKind::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// The canonical user-displayable message for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::AuthInvalidCredentials => "Invalid account or password",
            ErrorKind::AuthTokenExpired => "Your session has expired, please sign in again",
            ErrorKind::AuthUnauthorized => "Please sign in to continue",
            ErrorKind::AuthSessionNotFound => "No active session found",
            ErrorKind::BookingNotFound => "We could not find that booking",
            ErrorKind::BookingSlotTaken => "That time slot has just been booked",
            ErrorKind::BookingCancelClosed => "This booking can no longer be cancelled",
            ErrorKind::BookingLimitReached => "You have reached your booking limit",
            ErrorKind::VideoNotFound => "We could not find that clip",
            ErrorKind::VideoTooLarge => "This video is too large to upload",
            ErrorKind::VideoProcessingFailed => "We could not process this video",
            ErrorKind::PaymentDeclined => "Your payment was declined",
            ErrorKind::PaymentRequired => "Payment is required to complete this booking",
            ErrorKind::SocialSelfFollow => "You cannot follow yourself",
            ErrorKind::SocialCommentRejected => "This comment could not be posted",
            ErrorKind::CourtNotFound => "We could not find that court",
            ErrorKind::CourtClosed => "This court is closed at the selected time",
            ErrorKind::NetworkTimeout => "The request timed out, please try again",
            ErrorKind::NetworkOffline => "No network connection, check your signal and retry",
            ErrorKind::NetworkServerError => "The server hit a problem, please try again later",
            ErrorKind::Validation => "Some fields are invalid, please review and retry",
            ErrorKind::Unknown => "Something went wrong, please try again",
        }
    }

    /// Look up a kind by its wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        ErrorKind::ALL.iter().copied().find(|k| k.code() == code)
    }

    /// Whether this kind belongs to the authentication domain.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ErrorKind::AuthInvalidCredentials
                | ErrorKind::AuthTokenExpired
                | ErrorKind::AuthUnauthorized
                | ErrorKind::AuthSessionNotFound
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Normalized API error
// ============================================================================

/// A normalized API failure.
///
/// Created once per failed call, immutable afterwards. `message` is always a
/// non-empty, user-displayable string, never a stack trace.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// The failure kind from the closed taxonomy.
    pub kind: ErrorKind,
    /// User-displayable message.
    pub message: String,
    /// Server-supplied detail payload, if any.
    pub details: Option<serde_json::Value>,
    /// When the failure was normalized.
    pub timestamp: DateTime<Utc>,
    /// Trace identifier of the logical call that failed.
    pub request_id: RequestId,
}

impl ApiError {
    /// Create an error with the kind's canonical message and a fresh
    /// request identifier. Used for failures raised before dispatch.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
            details: None,
            timestamp: Utc::now(),
            request_id: RequestId::generate(),
        }
    }

    /// Attach a detail payload.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Normalize a [`Failure`] description for the given logical call.
    ///
    /// The body message wins over the canonical one only when the body also
    /// carried the code that classification settled on.
    pub(crate) fn from_failure(failure: Failure, request_id: RequestId) -> Self {
        let kind = classify(&failure);
        let message = match (&failure.code, &failure.server_message) {
            (Some(code), Some(message))
                if !message.is_empty() && ErrorKind::from_code(code) == Some(kind) =>
            {
                message.clone()
            }
            _ => kind.message().to_string(),
        };

        Self {
            kind,
            message,
            details: failure.details,
            timestamp: Utc::now(),
            request_id,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.kind.code(), self.message, self.request_id)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// Failure classification
// ============================================================================

/// Typed description of a failed dispatch, before normalization.
#[derive(Debug, Default)]
pub(crate) struct Failure {
    /// The request never produced an HTTP response (connection failure).
    pub connect_error: bool,
    /// The client-side timeout elapsed.
    pub timed_out: bool,
    /// HTTP status, when a response was received.
    pub status: Option<u16>,
    /// Error code carried by the response body.
    pub code: Option<String>,
    /// Message carried by the response body.
    pub server_message: Option<String>,
    /// Detail payload carried by the response body.
    pub details: Option<serde_json::Value>,
    /// Raw transport/decoder error text.
    pub message: String,
}

impl Failure {
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            connect_error: err.is_connect(),
            timed_out: err.is_timeout(),
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn from_response(
        status: u16,
        code: Option<String>,
        server_message: Option<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            status: Some(status),
            code,
            server_message,
            details,
            ..Self::default()
        }
    }
}

/// A single classification rule: a pure function from a failure description
/// to a kind, or `None` when the rule does not apply.
type Rule = fn(&Failure) -> Option<ErrorKind>;

/// Ordered rule list; the first match wins.
const RULES: &[Rule] = &[
    rule_offline,
    rule_timeout,
    rule_unauthorized,
    rule_server_error,
    rule_domain_code,
    rule_expiry_marker,
];

/// Classify a failure into the closed taxonomy.
pub(crate) fn classify(failure: &Failure) -> ErrorKind {
    RULES
        .iter()
        .find_map(|rule| rule(failure))
        .unwrap_or(ErrorKind::Unknown)
}

fn rule_offline(f: &Failure) -> Option<ErrorKind> {
    f.connect_error.then_some(ErrorKind::NetworkOffline)
}

fn rule_timeout(f: &Failure) -> Option<ErrorKind> {
    f.timed_out.then_some(ErrorKind::NetworkTimeout)
}

fn rule_unauthorized(f: &Failure) -> Option<ErrorKind> {
    (f.status == Some(401)).then_some(ErrorKind::AuthUnauthorized)
}

fn rule_server_error(f: &Failure) -> Option<ErrorKind> {
    matches!(f.status, Some(s) if s >= 500).then_some(ErrorKind::NetworkServerError)
}

fn rule_domain_code(f: &Failure) -> Option<ErrorKind> {
    f.code.as_deref().and_then(ErrorKind::from_code)
}

fn rule_expiry_marker(f: &Failure) -> Option<ErrorKind> {
    let marked = |text: &str| {
        let text = text.to_lowercase();
        text.contains("token") && text.contains("expired")
    };
    (f.server_message.as_deref().is_some_and(marked) || marked(&f.message))
        .then_some(ErrorKind::AuthTokenExpired)
}
