//! The uniform result envelope.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Serializable form of a pipeline result: exactly one of a payload or a
/// user-displayable error message, never both and never neither.
///
/// Within the crate the contract is `Result<T, ApiError>`; this type exists
/// for callers that hand results across a JSON boundary (IPC, caching, log
/// capture) and need the wire shape to stay uniform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wrap a successful payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wrap a failure message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert back into a payload or the error message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, error) => Err(error.unwrap_or_else(|| "missing payload".to_string())),
        }
    }
}

impl<T> From<Result<T, ApiError>> for ApiEnvelope<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(err.message),
        }
    }
}
