//! Unified SDK error types.
//!
//! Every failure is returned as a plain value: the types here are `Clone` and
//! `PartialEq` so callers (and tests) can compare them structurally.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    /// Client configuration rejected at build time.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request could not be encoded (body serialization, bad URL).
    /// Never reaches the network.
    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A 200 response whose body did not match the expected shape.
    #[error("Decode error (status {status}): {message}")]
    Decode {
        status: u16,
        body: String,
        message: String,
    },

    /// Non-200 response from the API.
    #[error("API error {}: {}", .0.status, .0)]
    Api(#[from] ApiError),
}

impl SdkError {
    /// Returns the classified API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            SdkError::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the failure was caused by the caller cancelling the context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SdkError::Transport(TransportError::Cancelled))
    }

    /// Whether a caller-driven retry has a chance of succeeding.
    ///
    /// True for temporary API errors and for transport failures other than
    /// cancellation. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Api(e) => e.is_temporary(),
            SdkError::Transport(TransportError::Cancelled) => false,
            SdkError::Transport(_) => true,
            _ => false,
        }
    }
}

/// Network-level failures. Nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Operation cancelled")]
    Cancelled,

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

/// Semantic category of a non-200 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Request accepted but waits for an approval (202).
    #[serde(rename = "requires_approval")]
    RequiresApproval,
    /// Invalid request parameters (400).
    #[serde(rename = "invalid_request_error")]
    InvalidRequest,
    /// Missing or rejected credentials (401, 403).
    #[serde(rename = "authentication_error")]
    Authentication,
    /// Resource not found (404).
    #[serde(rename = "not_found")]
    NotFound,
    /// Too many requests hit the API too quickly (429).
    #[serde(rename = "rate_limit_error")]
    RateLimit,
    /// Temporary problem on the API side; everything else, 5xx included.
    #[serde(rename = "api_error")]
    Api,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RequiresApproval => "requires_approval",
            ErrorKind::InvalidRequest => "invalid_request_error",
            ErrorKind::Authentication => "authentication_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit_error",
            ErrorKind::Api => "api_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an HTTP status code to an [`ErrorKind`]. Total over all codes.
pub fn classify(status: u16) -> ErrorKind {
    match status {
        202 => ErrorKind::RequiresApproval,
        400 => ErrorKind::InvalidRequest,
        401 | 403 => ErrorKind::Authentication,
        404 => ErrorKind::NotFound,
        429 => ErrorKind::RateLimit,
        _ => ErrorKind::Api,
    }
}

/// The response returned when a call is unsuccessful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub status: u16,
    /// Raw response body exactly as the server sent it.
    pub body: String,
    /// Decoded `error` field, empty when the body is not a JSON object.
    pub message: String,
    /// Decoded `requestId` field, empty when absent.
    pub request_id: String,
}

/// Fields decoded from an error body. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "requestId")]
    request_id: Option<String>,
}

impl ApiError {
    /// Build a classified error from a non-200 status and its raw body.
    ///
    /// Body decoding is lenient: malformed or non-JSON bodies leave
    /// `message` and `request_id` empty but never change `kind`.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let decoded = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default();
        Self {
            kind: classify(status),
            status,
            message: decoded.error.unwrap_or_default(),
            request_id: decoded.request_id.unwrap_or_default(),
            body,
        }
    }

    pub fn is_approval_required(&self) -> bool {
        self.kind == ErrorKind::RequiresApproval
    }

    pub fn is_invalid_request(&self) -> bool {
        self.kind == ErrorKind::InvalidRequest
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_rate_limited(&self) -> bool {
        self.kind == ErrorKind::RateLimit
    }

    /// Temporary API error (5xx and anything unexpected).
    pub fn is_temporary(&self) -> bool {
        self.kind == ErrorKind::Api
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}
