/// Error handling for the MeeTask client
///
/// This module provides the unified error type returned by every fallible
/// client operation. Failures are scoped to the screen that triggered
/// them; nothing here is fatal to the process.
///
/// # Taxonomy
///
/// - `Validation`: client-side form schema rejected the input, nothing
///   was sent over the wire
/// - `Unauthenticated`: HTTP 401, the caller should navigate to login
/// - `Api`: the server rejected the request (other 4xx/5xx)
/// - `Transport`: the network call itself failed
/// - `Decode`: the response body did not match the expected shape
/// - `Busy`: the screen's primary action was already in flight
///
/// The type is `Clone` so a failed fetch can be shared with every caller
/// that joined the same deduplicated request.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified client error type
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Form input rejected before submission; no request was sent
    #[error("validation failed: {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Session is missing or expired; caller should redirect to login
    #[error("not authenticated")]
    Unauthenticated,

    /// Server rejected the request (4xx/5xx other than 401)
    #[error("server rejected request ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,

        /// Server-provided message, empty when the body carried none
        message: String,
    },

    /// Network/transport failure before a response arrived
    #[error("network error: {0}")]
    Transport(String),

    /// Response arrived but could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),

    /// The screen's primary action is already awaiting a response
    #[error("a submission is already in flight")]
    Busy,
}

/// One field that failed client-side validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl ClientError {
    /// Whether this is a transport-level failure (eligible for the single
    /// read retry)
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Whether the caller should navigate to the login entry
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Unauthenticated)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                fields.push(FieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        ClientError::Validation(fields)
    }
}
