//! Error types and the server error model

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message produced when a non-success body cannot be decoded as
/// [`ErrorResponse`].
///
/// The nested decode failure is intentionally collapsed to this fixed text
/// instead of being propagated.
pub const DECODE_FALLBACK_MESSAGE: &str = "Error decoding JSON";

/// Errors produced by the request and upload pipelines
#[derive(Debug, Error)]
pub enum Error {
    /// The connectivity probe reported offline; nothing was sent
    #[error("No internet connection")]
    NoConnectivity,
    /// The base URL joined with the request path is not a well-formed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Rejected configuration or parameter value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// The transport failed or the response could not be read
    #[error("Transport error: {0}")]
    Transport(String),
    /// Non-success status with a server-supplied or fallback message
    #[error("{0}")]
    Decoded(String),
    /// Success status but the body did not match the expected type
    #[error("Error decoding response: {0}")]
    DecodeFailure(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

/// Server error payload: an ordered list of messages
///
/// Decoded only on non-success responses; the first entry's message becomes
/// the domain error text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error entries in server order
    pub errors: Vec<ErrorDetail>,
}

/// Single entry of an [`ErrorResponse`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human readable description
    pub message: String,
}

impl ErrorResponse {
    /// Decode an error response from raw body bytes.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// First message in server order, if any.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|detail| detail.message.as_str())
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_message() {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "no error detail"),
        }
    }
}
