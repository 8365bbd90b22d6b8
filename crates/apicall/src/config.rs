//! Client configuration

use core::fmt;
use std::sync::Arc;

use crate::error::Error;

/// Extracts a human readable message from a non-success response body.
///
/// Configured once per client. When absent, the built-in
/// [`ErrorResponse`](crate::ErrorResponse) shape is decoded instead.
pub type ErrorDecoder = Arc<dyn Fn(&[u8]) -> Option<String> + Send + Sync>;

/// Configuration for an [`ApiClient`](crate::ApiClient): base endpoint,
/// default headers, and an optional custom error-body decoder.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) default_headers: Vec<(String, String)>,
    pub(crate) error_decoder: Option<ErrorDecoder>,
}

impl ClientConfig {
    /// Create a configuration for the given base endpoint.
    ///
    /// The base URL must be non-empty. It is not otherwise validated here;
    /// malformed values surface as [`Error::InvalidUrl`] when a request is
    /// built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(Error::InvalidConfig(
                "base URL must not be empty".to_string(),
            ));
        }
        Ok(Self {
            base_url,
            default_headers: Vec::new(),
            error_decoder: None,
        })
    }

    /// Add a default header sent with every request.
    ///
    /// `Content-Type` is always forced by the pipeline and wins over any
    /// default supplied here.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// Install a custom decoder for non-success response bodies.
    pub fn error_decoder(mut self, decoder: ErrorDecoder) -> Self {
        self.error_decoder = Some(decoder);
        self
    }

    /// The configured base endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("error_decoder", &self.error_decoder.as_ref().map(|_| ".."))
            .finish()
    }
}
