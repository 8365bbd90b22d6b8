//! Generic HTTP client facade
//!
//! A single configured [`ApiClient`] issues JSON and multipart requests
//! against a base endpoint, decodes typed responses, and normalizes
//! transport and decoding failures into the small [`Error`] taxonomy.
//! Reachability probing, payload logging, and process bootstrapping are
//! collaborators consumed through narrow interfaces, not implemented here.
//!
//! # Example
//!
//! ```no_run
//! use apicall::{ApiClient, ClientConfig, HttpMethod, RequestSpec};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     user_name: String,
//! }
//!
//! async fn example() -> Result<User, apicall::Error> {
//!     let config = ClientConfig::new("https://api.example.com")?
//!         .default_header("Authorization", "Bearer token");
//!     let client = ApiClient::new(config);
//!     client.request(RequestSpec::new(HttpMethod::Get, "/me")).await
//! }
//! ```

mod client;
mod config;
mod decode;
mod error;
mod method;
mod multipart;
mod probe;
mod request;
mod response;

pub use client::ApiClient;
pub use config::{ClientConfig, ErrorDecoder};
pub use decode::KeyDecoding;
pub use error::{Error, ErrorDetail, ErrorResponse, DECODE_FALLBACK_MESSAGE};
pub use method::HttpMethod;
pub use probe::{AlwaysConnected, ConnectivityProbe};
pub use request::{Params, RequestSpec, UploadSpec};
pub use response::RawResponse;
