//! HTTP client facade

use core::fmt;
use std::sync::{Arc, RwLock};

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::decode::{decode_json, KeyDecoding};
use crate::error::{Error, ErrorResponse, DECODE_FALLBACK_MESSAGE};
use crate::multipart;
use crate::probe::{AlwaysConnected, ConnectivityProbe};
use crate::request::{
    build_json_request, build_upload_request, RequestSpec, TransportRequest, UploadSpec,
};
use crate::response::RawResponse;

/// Configurable entry point issuing JSON and multipart requests against a
/// base endpoint.
///
/// One client per logical endpoint: construct it with a [`ClientConfig`],
/// reuse it for any number of concurrent requests, and [`configure`] it
/// again to repoint it. Each request snapshots the configuration once when
/// it is built, so a request in flight observes either the old or the new
/// configuration in full, never a mix.
///
/// [`configure`]: ApiClient::configure
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
    probe: Arc<dyn ConnectivityProbe>,
}

impl ApiClient {
    /// Create a client that never reports itself offline.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_probe(config, Arc::new(AlwaysConnected))
    }

    /// Create a client consulting `probe` before every request.
    pub fn with_probe(config: ClientConfig, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self {
            http: Client::new(),
            config: Arc::new(RwLock::new(config)),
            probe,
        }
    }

    /// Replace the configuration. Last write wins: later requests observe
    /// the new value in full, with no residue of the old one.
    pub fn configure(&self, config: ClientConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    /// Issue a JSON request and decode the response into `T`.
    pub async fn request<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, Error> {
        if !self.probe.is_connected() {
            return Err(Error::NoConnectivity);
        }
        let config = self.config_snapshot();
        let request = build_json_request(&spec, &config)?;
        self.dispatch(request, spec.key_decoding, config.error_decoder.as_deref())
            .await
    }

    /// Upload form fields and a binary attachment as `multipart/form-data`
    /// and decode the response into `T`.
    pub async fn upload<T: DeserializeOwned>(&self, spec: UploadSpec) -> Result<T, Error> {
        if !self.probe.is_connected() {
            return Err(Error::NoConnectivity);
        }
        let config = self.config_snapshot();
        let boundary = multipart::boundary();
        let request = build_upload_request(&spec, &config, &boundary)?;
        self.dispatch(request, spec.key_decoding, config.error_decoder.as_deref())
            .await
    }

    fn config_snapshot(&self) -> ClientConfig {
        match self.config.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: TransportRequest,
        key_decoding: KeyDecoding,
        error_decoder: Option<&(dyn Fn(&[u8]) -> Option<String> + Send + Sync)>,
    ) -> Result<T, Error> {
        tracing::debug!("{} {}", request.method, request.url);
        let mut builder = self.http.request(request.method.into(), request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|_| Error::Transport("Invalid response".to_string()))?;
        tracing::debug!("response status {status}, {} bytes", body.len());
        handle(&RawResponse::new(status, body.to_vec()), key_decoding, error_decoder)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Classify the response status and decode the body accordingly.
///
/// 2xx decodes into `T`; anything else decodes the error model (or runs
/// the configured error decoder) and falls back to the fixed
/// [`DECODE_FALLBACK_MESSAGE`] when the error body itself is undecodable.
fn handle<T: DeserializeOwned>(
    response: &RawResponse,
    key_decoding: KeyDecoding,
    error_decoder: Option<&(dyn Fn(&[u8]) -> Option<String> + Send + Sync)>,
) -> Result<T, Error> {
    if response.is_success() {
        return decode_json(response.body(), key_decoding).map_err(|err| {
            tracing::warn!("response decode error: {err}");
            Error::DecodeFailure(err.to_string())
        });
    }
    let message = match error_decoder {
        Some(decoder) => decoder(response.body()),
        None => ErrorResponse::from_slice(response.body())
            .ok()
            .and_then(|model| model.first_message().map(str::to_string)),
    };
    Err(Error::Decoded(message.unwrap_or_else(|| {
        tracing::warn!("undecodable error body for status {}", response.status());
        DECODE_FALLBACK_MESSAGE.to_string()
    })))
}
