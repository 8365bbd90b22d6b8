//! Request specifications and transport request assembly

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::decode::KeyDecoding;
use crate::error::Error;
use crate::method::HttpMethod;
use crate::multipart;

/// JSON object parameters for a request body.
///
/// Values are restricted to strings, numbers, booleans, and nested maps of
/// the same; other kinds are rejected at insertion instead of failing at
/// serialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Params(serde_json::Map<String, Value>);

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair.
    ///
    /// Returns [`Error::InvalidConfig`] for null or array values at any
    /// nesting depth.
    pub fn insert(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, Error> {
        let value = value.into();
        validate_value(&value)?;
        self.0.insert(key.into(), value);
        Ok(self)
    }

    /// Whether no parameters have been inserted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn validate_value(value: &Value) -> Result<(), Error> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(()),
        Value::Object(map) => {
            for nested in map.values() {
                validate_value(nested)?;
            }
            Ok(())
        }
        Value::Null => Err(Error::InvalidConfig(
            "null parameter values are not supported".to_string(),
        )),
        Value::Array(_) => Err(Error::InvalidConfig(
            "array parameter values are not supported".to_string(),
        )),
    }
}

/// Specification of a JSON request, built per call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) base_url_override: Option<String>,
    pub(crate) params: Option<Params>,
    pub(crate) key_decoding: KeyDecoding,
}

impl RequestSpec {
    /// Request `path` with `method` against the configured base endpoint.
    ///
    /// The path is appended to the base URL verbatim; call sites supply
    /// correctly joined paths.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            base_url_override: None,
            params: None,
            key_decoding: KeyDecoding::default(),
        }
    }

    /// Use `base_url` for this request instead of the configured one.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Attach a JSON body.
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Override the response key-translation strategy.
    pub fn key_decoding(mut self, key_decoding: KeyDecoding) -> Self {
        self.key_decoding = key_decoding;
        self
    }
}

/// Specification of a multipart upload, built per call.
#[derive(Debug, Clone)]
pub struct UploadSpec {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) image_bytes: Vec<u8>,
    pub(crate) form_fields: Vec<(String, String)>,
    pub(crate) attachment_field_name: String,
    pub(crate) key_decoding: KeyDecoding,
}

impl UploadSpec {
    /// Upload `image_bytes` to `path`, naming the attachment part
    /// `attachment_field_name`.
    pub fn new(
        method: HttpMethod,
        path: impl Into<String>,
        image_bytes: Vec<u8>,
        attachment_field_name: impl Into<String>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            image_bytes,
            form_fields: Vec::new(),
            attachment_field_name: attachment_field_name.into(),
            key_decoding: KeyDecoding::default(),
        }
    }

    /// Add a text form field. Fields are encoded in insertion order.
    pub fn form_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_fields.push((name.into(), value.into()));
        self
    }

    /// Override the response key-translation strategy.
    pub fn key_decoding(mut self, key_decoding: KeyDecoding) -> Self {
        self.key_decoding = key_decoding;
        self
    }
}

/// Assembled transport request, ready to hand to the HTTP layer.
#[derive(Debug)]
pub(crate) struct TransportRequest {
    pub(crate) method: HttpMethod,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Vec<u8>>,
}

/// Assemble a JSON request from `spec` and `config`.
pub(crate) fn build_json_request(
    spec: &RequestSpec,
    config: &ClientConfig,
) -> Result<TransportRequest, Error> {
    let base = spec.base_url_override.as_deref().unwrap_or(&config.base_url);
    let url = Url::parse(&format!("{}{}", base, spec.path))?;
    // A params map that fails to serialize yields a request with no body
    let body = spec
        .params
        .as_ref()
        .and_then(|params| serde_json::to_vec(params).ok());
    Ok(TransportRequest {
        method: spec.method,
        url,
        headers: merge_headers(&config.default_headers, "application/json"),
        body,
    })
}

/// Assemble a multipart upload request from `spec` and `config`.
pub(crate) fn build_upload_request(
    spec: &UploadSpec,
    config: &ClientConfig,
    boundary: &str,
) -> Result<TransportRequest, Error> {
    let url = Url::parse(&format!("{}{}", config.base_url, spec.path))?;
    let body = multipart::encode(
        &spec.form_fields,
        &spec.image_bytes,
        &spec.attachment_field_name,
        boundary,
    );
    Ok(TransportRequest {
        method: spec.method,
        url,
        headers: merge_headers(
            &config.default_headers,
            &format!("multipart/form-data; boundary={boundary}"),
        ),
        body: Some(body),
    })
}

/// Default headers with the forced `Content-Type`; the forced value wins
/// over any caller-supplied default on key collision.
fn merge_headers(defaults: &[(String, String)], content_type: &str) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = defaults
        .iter()
        .filter(|(key, _)| !key.eq_ignore_ascii_case("content-type"))
        .cloned()
        .collect();
    headers.push(("Content-Type".to_string(), content_type.to_string()));
    headers
}
