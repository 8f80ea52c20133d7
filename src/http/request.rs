// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request options as passed in by the shell or a bridge

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use super::form::{Blob, FormData};
use super::headers::HttpHeaders;
use super::params::HttpParams;
use crate::error::{Error, Result};

/// HTTP method accepted by the plugin; parsed case-insensitively like `fetch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ]
        .into_iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| Error::other(format!("Unsupported HTTP method: {}", s)))
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// How the response body should be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    #[default]
    Text,
    Json,
    Blob,
    Arraybuffer,
    Document,
}

/// Credentials mode for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    /// Send jar cookies scoped to the request host
    #[default]
    SameOrigin,
    /// Same as `SameOrigin`; the engine has no page origin to cross
    Include,
    /// Never send or store cookies
    Omit,
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RequestData {
    /// Sent verbatim
    Text(String),
    /// Structured value; encoding depends on the content type
    Json(Value),
    /// Multipart entries
    Form(FormData),
}

impl From<Value> for RequestData {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => RequestData::Text(s),
            other => RequestData::Json(other),
        }
    }
}

impl From<&str> for RequestData {
    fn from(s: &str) -> Self {
        RequestData::Text(s.to_string())
    }
}

impl From<String> for RequestData {
    fn from(s: String) -> Self {
        RequestData::Text(s)
    }
}

impl From<FormData> for RequestData {
    fn from(form: FormData) -> Self {
        RequestData::Form(form)
    }
}

/// Extra transport options overlaid on top of `{method, headers}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchExtra {
    pub method: Option<HttpMethod>,
    /// Replaces the request headers entirely when present
    pub headers: Option<HttpHeaders>,
    pub referrer: Option<String>,
    pub credentials: Option<CredentialsMode>,
}

/// Options for a single request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    pub url: String,
    #[serde(default)]
    pub method: Option<HttpMethod>,
    #[serde(default)]
    pub headers: Option<HttpHeaders>,
    #[serde(default)]
    pub params: Option<HttpParams>,
    #[serde(default)]
    pub data: Option<RequestData>,
    #[serde(default)]
    pub response_type: Option<ResponseType>,
    /// Percent-encode parameter values (default true)
    #[serde(default)]
    pub should_encode_url_params: Option<bool>,
    #[serde(default)]
    pub web_fetch_extra: Option<FetchExtra>,
}

impl RequestOptions {
    /// Create options for `url` with every other field defaulted
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the method
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HttpHeaders::new)
            .insert(name.into(), value.into());
        self
    }

    /// Set the query parameters
    pub fn params(mut self, params: HttpParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Set the payload
    pub fn data(mut self, data: impl Into<RequestData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set a JSON payload
    pub fn json(mut self, value: Value) -> Self {
        self.data = Some(RequestData::Json(value));
        self
    }

    /// Set the response type
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Send parameter values without percent-encoding
    pub fn raw_url_params(mut self) -> Self {
        self.should_encode_url_params = Some(false);
        self
    }

    /// Set extra transport options
    pub fn fetch_extra(mut self, extra: FetchExtra) -> Self {
        self.web_fetch_extra = Some(extra);
        self
    }

    /// Copy of these options with the method pinned
    pub fn with_method(&self, method: HttpMethod) -> Self {
        let mut options = self.clone();
        options.method = Some(method);
        options
    }
}

/// Options for `download_file`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadFileOptions {
    #[serde(flatten)]
    pub request: RequestOptions,
    /// Stream the body and report progress
    #[serde(default)]
    pub progress: bool,
}

impl DownloadFileOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            request: RequestOptions::new(url),
            progress: false,
        }
    }

    /// Enable progress reporting
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Where an upload's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Blob(Blob),
    Path(PathBuf),
}

/// Options for `upload_file`
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFileOptions {
    pub request: RequestOptions,
    /// Multipart field name
    pub name: String,
    pub file: UploadSource,
}

impl UploadFileOptions {
    pub fn new(url: impl Into<String>, name: impl Into<String>, file: UploadSource) -> Self {
        Self {
            request: RequestOptions::new(url),
            name: name.into(),
            file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = RequestOptions::new("https://example.com");
        assert_eq!(opts.method, None);
        assert_eq!(opts.response_type, None);
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
        assert_eq!(ResponseType::default(), ResponseType::Text);
    }

    #[test]
    fn test_deserialize_bridge_payload() {
        let opts: RequestOptions = serde_json::from_str(
            r#"{
                "url": "https://example.com/api",
                "method": "PATCH",
                "headers": {"Content-Type": "application/json"},
                "params": {"q": "x"},
                "data": {"x": 1},
                "responseType": "arraybuffer",
                "shouldEncodeUrlParams": false,
                "webFetchExtra": {"credentials": "omit"}
            }"#,
        )
        .unwrap();

        assert_eq!(opts.method, Some(HttpMethod::Patch));
        assert_eq!(opts.response_type, Some(ResponseType::Arraybuffer));
        assert_eq!(opts.data, Some(RequestData::Json(serde_json::json!({"x": 1}))));
        assert_eq!(opts.should_encode_url_params, Some(false));
        assert_eq!(
            opts.web_fetch_extra.and_then(|e| e.credentials),
            Some(CredentialsMode::Omit)
        );
    }

    #[test]
    fn test_string_data_is_text() {
        let opts: RequestOptions =
            serde_json::from_str(r#"{"url": "https://example.com", "data": "raw"}"#).unwrap();
        assert_eq!(opts.data, Some(RequestData::Text("raw".to_string())));
    }

    #[test]
    fn test_download_options_flatten() {
        let opts: DownloadFileOptions =
            serde_json::from_str(r#"{"url": "https://example.com/f.bin", "progress": true}"#)
                .unwrap();
        assert!(opts.progress);
        assert_eq!(opts.request.url, "https://example.com/f.bin");
    }

    #[test]
    fn test_with_method_pins_copy() {
        let opts = RequestOptions::new("https://example.com").method(HttpMethod::Get);
        let pinned = opts.with_method(HttpMethod::Delete);
        assert_eq!(pinned.method, Some(HttpMethod::Delete));
        assert_eq!(opts.method, Some(HttpMethod::Get));
    }

    #[test]
    fn test_method_is_case_insensitive() {
        for (raw, expected) in [
            ("\"get\"", HttpMethod::Get),
            ("\"Post\"", HttpMethod::Post),
            ("\"DELETE\"", HttpMethod::Delete),
            ("\"pAtCh\"", HttpMethod::Patch),
        ] {
            assert_eq!(serde_json::from_str::<HttpMethod>(raw).unwrap(), expected);
        }
        assert!(serde_json::from_str::<HttpMethod>("\"TRACE\"").is_err());

        let opts: RequestOptions =
            serde_json::from_str(r#"{"url": "https://example.com", "method": "put"}"#).unwrap();
        assert_eq!(opts.method, Some(HttpMethod::Put));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(Method::from(HttpMethod::Patch), Method::PATCH);
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
