// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Normalized HTTP responses

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

use super::body::APPLICATION_JSON;
use super::form::Blob;
use super::headers::HttpHeaders;
use super::request::ResponseType;
use crate::error::Result;

/// Decoded response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Text(String),
    Json(Value),
    /// Binary body as standard base64, no data-URI prefix
    Base64(String),
}

impl ResponseData {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseData::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_base64(&self) -> Option<&str> {
        match self {
            ResponseData::Base64(s) => Some(s),
            _ => None,
        }
    }
}

/// Response returned by every request operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HttpResponse {
    pub data: ResponseData,
    pub headers: HttpHeaders,
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
}

impl HttpResponse {
    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value, ignoring name casing
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Result of `download_file`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadFileResult {
    pub blob: Blob,
}

/// Pick the decoding for a response.
///
/// Failed responses are read as text whatever the caller asked for, and a
/// JSON content type always wins.
pub fn effective_response_type(
    status: StatusCode,
    content_type: &str,
    declared: Option<ResponseType>,
) -> ResponseType {
    let mut response_type = if status.is_success() {
        declared.unwrap_or_default()
    } else {
        ResponseType::default()
    };
    if content_type.contains(APPLICATION_JSON) {
        response_type = ResponseType::Json;
    }
    response_type
}

/// Decode a fully read body
pub fn decode_body(response_type: ResponseType, body: &[u8]) -> Result<ResponseData> {
    Ok(match response_type {
        ResponseType::Json => ResponseData::Json(serde_json::from_slice(body)?),
        ResponseType::Blob | ResponseType::Arraybuffer => ResponseData::Base64(STANDARD.encode(body)),
        ResponseType::Text | ResponseType::Document => {
            ResponseData::Text(String::from_utf8_lossy(body).into_owned())
        }
    })
}

/// Flatten transport headers into a plain map; the last duplicate wins
pub fn collect_headers(headers: &HeaderMap) -> HttpHeaders {
    let mut output = HttpHeaders::new();
    for (name, value) in headers.iter() {
        output.insert(
            name.as_str().to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_content_type_forces_json() {
        let rt = effective_response_type(
            StatusCode::OK,
            "application/json; charset=utf-8",
            Some(ResponseType::Text),
        );
        assert_eq!(rt, ResponseType::Json);
    }

    #[test]
    fn test_failure_ignores_declared_type() {
        let rt = effective_response_type(StatusCode::NOT_FOUND, "text/html", Some(ResponseType::Json));
        assert_eq!(rt, ResponseType::Text);

        let rt = effective_response_type(StatusCode::OK, "", Some(ResponseType::Blob));
        assert_eq!(rt, ResponseType::Blob);
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(
            decode_body(ResponseType::Json, br#"{"a":1}"#).unwrap(),
            ResponseData::Json(json!({"a": 1}))
        );
        assert_eq!(
            decode_body(ResponseType::Arraybuffer, b"hello").unwrap(),
            ResponseData::Base64("aGVsbG8=".to_string())
        );
        assert_eq!(
            decode_body(ResponseType::Document, b"<p>x</p>").unwrap(),
            ResponseData::Text("<p>x</p>".to_string())
        );
        assert!(decode_body(ResponseType::Json, b"not json").is_err());
    }

    #[test]
    fn test_collect_headers_last_wins() {
        let mut map = HeaderMap::new();
        map.append("x-dup", HeaderValue::from_static("first"));
        map.append("x-dup", HeaderValue::from_static("second"));
        map.insert("content-type", HeaderValue::from_static("text/plain"));

        let headers = collect_headers(&map);
        assert_eq!(headers.get("x-dup").map(String::as_str), Some("second"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_response_serializes_flat() {
        let resp = HttpResponse {
            data: ResponseData::Json(json!({"ok": true})),
            headers: HttpHeaders::new(),
            status: 200,
            url: "https://example.com/".to_string(),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["data"]["ok"], json!(true));
        assert_eq!(value["status"], json!(200));
        assert!(resp.is_success());
        assert_eq!(resp.content_type(), None);
    }
}
