// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport-ready request bodies built from request options

use serde_json::Value;
use url::form_urlencoded;

use super::form::{FormData, FormValue};
use super::headers::{normalize_http_headers, remove_header, HttpHeaders};
use super::params::scalar_text;
use super::request::{CredentialsMode, FetchExtra, HttpMethod, RequestData, RequestOptions};
use crate::error::Result;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub const APPLICATION_JSON: &str = "application/json";

/// Outgoing body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Text(String),
    Multipart(FormData),
}

impl RequestBody {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RequestBody::Text(s) => Some(s),
            RequestBody::Multipart(_) => None,
        }
    }
}

/// Everything the transport needs apart from the URL
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInit {
    pub method: HttpMethod,
    /// Caller headers with their original casing
    pub headers: HttpHeaders,
    pub body: Option<RequestBody>,
    pub referrer: Option<String>,
    pub credentials: CredentialsMode,
}

/// Build the method, headers, and body for a request.
///
/// The body encoding follows the caller's content type:
/// string data passes through, url-encoded and multipart types build forms,
/// and JSON (or any other structured data) is serialized. Multipart bodies
/// drop the caller's content-type so the transport can add its boundary.
pub fn build_request_init(options: &RequestOptions, extra: Option<&FetchExtra>) -> Result<RequestInit> {
    let mut init = RequestInit {
        method: options.method.unwrap_or_default(),
        headers: options.headers.clone().unwrap_or_default(),
        body: None,
        referrer: None,
        credentials: CredentialsMode::default(),
    };

    if let Some(extra) = extra {
        if let Some(method) = extra.method {
            init.method = method;
        }
        if let Some(ref headers) = extra.headers {
            init.headers = headers.clone();
        }
        init.referrer = extra.referrer.clone();
        init.credentials = extra.credentials.unwrap_or_default();
    }

    let normalized = normalize_http_headers(options.headers.as_ref());
    let content_type = normalized.get("content-type").map(String::as_str).unwrap_or("");

    init.body = match options.data {
        Some(RequestData::Text(ref text)) => Some(RequestBody::Text(text.clone())),
        ref data if content_type.contains(FORM_URLENCODED) => {
            Some(RequestBody::Text(url_encoded_body(data.as_ref())))
        }
        ref data if content_type.contains(MULTIPART_FORM_DATA) => {
            remove_header(&mut init.headers, "content-type");
            Some(RequestBody::Multipart(multipart_body(data.as_ref())))
        }
        Some(RequestData::Form(ref form)) => {
            remove_header(&mut init.headers, "content-type");
            Some(RequestBody::Multipart(form.clone()))
        }
        Some(RequestData::Json(ref value)) => Some(RequestBody::Text(serde_json::to_string(value)?)),
        None => None,
    };

    Ok(init)
}

fn url_encoded_body(data: Option<&RequestData>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    match data {
        Some(RequestData::Json(Value::Object(map))) => {
            for (key, value) in map {
                serializer.append_pair(key, &scalar_text(value.clone()));
            }
        }
        Some(RequestData::Form(form)) => {
            for (key, value) in form.iter() {
                if let FormValue::Text(text) = value {
                    serializer.append_pair(key, text);
                }
            }
        }
        _ => {}
    }
    serializer.finish()
}

fn multipart_body(data: Option<&RequestData>) -> FormData {
    match data {
        Some(RequestData::Form(form)) => form.clone(),
        Some(RequestData::Json(Value::Object(map))) => {
            map.iter().fold(FormData::new(), |form, (key, value)| {
                form.with(key.clone(), scalar_text(value.clone()))
            })
        }
        _ => FormData::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::form::Blob;

    #[test]
    fn test_json_body_for_post() {
        let opts = RequestOptions::new("https://example.com")
            .method(HttpMethod::Post)
            .header("Content-Type", "application/json")
            .json(json!({"x": 1}));

        let init = build_request_init(&opts, None).unwrap();
        assert_eq!(init.method, HttpMethod::Post);
        assert_eq!(init.body.as_ref().and_then(RequestBody::as_text), Some(r#"{"x":1}"#));
        assert_eq!(
            init.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_string_passes_through() {
        let opts = RequestOptions::new("https://example.com")
            .header("content-type", "application/json")
            .data("already-encoded");
        let init = build_request_init(&opts, None).unwrap();
        assert_eq!(init.body, Some(RequestBody::Text("already-encoded".to_string())));
    }

    #[test]
    fn test_url_encoded_form() {
        let opts = RequestOptions::new("https://example.com")
            .header("Content-Type", "application/x-www-form-urlencoded; charset=UTF-8")
            .json(json!({"name": "a b", "n": 2, "ok": true}));
        let init = build_request_init(&opts, None).unwrap();
        assert_eq!(
            init.body.as_ref().and_then(RequestBody::as_text),
            Some("name=a+b&n=2&ok=true")
        );
    }

    #[test]
    fn test_multipart_drops_content_type() {
        let form = FormData::new().with("file", Blob::new(&b"binary"[..]));
        let opts = RequestOptions::new("https://example.com")
            .header("content-type", "multipart/form-data")
            .header("X-Keep", "yes")
            .data(form.clone());

        let init = build_request_init(&opts, None).unwrap();
        assert!(!init.headers.keys().any(|k| k.eq_ignore_ascii_case("content-type")));
        assert!(init.headers.contains_key("X-Keep"));
        assert_eq!(init.body, Some(RequestBody::Multipart(form)));
    }

    #[test]
    fn test_multipart_from_mapping() {
        let opts = RequestOptions::new("https://example.com")
            .header("Content-Type", "multipart/form-data")
            .json(json!({"a": "1", "b": 2}));
        let init = build_request_init(&opts, None).unwrap();
        let expected = FormData::new().with("a", "1").with("b", "2");
        assert_eq!(init.body, Some(RequestBody::Multipart(expected)));
    }

    #[test]
    fn test_structured_data_without_content_type_is_json() {
        let opts = RequestOptions::new("https://example.com").json(json!([1, 2]));
        let init = build_request_init(&opts, None).unwrap();
        assert_eq!(init.body.as_ref().and_then(RequestBody::as_text), Some("[1,2]"));
    }

    #[test]
    fn test_no_data_no_body() {
        let init = build_request_init(&RequestOptions::new("https://example.com"), None).unwrap();
        assert_eq!(init.method, HttpMethod::Get);
        assert!(init.body.is_none());
        assert!(init.headers.is_empty());
    }

    #[test]
    fn test_extra_overlays_method_and_headers() {
        let opts = RequestOptions::new("https://example.com")
            .header("Content-Type", "application/json")
            .json(json!({"x": 1}));
        let extra = FetchExtra {
            method: Some(HttpMethod::Put),
            headers: Some([("X-Only".to_string(), "1".to_string())].into_iter().collect()),
            referrer: Some("https://shell.local/".to_string()),
            credentials: Some(CredentialsMode::Omit),
        };

        let init = build_request_init(&opts, Some(&extra)).unwrap();
        assert_eq!(init.method, HttpMethod::Put);
        assert_eq!(init.headers.len(), 1);
        assert_eq!(init.credentials, CredentialsMode::Omit);
        // content type still comes from the caller's own headers
        assert_eq!(init.body.as_ref().and_then(RequestBody::as_text), Some(r#"{"x":1}"#));
    }
}
