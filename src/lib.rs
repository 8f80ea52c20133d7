// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # httpbridge - HTTP plugin with an in-process fallback engine
//!
//! A cross-platform HTTP surface for application shells. A host registers once
//! and every call is routed either to its native bridge or to the fallback
//! engine bundled here.
//!
//! ## Features
//!
//! - Structured requests: method, headers, query params, text/JSON/multipart bodies
//! - Response normalization: text, JSON or base64 depending on the response type
//! - Streamed downloads with progress updates over a channel
//! - File uploads from memory or from disk
//! - `document.cookie`-style cookie jar with get/set/delete/clear
//!
//! ## Example
//!
//! ```rust,no_run
//! use httpbridge::{HostEnvironment, Http, HttpPlugin, RequestOptions, ResponseType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let http = Http::register(HostEnvironment::web())?;
//!
//!     let response = http
//!         .get(RequestOptions::new("https://example.com/api").response_type(ResponseType::Json))
//!         .await?;
//!
//!     println!("{} {:?}", response.status, response.data.as_json());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod plugin;

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP engine
pub use http::{HttpClient, HttpClientConfig, DEFAULT_USER_AGENT};

// Requests and responses
pub use http::{
    CredentialsMode, DownloadFileOptions, DownloadFileResult, FetchExtra, HttpHeaders, HttpMethod, HttpParams,
    HttpResponse, ParamValue, RequestData, RequestOptions, ResponseData, ResponseType, UploadFileOptions,
    UploadSource,
};

// Binary values
pub use http::{Blob, FormData, FormValue};

// Downloads
pub use http::{progress_channel, DownloadProgress, ProgressReceiver, ProgressSender, ProgressType};

// Cookies
pub use http::{CookieStore, DocumentCookieJar, DocumentCookies, HttpCookie, SetCookieOptions};

// Plugin
pub use plugin::{Backend, GetCookiesResult, HostEnvironment, Http, HttpPlugin, Platform, SetCookieRequest, WebHttp};

/// httpbridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
