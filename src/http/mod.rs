// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP engine for httpbridge
//!
//! Builds requests from structured options, normalizes responses, streams
//! downloads with progress updates, and manages cookies through a
//! `document.cookie`-style jar.

mod body;
mod client;
pub mod codec;
mod cookie;
mod download;
mod form;
mod headers;
mod params;
mod request;
mod response;

pub use body::{build_request_init, RequestBody, RequestInit};
pub use client::{request_url, HttpClient, HttpClientConfig};
pub use cookie::{CookieStore, DocumentCookieJar, DocumentCookies, HttpCookie, SetCookieOptions, EXPIRED_DATE};
pub use download::{
    progress_channel, stream_to_blob, DownloadProgress, ProgressReceiver, ProgressSender, ProgressType,
};
pub use form::{Blob, FormData, FormValue};
pub use headers::{normalize_http_headers, HttpHeaders};
pub use params::{build_url_params, HttpParams, ParamValue};
pub use request::{
    CredentialsMode, DownloadFileOptions, FetchExtra, HttpMethod, RequestData, RequestOptions, ResponseType,
    UploadFileOptions, UploadSource,
};
pub use response::{DownloadFileResult, HttpResponse, ResponseData};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("httpbridge/", env!("CARGO_PKG_VERSION"));
