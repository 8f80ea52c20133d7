// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plugin surface exposed to the application shell
//!
//! [`HttpPlugin`] is the operation set every backend implements. [`WebHttp`]
//! is the in-process fallback engine; a host may supply its own native bridge
//! instead. [`Http::register`] picks one of the two once, at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use httpbridge::plugin::{HostEnvironment, Http, HttpPlugin};
//! use httpbridge::RequestOptions;
//!
//! #[tokio::main]
//! async fn main() -> httpbridge::Result<()> {
//!     let http = Http::register(HostEnvironment::web())?;
//!     let response = http.get(RequestOptions::new("https://example.com")).await?;
//!     println!("{} {}", response.status, response.url);
//!     Ok(())
//! }
//! ```

mod registry;
mod web;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::{
    DownloadFileOptions, DownloadFileResult, HttpCookie, HttpMethod, HttpResponse, ProgressSender,
    RequestOptions, SetCookieOptions, UploadFileOptions,
};

pub use registry::{Backend, HostEnvironment, Http, Platform};
pub use web::WebHttp;

/// Result of `get_cookies`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCookiesResult {
    pub cookies: Vec<HttpCookie>,
}

/// Options for `set_cookie`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetCookieRequest {
    pub key: String,
    pub value: String,
    #[serde(flatten)]
    pub options: SetCookieOptions,
}

impl SetCookieRequest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            options: SetCookieOptions::default(),
        }
    }

    /// Set the cookie attributes
    pub fn options(mut self, options: SetCookieOptions) -> Self {
        self.options = options;
        self
    }
}

/// Operations shared by the native bridge and the fallback engine
#[async_trait]
pub trait HttpPlugin: Send + Sync {
    /// Perform a request described by `options`
    async fn request(&self, options: RequestOptions) -> Result<HttpResponse>;

    async fn get(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.request(options.with_method(HttpMethod::Get)).await
    }

    async fn post(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.request(options.with_method(HttpMethod::Post)).await
    }

    async fn put(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.request(options.with_method(HttpMethod::Put)).await
    }

    async fn patch(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.request(options.with_method(HttpMethod::Patch)).await
    }

    async fn del(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.request(options.with_method(HttpMethod::Delete)).await
    }

    /// Upload one file as a multipart POST
    async fn upload_file(&self, options: UploadFileOptions) -> Result<HttpResponse>;

    /// Download a file; progress updates go to `progress` when requested
    async fn download_file(
        &self,
        options: DownloadFileOptions,
        progress: Option<ProgressSender>,
    ) -> Result<DownloadFileResult>;

    async fn get_cookies(&self) -> Result<GetCookiesResult>;

    async fn get_cookies_map(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .get_cookies()
            .await?
            .cookies
            .into_iter()
            .map(|c| (c.key, c.value))
            .collect())
    }

    async fn get_cookie(&self, key: &str) -> Result<HttpCookie>;

    async fn set_cookie(&self, request: SetCookieRequest) -> Result<()>;

    async fn delete_cookie(&self, key: &str) -> Result<()>;

    async fn clear_cookies(&self) -> Result<()>;

    async fn clear_all_cookies(&self) -> Result<()> {
        self.clear_cookies().await
    }
}
