// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Backend selection at registration time

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::{GetCookiesResult, HttpPlugin, SetCookieRequest, WebHttp};
use crate::error::Result;
use crate::http::{
    DownloadFileOptions, DownloadFileResult, HttpClientConfig, HttpCookie, HttpResponse, ProgressSender,
    RequestOptions, UploadFileOptions,
};

/// Host platform the shell runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Electron,
    Android,
    Ios,
}

impl Platform {
    /// Platforms whose shell can host a native bridge
    pub fn supports_native(&self) -> bool {
        matches!(self, Platform::Android | Platform::Ios)
    }
}

/// What the host offers at startup
#[derive(Clone)]
pub struct HostEnvironment {
    pub platform: Platform,
    /// Native implementation, when the host ships one
    pub native: Option<Arc<dyn HttpPlugin>>,
    /// Configuration for the fallback engine
    pub config: HttpClientConfig,
}

impl HostEnvironment {
    /// Browser-like host without a native bridge
    pub fn web() -> Self {
        Self {
            platform: Platform::Web,
            native: None,
            config: HttpClientConfig::default(),
        }
    }

    /// Host on `platform` with an optional native bridge
    pub fn new(platform: Platform, native: Option<Arc<dyn HttpPlugin>>) -> Self {
        Self {
            platform,
            native,
            config: HttpClientConfig::default(),
        }
    }

    /// Set the fallback engine configuration
    pub fn config(mut self, config: HttpClientConfig) -> Self {
        self.config = config;
        self
    }
}

/// The implementation chosen for this process
#[derive(Clone)]
pub enum Backend {
    Native(Arc<dyn HttpPlugin>),
    Fallback(WebHttp),
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Native(_) => f.write_str("Native"),
            Backend::Fallback(_) => f.write_str("Fallback"),
        }
    }
}

/// Registered HTTP plugin; every call goes to the backend chosen at startup
#[derive(Clone, Debug)]
pub struct Http {
    backend: Backend,
}

impl Http {
    /// Choose the backend for `host`.
    ///
    /// Web and Electron hosts always use the fallback engine. Native
    /// platforms use their bridge when one was supplied.
    pub fn register(host: HostEnvironment) -> Result<Self> {
        let backend = match (host.platform.supports_native(), host.native) {
            (true, Some(native)) => Backend::Native(native),
            (true, None) => {
                tracing::warn!(platform = ?host.platform, "No native bridge supplied, using fallback engine");
                Backend::Fallback(WebHttp::with_config(host.config)?)
            }
            (false, _) => Backend::Fallback(WebHttp::with_config(host.config)?),
        };

        tracing::info!(platform = ?host.platform, backend = ?backend, "Http plugin registered");
        Ok(Self { backend })
    }

    /// Wrap an explicit backend
    pub fn with_backend(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn is_native(&self) -> bool {
        matches!(self.backend, Backend::Native(_))
    }

    fn target(&self) -> &dyn HttpPlugin {
        match self.backend {
            Backend::Native(ref native) => native.as_ref(),
            Backend::Fallback(ref web) => web,
        }
    }
}

#[async_trait]
impl HttpPlugin for Http {
    async fn request(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.target().request(options).await
    }

    async fn get(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.target().get(options).await
    }

    async fn post(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.target().post(options).await
    }

    async fn put(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.target().put(options).await
    }

    async fn patch(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.target().patch(options).await
    }

    async fn del(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.target().del(options).await
    }

    async fn upload_file(&self, options: UploadFileOptions) -> Result<HttpResponse> {
        self.target().upload_file(options).await
    }

    async fn download_file(
        &self,
        options: DownloadFileOptions,
        progress: Option<ProgressSender>,
    ) -> Result<DownloadFileResult> {
        self.target().download_file(options, progress).await
    }

    async fn get_cookies(&self) -> Result<GetCookiesResult> {
        self.target().get_cookies().await
    }

    async fn get_cookies_map(&self) -> Result<HashMap<String, String>> {
        self.target().get_cookies_map().await
    }

    async fn get_cookie(&self, key: &str) -> Result<HttpCookie> {
        self.target().get_cookie(key).await
    }

    async fn set_cookie(&self, request: SetCookieRequest) -> Result<()> {
        self.target().set_cookie(request).await
    }

    async fn delete_cookie(&self, key: &str) -> Result<()> {
        self.target().delete_cookie(key).await
    }

    async fn clear_cookies(&self) -> Result<()> {
        self.target().clear_cookies().await
    }

    async fn clear_all_cookies(&self) -> Result<()> {
        self.target().clear_all_cookies().await
    }
}
