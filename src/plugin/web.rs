// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-process fallback engine

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{GetCookiesResult, HttpPlugin, SetCookieRequest};
use crate::error::Result;
use crate::http::{
    CookieStore, DownloadFileOptions, DownloadFileResult, HttpClient, HttpClientConfig, HttpCookie,
    HttpResponse, ProgressSender, RequestOptions, UploadFileOptions,
};

/// Fallback implementation used when the host has no native bridge
#[derive(Clone)]
pub struct WebHttp {
    client: HttpClient,
}

impl WebHttp {
    /// Engine with default configuration and its own cookie jar
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
        })
    }

    /// Engine with a custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_config(config)?,
        })
    }

    /// Engine sharing an existing cookie jar
    pub fn with_cookie_store(config: HttpClientConfig, store: Arc<dyn CookieStore>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_cookie_store(config, store)?,
        })
    }

    /// Underlying client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

#[async_trait]
impl HttpPlugin for WebHttp {
    async fn request(&self, options: RequestOptions) -> Result<HttpResponse> {
        self.client.request(&options).await
    }

    async fn upload_file(&self, options: UploadFileOptions) -> Result<HttpResponse> {
        self.client.upload_file(&options).await
    }

    async fn download_file(
        &self,
        options: DownloadFileOptions,
        progress: Option<ProgressSender>,
    ) -> Result<DownloadFileResult> {
        self.client.download_file(&options, progress).await
    }

    async fn get_cookies(&self) -> Result<GetCookiesResult> {
        Ok(GetCookiesResult {
            cookies: self.client.cookies().get_cookies(),
        })
    }

    async fn get_cookies_map(&self) -> Result<HashMap<String, String>> {
        Ok(self.client.cookies().get_cookies_map())
    }

    async fn get_cookie(&self, key: &str) -> Result<HttpCookie> {
        Ok(self.client.cookies().get_cookie(key))
    }

    async fn set_cookie(&self, request: SetCookieRequest) -> Result<()> {
        self.client
            .cookies()
            .set_cookie(&request.key, &request.value, &request.options);
        Ok(())
    }

    async fn delete_cookie(&self, key: &str) -> Result<()> {
        self.client.cookies().delete_cookie(key);
        Ok(())
    }

    async fn clear_cookies(&self) -> Result<()> {
        self.client.cookies().clear_cookies();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::SetCookieOptions;

    #[tokio::test]
    async fn test_cookie_operations() {
        let web = WebHttp::new().unwrap();

        web.set_cookie(SetCookieRequest::new("a", "1")).await.unwrap();
        web.set_cookie(
            SetCookieRequest::new("b", "2").options(SetCookieOptions::new().path("/")),
        )
        .await
        .unwrap();

        let all = web.get_cookies().await.unwrap();
        assert_eq!(all.cookies, vec![HttpCookie::new("a", "1"), HttpCookie::new("b", "2")]);
        assert_eq!(web.get_cookies_map().await.unwrap().len(), 2);

        web.delete_cookie("a").await.unwrap();
        assert_eq!(web.get_cookie("a").await.unwrap(), HttpCookie::new("a", ""));

        web.clear_all_cookies().await.unwrap();
        assert!(web.get_cookies().await.unwrap().cookies.is_empty());
    }
}
