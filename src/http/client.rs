// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder};
use url::Url;

use super::body::{build_request_init, RequestBody, RequestInit};
use super::cookie::{CookieStore, DocumentCookieJar, DocumentCookies};
use super::download::{stream_to_blob, ProgressSender};
use super::form::{Blob, FormData};
use super::headers::HttpHeaders;
use super::params::build_url_params;
use super::request::{
    CredentialsMode, DownloadFileOptions, HttpMethod, RequestData, RequestOptions, UploadFileOptions,
    UploadSource,
};
use super::response::{collect_headers, decode_body, effective_response_type, DownloadFileResult, HttpResponse};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Headers sent with every request unless the caller overrides them
    pub default_headers: HeaderMap,
    /// Send jar cookies to their host and store `Set-Cookie` responses
    pub handle_cookies: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers: HeaderMap::new(),
            handle_cookies: true,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the redirect limit
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Enable/disable cookie handling
    pub fn handle_cookies(mut self, handle: bool) -> Self {
        self.handle_cookies = handle;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Add default header
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let (name, value) = header_pair(name, value)?;
        self.default_headers.insert(name, value);
        Ok(self)
    }
}

/// Request executor: one network call per operation, no retries, no timeout
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    cookies: DocumentCookies,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration and an empty jar
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_cookie_store(config, Arc::new(DocumentCookieJar::new()))
    }

    /// Create a client that shares `store` as its cookie jar
    pub fn with_cookie_store(config: HttpClientConfig, store: Arc<dyn CookieStore>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config,
            cookies: DocumentCookies::new(store),
        })
    }

    /// Cookie operations over this client's jar
    pub fn cookies(&self) -> &DocumentCookies {
        &self.cookies
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Perform a request and decode its body
    pub async fn request(&self, options: &RequestOptions) -> Result<HttpResponse> {
        let start = Instant::now();
        let response = self.send(options).await?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let response_type = effective_response_type(status, &content_type, options.response_type);
        let body = response.bytes().await?;
        let data = decode_body(response_type, &body)?;

        tracing::debug!(
            status = status.as_u16(),
            url = %final_url,
            response_type = ?response_type,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Response decoded"
        );

        Ok(HttpResponse {
            data,
            headers,
            status: status.as_u16(),
            url: final_url,
        })
    }

    /// Execute a GET request
    pub async fn get(&self, options: &RequestOptions) -> Result<HttpResponse> {
        self.request(&options.with_method(HttpMethod::Get)).await
    }

    /// Execute a POST request
    pub async fn post(&self, options: &RequestOptions) -> Result<HttpResponse> {
        self.request(&options.with_method(HttpMethod::Post)).await
    }

    /// Execute a PUT request
    pub async fn put(&self, options: &RequestOptions) -> Result<HttpResponse> {
        self.request(&options.with_method(HttpMethod::Put)).await
    }

    /// Execute a PATCH request
    pub async fn patch(&self, options: &RequestOptions) -> Result<HttpResponse> {
        self.request(&options.with_method(HttpMethod::Patch)).await
    }

    /// Execute a DELETE request
    pub async fn del(&self, options: &RequestOptions) -> Result<HttpResponse> {
        self.request(&options.with_method(HttpMethod::Delete)).await
    }

    /// POST a single file as a one-field multipart body
    pub async fn upload_file(&self, options: &UploadFileOptions) -> Result<HttpResponse> {
        let blob = match options.file {
            UploadSource::Blob(ref blob) => blob.clone(),
            UploadSource::Path(ref path) => Blob::from_path(path).await?,
        };

        let mut request = options.request.clone();
        request.data = Some(RequestData::Form(FormData::new().with(options.name.clone(), blob)));
        self.post(&request).await
    }

    /// Download a body as a blob, optionally streaming progress updates
    pub async fn download_file(
        &self,
        options: &DownloadFileOptions,
        progress: Option<ProgressSender>,
    ) -> Result<DownloadFileResult> {
        let response = self.send(&options.request).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !options.progress {
            let data = response.bytes().await?;
            let blob = match content_type {
                Some(ct) => Blob::with_type(data, ct),
                None => Blob::new(data),
            };
            return Ok(DownloadFileResult { blob });
        }

        let content_length = response.content_length().unwrap_or(0);
        let url = options.request.url.clone();
        let blob = stream_to_blob(
            Some(response.bytes_stream()),
            &url,
            content_length,
            content_type,
            progress.as_ref(),
        )
        .await?;

        Ok(DownloadFileResult { blob })
    }

    /// Build, send, and record cookies for one request
    async fn send(&self, options: &RequestOptions) -> Result<reqwest::Response> {
        let init = build_request_init(options, options.web_fetch_extra.as_ref())?;
        let url = Url::parse(&request_url(options))?;

        tracing::debug!(method = %init.method, url = %url, "Sending request");

        let host = url.host_str().unwrap_or_default().to_string();
        let builder = self.client.request(init.method.into(), url);
        let credentials = init.credentials;
        let builder = self.apply_init(builder, init, &host)?;

        let response = builder.send().await?;

        if self.config.handle_cookies && credentials != CredentialsMode::Omit {
            // cookies belong to the host that answered, after redirects
            let issuer = response.url().host_str().unwrap_or(&host);
            for cookie in response.headers().get_all(reqwest::header::SET_COOKIE) {
                if let Ok(cookie_str) = cookie.to_str() {
                    self.cookies.store().store_response_cookie(issuer, cookie_str);
                }
            }
        }

        Ok(response)
    }

    fn apply_init(&self, mut builder: RequestBuilder, init: RequestInit, host: &str) -> Result<RequestBuilder> {
        builder = builder.headers(header_map(&init.headers)?);

        if let Some(ref referrer) = init.referrer {
            builder = builder.header(reqwest::header::REFERER, referrer.as_str());
        }

        if self.config.handle_cookies
            && init.credentials != CredentialsMode::Omit
            && !init.headers.keys().any(|k| k.eq_ignore_ascii_case("cookie"))
        {
            let cookie_header = self.cookies.store().request_cookies(host);
            if !cookie_header.is_empty() {
                builder = builder.header(reqwest::header::COOKIE, cookie_header);
            }
        }

        match init.body {
            Some(RequestBody::Text(text)) => builder = builder.body(text),
            Some(RequestBody::Multipart(form)) => builder = builder.multipart(form.into_multipart()?),
            None => {}
        }

        Ok(builder)
    }
}

/// Request URL with the query string appended when one was produced
pub fn request_url(options: &RequestOptions) -> String {
    let should_encode = options.should_encode_url_params.unwrap_or(true);
    match build_url_params(options.params.as_ref(), should_encode) {
        Some(query) if !query.is_empty() => format!("{}?{}", options.url, query),
        _ => options.url.clone(),
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name =
        HeaderName::try_from(name).map_err(|e| Error::invalid_header(name, e.to_string()))?;
    let header_value =
        HeaderValue::try_from(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
    Ok((header_name, header_value))
}

fn header_map(headers: &HttpHeaders) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let (name, value) = header_pair(name, value)?;
        map.insert(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::HttpParams;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert!(client.config().handle_cookies);
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let result = HttpClient::with_config(HttpClientConfig::new().proxy("::not a url::"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_unchanged_without_params() {
        let opts = RequestOptions::new("https://example.com/a");
        assert_eq!(request_url(&opts), "https://example.com/a");

        let opts = RequestOptions::new("https://example.com/a").params(HttpParams::new());
        assert_eq!(request_url(&opts), "https://example.com/a");
    }

    #[test]
    fn test_url_with_params() {
        let opts = RequestOptions::new("https://example.com/a")
            .params(HttpParams::new().insert("q", "x y").insert("id", vec!["1", "2"]));
        assert_eq!(request_url(&opts), "https://example.com/a?q=x%20y&id=1&id=2");

        let raw = opts.clone().raw_url_params();
        assert_eq!(request_url(&raw), "https://example.com/a?q=x y&id=1&id=2");
    }

    #[tokio::test]
    async fn test_malformed_url_is_url_error() {
        let client = HttpClient::new().unwrap();
        let err = client.get(&RequestOptions::new("not a url")).await.unwrap_err();
        assert!(matches!(err, Error::Url(_)));
        assert!(!err.is_network());
    }

    #[test]
    fn test_header_map_rejects_invalid_names() {
        let mut headers = HttpHeaders::new();
        headers.insert("bad header".to_string(), "v".to_string());
        assert!(matches!(header_map(&headers), Err(Error::InvalidHeader { .. })));
    }

    #[test]
    fn test_config_header() {
        let config = HttpClientConfig::new().header("X-App", "shell").unwrap();
        assert_eq!(config.default_headers.get("x-app").unwrap(), "shell");
    }
}
