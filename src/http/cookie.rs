// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie access through a whole-string cookie jar
//!
//! The jar behaves like `document.cookie`: reading returns every visible
//! cookie as one `a=1; b=2` string, writing assigns a single cookie together
//! with its attributes. [`DocumentCookies`] layers the plugin's cookie
//! operations on top of any [`CookieStore`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::codec::{decode, encode};

/// Expiry date written by [`DocumentCookies::clear_cookies`]
pub const EXPIRED_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Longest lifetime the jar honours for `Max-Age` (400 days)
const MAX_AGE_CAP_SECS: i64 = 400 * 24 * 60 * 60;

/// Read-whole / write-one cookie jar contract
pub trait CookieStore: Send + Sync {
    /// All visible cookies as a single `name=value; name=value` string
    fn read(&self) -> String;

    /// Assign one cookie, e.g. `id=42; expires=...; path=/`
    fn write(&self, cookie: &str);

    /// Record a `Set-Cookie` header received from `host`.
    ///
    /// Stores without host scoping treat it as a script assignment.
    fn store_response_cookie(&self, _host: &str, set_cookie: &str) {
        self.write(set_cookie);
    }

    /// `Cookie` header value for a request to `host`
    fn request_cookies(&self, _host: &str) -> String {
        self.read()
    }
}

/// A cookie as seen by callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCookie {
    pub key: String,
    pub value: String,
}

impl HttpCookie {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Optional attributes for [`DocumentCookies::set_cookie`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetCookieOptions {
    /// Expiry date; empty or absent means a session cookie
    #[serde(default)]
    pub expires: Option<String>,
    /// Cookie path, `/` when absent
    #[serde(default)]
    pub path: Option<String>,
}

impl SetCookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expiry date
    pub fn expires(mut self, expires: impl Into<String>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Cookie operations over an injected [`CookieStore`]
#[derive(Clone)]
pub struct DocumentCookies {
    store: Arc<dyn CookieStore>,
}

impl DocumentCookies {
    pub fn new(store: Arc<dyn CookieStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn CookieStore> {
        &self.store
    }

    /// Every cookie, deduplicated by key.
    ///
    /// The last occurrence of a key supplies its value while the first
    /// occurrence fixes its position.
    pub fn get_cookies(&self) -> Vec<HttpCookie> {
        let raw = self.store.read();
        if raw.is_empty() {
            return Vec::new();
        }

        let mut output: Vec<HttpCookie> = Vec::new();
        for entry in raw.split(';') {
            let (k, v) = entry.split_once('=').unwrap_or((entry, ""));
            let key = decode(k).trim().to_string();
            let value = decode(v).trim().to_string();
            match output.iter_mut().find(|c| c.key == key) {
                Some(existing) => existing.value = value,
                None => output.push(HttpCookie { key, value }),
            }
        }
        output
    }

    /// Cookies as a key/value map
    pub fn get_cookies_map(&self) -> HashMap<String, String> {
        self.get_cookies()
            .into_iter()
            .map(|c| (c.key, c.value))
            .collect()
    }

    /// The cookie named `key`, or an empty value when there is none
    pub fn get_cookie(&self, key: &str) -> HttpCookie {
        self.get_cookies()
            .into_iter()
            .find(|c| c.key == key)
            .unwrap_or_else(|| HttpCookie::new(key, ""))
    }

    /// Write a cookie
    pub fn set_cookie(&self, key: &str, value: &str, options: &SetCookieOptions) {
        let expires = options
            .expires
            .as_deref()
            .unwrap_or("")
            .replacen("expires=", "", 1);
        let path = options
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or("/")
            .replacen("path=", "", 1);

        self.store.write(&format!(
            "{}={}; expires={}; path={}",
            encode(key),
            encode(value),
            expires,
            path
        ));
    }

    /// Expire a cookie immediately
    pub fn delete_cookie(&self, key: &str) {
        self.store.write(&format!("{}=; Max-Age=0", encode(key)));
    }

    /// Expire every cookie currently in the jar
    pub fn clear_cookies(&self) {
        let raw = self.store.read();
        for entry in raw.split(';') {
            let entry = entry.trim_start();
            if entry.is_empty() {
                continue;
            }
            let name = entry.split_once('=').map_or(entry, |(k, _)| k);
            self.store
                .write(&format!("{}=;expires={};path=/", name, EXPIRED_DATE));
        }
    }
}

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    /// None = session cookie
    expires: Option<DateTime<Utc>>,
    /// Issuing host for `Set-Cookie` entries, None for script assignments
    host: Option<String>,
    /// Sent with requests but hidden from the script view
    http_only: bool,
}

impl StoredCookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.map_or(false, |exp| exp <= now)
    }

    /// Whether this assignment replaces `other`.
    ///
    /// Script assignments never touch `HttpOnly` entries. Server assignments
    /// replace entries from the same host and script-set entries.
    fn supersedes(&self, other: &StoredCookie) -> bool {
        if self.name != other.name {
            return false;
        }
        match self.host {
            None => !other.http_only,
            Some(ref host) => other.host.as_ref().map_or(true, |h| h == host),
        }
    }

    fn sent_to(&self, host: &str) -> bool {
        self.host.as_deref().map_or(true, |h| h.eq_ignore_ascii_case(host))
    }

    fn pair(&self) -> String {
        if self.name.is_empty() {
            self.value.clone()
        } else {
            format!("{}={}", self.name, self.value)
        }
    }
}

/// In-memory cookie jar with `document.cookie` assignment semantics.
///
/// Cookies are keyed by name and issuing host. `Max-Age<=0` or an `expires`
/// date in the past removes a cookie, and an empty or unparseable `expires`
/// makes it a session cookie. `HttpOnly` cookies only arrive through
/// `Set-Cookie`: they are sent back to their host but never appear in
/// [`CookieStore::read`], and script assignments cannot create or replace
/// them. Cookies set by a server are only sent to that server's host.
#[derive(Debug, Clone, Default)]
pub struct DocumentCookieJar {
    cookies: Arc<RwLock<Vec<StoredCookie>>>,
}

impl DocumentCookieJar {
    /// Create an empty jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cookies, `HttpOnly` ones included
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.cookies.read().iter().filter(|c| !c.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parse_assignment(cookie: &str) -> Option<(StoredCookie, bool)> {
        let mut parts = cookie.split(';');
        let first = parts.next()?;
        let (name, value) = match first.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim()),
            None => ("", first.trim()),
        };
        if name.is_empty() && value.is_empty() {
            return None;
        }

        let now = Utc::now();
        let mut stored = StoredCookie {
            name: name.to_string(),
            value: value.to_string(),
            expires: None,
            host: None,
            http_only: false,
        };
        let mut max_age: Option<i64> = None;

        for part in parts {
            let part = part.trim();
            match part.split_once('=') {
                Some((attr, val)) => {
                    let val = val.trim();
                    match attr.trim().to_lowercase().as_str() {
                        "expires" => {
                            if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                                stored.expires = Some(dt.with_timezone(&Utc));
                            }
                        }
                        "max-age" => max_age = val.parse().ok(),
                        _ => {}
                    }
                }
                None => {
                    if part.eq_ignore_ascii_case("httponly") {
                        stored.http_only = true;
                    }
                }
            }
        }

        // Max-Age takes precedence over Expires
        if let Some(secs) = max_age {
            stored.expires = Some(now + Duration::seconds(secs.clamp(-1, MAX_AGE_CAP_SECS)));
        }

        let expired = stored.is_expired(now) || max_age.map_or(false, |s| s <= 0);
        Some((stored, expired))
    }

    fn assign(&self, host: Option<&str>, cookie: &str) {
        let Some((mut stored, expired)) = Self::parse_assignment(cookie) else {
            tracing::debug!(cookie, "Ignoring cookie assignment");
            return;
        };
        match host {
            None if stored.http_only => {
                tracing::debug!(name = %stored.name, "Ignoring HttpOnly cookie set by script");
                return;
            }
            None => {}
            Some(host) => stored.host = Some(host.to_ascii_lowercase()),
        }

        let now = Utc::now();
        let mut cookies = self.cookies.write();
        cookies.retain(|c| !c.is_expired(now));

        if expired {
            cookies.retain(|c| !stored.supersedes(c));
            return;
        }

        let position = cookies.iter().position(|c| stored.supersedes(c));
        match position {
            Some(i) => {
                // first covered slot keeps its position, later ones go
                let mut idx = 0;
                cookies.retain(|c| {
                    let keep = idx == i || !stored.supersedes(c);
                    idx += 1;
                    keep
                });
                // a script rewrite stays scoped to the host that issued the cookie
                if stored.host.is_none() {
                    stored.host = cookies[i].host.take();
                }
                cookies[i] = stored;
            }
            None => cookies.push(stored),
        }
    }
}

impl CookieStore for DocumentCookieJar {
    fn read(&self) -> String {
        let now = Utc::now();
        self.cookies
            .read()
            .iter()
            .filter(|c| !c.is_expired(now) && !c.http_only)
            .map(StoredCookie::pair)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, cookie: &str) {
        self.assign(None, cookie);
    }

    fn store_response_cookie(&self, host: &str, set_cookie: &str) {
        self.assign(Some(host), set_cookie);
    }

    fn request_cookies(&self, host: &str) -> String {
        let now = Utc::now();
        self.cookies
            .read()
            .iter()
            .filter(|c| !c.is_expired(now) && c.sent_to(host))
            .map(StoredCookie::pair)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
