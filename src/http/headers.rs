// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Case-insensitive header handling

use std::collections::HashMap;

/// Header map as exchanged with callers and bridges
pub type HttpHeaders = HashMap<String, String>;

/// Lowercase every header name so lookups can ignore casing.
///
/// Values are left untouched. When two names collide only after lowercasing,
/// the one visited last wins. A missing map normalizes to an empty one.
pub fn normalize_http_headers(headers: Option<&HttpHeaders>) -> HttpHeaders {
    let mut normalized = HttpHeaders::new();
    if let Some(headers) = headers {
        for (name, value) in headers {
            normalized.insert(name.to_lowercase(), value.clone());
        }
    }
    normalized
}

/// Remove a header regardless of the casing the caller used for its name
pub fn remove_header(headers: &mut HttpHeaders, name: &str) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
}
