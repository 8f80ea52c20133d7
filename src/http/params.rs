// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Query string construction from structured parameters

use serde::Deserialize;
use serde_json::{Map, Value};

use super::codec::encode_uri_component;

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// `key=value`
    Single(String),
    /// One `key=value` pair per element
    Multi(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Single(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Single(s)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::Multi(v)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(v: Vec<&str>) -> Self {
        ParamValue::Multi(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => ParamValue::Multi(items.into_iter().map(scalar_text).collect()),
            other => ParamValue::Single(scalar_text(other)),
        }
    }
}

/// Text form of a JSON scalar as it would appear in a URL
pub(crate) fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Ordered query parameters
///
/// Insertion order is kept so the produced query string is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct HttpParams(Vec<(String, ParamValue)>);

impl HttpParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an existing one with the same key in place
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for HttpParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for HttpParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(HttpParams::new(), |params, (k, v)| params.insert(k, v))
    }
}

/// Serialize parameters into a query string (without the leading `?`).
///
/// Returns `None` when there are no parameters so the caller leaves the URL
/// untouched. Array values expand to one pair per element and never leave a
/// trailing `&` behind.
pub fn build_url_params(params: Option<&HttpParams>, should_encode: bool) -> Option<String> {
    let params = params?;

    let encode = |value: &str| {
        if should_encode {
            encode_uri_component(value)
        } else {
            value.to_string()
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in params.iter() {
        match value {
            ParamValue::Single(v) => pairs.push(format!("{}={}", key, encode(v))),
            ParamValue::Multi(values) => {
                for v in values {
                    pairs.push(format!("{}={}", key, encode(v)));
                }
            }
        }
    }

    Some(pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_params() {
        assert_eq!(build_url_params(None, true), None);
    }

    #[test]
    fn test_scalars_keep_order() {
        let params = HttpParams::new().insert("b", "2").insert("a", "1");
        assert_eq!(build_url_params(Some(&params), true).as_deref(), Some("b=2&a=1"));
    }

    #[test]
    fn test_array_has_no_stray_ampersand() {
        let params = HttpParams::new()
            .insert("tag", vec!["x", "y"])
            .insert("page", "3");
        assert_eq!(
            build_url_params(Some(&params), true).as_deref(),
            Some("tag=x&tag=y&page=3")
        );
    }

    #[test]
    fn test_encoding_flag() {
        let params = HttpParams::new().insert("q", "a b&c");
        assert_eq!(build_url_params(Some(&params), true).as_deref(), Some("q=a%20b%26c"));
        assert_eq!(build_url_params(Some(&params), false).as_deref(), Some("q=a b&c"));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let params: HttpParams =
            serde_json::from_str(r#"{"z":"1","ids":[1,2],"flag":true}"#).unwrap();
        assert_eq!(
            build_url_params(Some(&params), true).as_deref(),
            Some("z=1&ids=1&ids=2&flag=true")
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let params = HttpParams::new().insert("a", "1").insert("b", "2").insert("a", "3");
        assert_eq!(build_url_params(Some(&params), true).as_deref(), Some("a=3&b=2"));
    }
}
