// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Percent-encoding helpers for URLs and cookie strings

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Escapes that stay literal inside a cookie: `# $ & + ^ \` |`
    static ref COOKIE_RESERVED: Regex = Regex::new(r"%(2[346B]|5E|60|7C)").unwrap();
    static ref PARENS: Regex = Regex::new(r"[()]").unwrap();
    static ref ESCAPE_RUN: Regex = Regex::new(r"(?i)(%[0-9A-F]{2})+").unwrap();
}

/// Percent-encode like `encodeURIComponent`.
///
/// Unreserved characters are `A-Z a-z 0-9 - _ . ! ~ * ' ( )`; everything else
/// is UTF-8 encoded and escaped with uppercase hex digits.
pub fn encode_uri_component(s: &str) -> String {
    urlencoding::encode(s)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Encode a cookie key or value so it survives inside a cookie string.
pub fn encode(s: &str) -> String {
    let encoded = encode_uri_component(s);
    let relaxed = COOKIE_RESERVED.replace_all(&encoded, |caps: &Captures| decode_run(&caps[0]).into_owned());
    PARENS
        .replace_all(&relaxed, |caps: &Captures| match &caps[0] {
            "(" => "%28",
            _ => "%29",
        })
        .into_owned()
}

/// Decode every run of percent escapes in a cookie key or value.
///
/// A run that does not decode to valid UTF-8 is kept verbatim.
pub fn decode(s: &str) -> String {
    ESCAPE_RUN
        .replace_all(s, |caps: &Captures| decode_run(&caps[0]).into_owned())
        .into_owned()
}

fn decode_run(run: &str) -> Cow<'_, str> {
    match urlencoding::decode(run) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Borrowed(run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_component_matches_js() {
        assert_eq!(encode_uri_component("a b"), "a%20b");
        assert_eq!(encode_uri_component("!'()*-_.~"), "!'()*-_.~");
        assert_eq!(encode_uri_component("a=b&c"), "a%3Db%26c");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_cookie_encode_keeps_reserved_literal() {
        assert_eq!(encode("#$&+^`|"), "#$&+^`|");
        assert_eq!(encode("f(x)"), "f%28x%29");
        assert_eq!(encode("a b;c"), "a%20b%3Bc");
        assert_eq!(encode("k=v"), "k%3Dv");
    }

    #[test]
    fn test_decode_runs() {
        assert_eq!(decode("a%20b"), "a b");
        assert_eq!(decode("%C3%A9t%C3%A9"), "été");
        assert_eq!(decode("plain"), "plain");
    }

    #[test]
    fn test_decode_invalid_utf8_is_kept() {
        assert_eq!(decode("x%FFy"), "x%FFy");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            "session",
            "hello world",
            "f(x) = y",
            "naïve ☃",
            "%41 literal",
            "#$&+^`|!~*'",
            "",
        ];
        for s in samples {
            assert_eq!(decode(&encode(s)), s, "round trip of {:?}", s);
        }
    }
}
