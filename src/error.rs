// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for httpbridge
//!
//! Transport and read failures are propagated as-is from the underlying
//! primitive, never retried or wrapped in a partial-success state.
//! Cookie operations have no error path at all.

use thiserror::Error;

/// Result type alias for httpbridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for httpbridge
#[derive(Error, Debug)]
pub enum Error {
    /// Network/transport failure (DNS, refused connection, broken body stream)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading a file or blob failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding of a request body or decoding of a response body failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A header name or value could not be sent on the wire
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A native bridge reported a failure
    #[error("Native bridge error: {0}")]
    Bridge(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a native bridge error
    pub fn bridge<S: Into<String>>(msg: S) -> Self {
        Error::Bridge(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a transport-level failure
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if this is a file/blob read failure
    pub fn is_read(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Get HTTP status code if the transport attached one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
