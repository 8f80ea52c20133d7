// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Binary blobs and multipart form values

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::error::{Error, Result};

/// Immutable binary payload with an optional MIME type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    content_type: Option<String>,
}

impl Blob {
    /// Create a blob without a MIME type
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            content_type: None,
        }
    }

    /// Create a blob with a MIME type
    pub fn with_type(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: Some(content_type.into()),
        }
    }

    /// Read a file into a blob
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = tokio::fs::read(path.as_ref()).await?;
        Ok(Self::new(data))
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// MIME type, if known
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Raw bytes
    pub fn bytes(&self) -> &Bytes {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// One multipart entry value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Blob(Blob),
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<Blob> for FormValue {
    fn from(b: Blob) -> Self {
        FormValue::Blob(b)
    }
}

/// Ordered multipart form entries; duplicate names are allowed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style [`FormData::append`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.append(name, value);
        self
    }

    /// First value stored under `name`
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FormValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a reqwest multipart form; the transport picks the boundary
    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.entries {
            form = match value {
                FormValue::Text(text) => form.text(name, text),
                FormValue::Blob(blob) => {
                    let content_type = blob.content_type.clone();
                    let len = blob.data.len() as u64;
                    // Browsers name unnamed blob parts "blob"
                    let mut part = Part::stream_with_length(reqwest::Body::from(blob.data), len)
                        .file_name("blob");
                    if let Some(ct) = content_type {
                        part = part.mime_str(&ct).map_err(|e| {
                            Error::invalid_header("content-type", format!("{}: {}", ct, e))
                        })?;
                    }
                    form.part(name, part)
                }
            };
        }
        Ok(form)
    }
}
