// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Streamed downloads with progress reporting

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;

use super::form::Blob;
use crate::error::Result;

/// Channel end the download streamer reports progress on
pub type ProgressSender = mpsc::UnboundedSender<DownloadProgress>;

/// Channel end callers pull progress updates from
pub type ProgressReceiver = mpsc::UnboundedReceiver<DownloadProgress>;

/// Create a progress channel
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}

/// Kind tag carried by every progress update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgressType {
    #[serde(rename = "DOWNLOAD")]
    Download,
}

/// Progress update emitted after every received chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadProgress {
    #[serde(rename = "type")]
    pub kind: ProgressType,
    pub url: String,
    /// Bytes received so far
    pub bytes: u64,
    /// Declared total, 0 when unknown
    pub content_length: u64,
}

/// Drain a chunk stream in arrival order and assemble the result into a blob.
///
/// After each chunk the cumulative byte count is sent on `progress`. A
/// closed receiver does not stop the download. A missing body yields an
/// empty blob.
pub async fn stream_to_blob<S, E>(
    body: Option<S>,
    url: &str,
    content_length: u64,
    content_type: Option<String>,
    progress: Option<&ProgressSender>,
) -> Result<Blob>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<crate::error::Error>,
{
    let Some(body) = body else {
        tracing::warn!(url, "Download has no streamable body");
        return Ok(Blob::default());
    };
    futures::pin_mut!(body);

    let mut buffer = BytesMut::new();
    let mut bytes: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(Into::<crate::error::Error>::into)?;
        bytes += chunk.len() as u64;
        buffer.extend_from_slice(&chunk);

        if let Some(tx) = progress {
            let _ = tx.send(DownloadProgress {
                kind: ProgressType::Download,
                url: url.to_string(),
                bytes,
                content_length,
            });
        }
    }

    tracing::debug!(url, bytes, content_length, "Download stream drained");

    let data = buffer.freeze();
    Ok(match content_type {
        Some(ct) => Blob::with_type(data, ct),
        None => Blob::new(data),
    })
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::error::Error;

    type Chunk = std::result::Result<Bytes, Error>;

    fn chunks(sizes: &[usize]) -> impl Stream<Item = Chunk> + Unpin {
        let items: Vec<Chunk> = sizes
            .iter()
            .enumerate()
            .map(|(i, n)| Ok(Bytes::from(vec![i as u8; *n])))
            .collect();
        stream::iter(items)
    }

    #[tokio::test]
    async fn test_progress_in_arrival_order() {
        let (tx, mut rx) = progress_channel();
        let blob = stream_to_blob(
            Some(chunks(&[100, 100, 50])),
            "https://example.com/f.bin",
            250,
            Some("application/octet-stream".to_string()),
            Some(&tx),
        )
        .await
        .unwrap();
        drop(tx);

        let mut seen = Vec::new();
        while let Some(p) = rx.recv().await {
            assert_eq!(p.kind, ProgressType::Download);
            assert_eq!(p.content_length, 250);
            seen.push(p.bytes);
        }
        assert_eq!(seen, vec![100, 200, 250]);
        assert_eq!(blob.size(), 250);
        assert_eq!(blob.content_type(), Some("application/octet-stream"));

        // chunk boundaries are preserved in order
        assert!(blob.bytes()[..100].iter().all(|b| *b == 0));
        assert!(blob.bytes()[100..200].iter().all(|b| *b == 1));
        assert!(blob.bytes()[200..].iter().all(|b| *b == 2));
    }

    #[tokio::test]
    async fn test_missing_body_is_empty_blob() {
        let blob = stream_to_blob::<stream::Iter<std::vec::IntoIter<Chunk>>, Error>(
            None,
            "https://example.com/",
            0,
            None,
            None,
        )
        .await
        .unwrap();
        assert!(blob.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_receiver_still_completes() {
        let (tx, rx) = progress_channel();
        drop(rx);
        let blob = stream_to_blob(Some(chunks(&[3, 4])), "u", 0, None, Some(&tx))
            .await
            .unwrap();
        assert_eq!(blob.size(), 7);
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let items: Vec<Chunk> = vec![Ok(Bytes::from_static(b"ok")), Err(Error::other("reset"))];
        let result = stream_to_blob(Some(stream::iter(items)), "u", 0, None, None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_progress_serializes_like_event() {
        let p = DownloadProgress {
            kind: ProgressType::Download,
            url: "u".to_string(),
            bytes: 5,
            content_length: 10,
        };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            serde_json::json!({"type": "DOWNLOAD", "url": "u", "bytes": 5, "contentLength": 10})
        );
    }
}
