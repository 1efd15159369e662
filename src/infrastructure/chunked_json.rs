// Chunked JSON streaming utilities
use crate::application::page_service::PageMessage;
use crate::infrastructure::http_response::brotli;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;

/// Create a chunked JSON streaming response
pub fn chunked_json_stream<S>(stream: S, compress: bool) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = PageMessage> + Send + 'static,
{
    let byte_stream = stream.then(move |msg| async move { serialize_chunk(msg, compress).await });

    let body = Body::from_stream(byte_stream);

    // Chunks are compressed individually, so no Content-Encoding header here.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single message to a length-prefixed chunk
async fn serialize_chunk(msg: PageMessage, compress: bool) -> Result<Bytes, std::io::Error> {
    let json = serde_json::to_vec(&msg)?;

    let payload = if compress { brotli(&json).await? } else { json };

    // 4-byte big-endian length, then the payload
    let length = payload.len() as u32;
    let mut chunk = BytesMut::with_capacity(4 + payload.len());
    chunk.put_u32(length);
    chunk.put_slice(&payload);

    Ok(chunk.freeze())
}

/// Helper to create a streaming response from a receiver
pub fn stream_from_receiver(
    mut rx: tokio::sync::mpsc::Receiver<PageMessage>,
    compress: bool,
) -> impl IntoResponse {
    let stream = async_stream::stream! {
        while let Some(msg) = rx.recv().await {
            yield msg;
        }
    };

    match chunked_json_stream(stream, compress) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Split a framed body back into its JSON messages
    fn frames(mut body: &[u8]) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        while body.len() >= 4 {
            let len = u32::from_be_bytes([body[0], body[1], body[2], body[3]]) as usize;
            out.push(serde_json::from_slice(&body[4..4 + len]).unwrap());
            body = &body[4 + len..];
        }
        assert!(body.is_empty());
        out
    }

    #[tokio::test]
    async fn test_chunks_are_length_prefixed() {
        let chunk = serialize_chunk(
            PageMessage::Complete {
                slots: 2,
                duration_ms: 7,
            },
            false,
        )
        .await
        .unwrap();

        let expected = br#"{"type":"complete","slots":2,"duration_ms":7}"#;
        assert_eq!(&chunk[..4], &(expected.len() as u32).to_be_bytes());
        assert_eq!(&chunk[4..], &expected[..]);
    }

    #[tokio::test]
    async fn test_stream_from_receiver_frames_every_message() {
        let (tx, rx) = tokio::sync::mpsc::channel(4);
        tx.send(PageMessage::Complete { slots: 0, duration_ms: 1 }).await.unwrap();
        tx.send(PageMessage::Complete { slots: 1, duration_ms: 2 }).await.unwrap();
        drop(tx);

        let response = stream_from_receiver(rx, false).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let messages = frames(&body);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1]["slots"], 1);
    }
}
