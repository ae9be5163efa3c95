//! File content decoding
//!
//! The file content endpoint answers either with the raw bytes or, in some
//! API modes, with a JSON envelope `{"data": "<base64>"}`. The response's
//! content type picks the strategy. A JSON body that is not such an envelope
//! is a JSON source file and is kept as is.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::StreamExt;
use reqwest::{header, Response};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;
use vercel_models::EncodedFileContent;

use crate::errors::FetchError;

/// How a file content response body is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// `{"data": "<base64>"}`
    Base64Json,
    /// The body is the file
    Raw,
}

impl ContentEncoding {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("application/json") => ContentEncoding::Base64Json,
            Some(m) if m.ends_with("+json") => ContentEncoding::Base64Json,
            _ => ContentEncoding::Raw,
        }
    }

    pub fn of(response: &Response) -> Self {
        Self::from_content_type(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        )
    }
}

/// Decode a `{"data": "<base64>"}` body into the file bytes
pub fn decode_envelope(body: &[u8]) -> Result<Vec<u8>, FetchError> {
    let envelope: EncodedFileContent = serde_json::from_slice(body)
        .map_err(|e| FetchError::DecodeError(format!("invalid content envelope: {}", e)))?;

    let data: String = envelope
        .data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(data)
        .map_err(|e| FetchError::DecodeError(format!("invalid base64 content: {}", e)))
}

/// Drain a file content response into `writer`, returning the bytes written
pub async fn write_response<W>(response: Response, writer: &mut W) -> Result<u64, FetchError>
where
    W: AsyncWrite + Unpin + Send + ?Sized,
{
    let written = match ContentEncoding::of(&response) {
        ContentEncoding::Base64Json => {
            let body = response.bytes().await?;
            match decode_envelope(&body) {
                Ok(bytes) => {
                    writer.write_all(&bytes).await?;
                    bytes.len() as u64
                }
                Err(e) => {
                    debug!("Keeping JSON body unchanged: {}", e);
                    writer.write_all(&body).await?;
                    body.len() as u64
                }
            }
        }
        ContentEncoding::Raw => {
            let mut total = 0u64;
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                writer.write_all(&chunk).await?;
                total += chunk.len() as u64;
            }
            total
        }
    };

    writer.flush().await?;
    Ok(written)
}
