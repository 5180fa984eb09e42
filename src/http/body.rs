//! Buffered, re-readable request bodies.
//!
//! The interceptor drains the inbound stream completely before rewriting, so
//! everything downstream works on a fully materialized buffer. Handing out
//! fresh `Body` instances from the same `Bytes` makes the body repeatable;
//! downstream code may consume it any number of times.

use axum::body::Body;
use bytes::Bytes;

/// A fully materialized request body.
///
/// Cloning is cheap (`Bytes` is reference-counted) and every call to
/// [`BufferedBody::to_body`] yields an independent stream over the same
/// buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferedBody {
    bytes: Bytes,
}

/// Failure to materialize an inbound body.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("request body exceeds the configured limit of {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read request body: {0}")]
    Read(axum::Error),
}

impl BufferedBody {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Drain an inbound body into memory, enforcing a size limit.
    pub async fn buffer(body: Body, limit: usize) -> Result<Self, BodyError> {
        match axum::body::to_bytes(body, limit).await {
            Ok(bytes) => Ok(Self { bytes }),
            Err(e) if is_length_limit(&e) => Err(BodyError::TooLarge { limit }),
            Err(e) => Err(BodyError::Read(e)),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// A fresh single-pass stream over the buffer. Can be called repeatedly.
    pub fn to_body(&self) -> Body {
        Body::from(self.bytes.clone())
    }
}

/// A limit breach surfaces as a `LengthLimitError` somewhere in the error
/// chain; anything else is a transport failure.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

impl From<Bytes> for BufferedBody {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}

impl From<BufferedBody> for Body {
    fn from(buffered: BufferedBody) -> Self {
        buffered.to_body()
    }
}
