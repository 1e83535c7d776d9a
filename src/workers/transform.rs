use async_trait::async_trait;
use bytes::Bytes;

use crate::common::error::ServiceResult;

/// Pluggable transformation step. The pipeline treats it as opaque: bytes in,
/// bytes out, keyed by the declared content type.
#[async_trait]
pub trait MediaTransform: Send + Sync {
    async fn transform(&self, data: Bytes, content_type: &str) -> ServiceResult<Bytes>;
}

/// Default transform: emits the input unchanged. Real codecs slot in behind
/// the same trait.
pub struct PassthroughTransform;

#[async_trait]
impl MediaTransform for PassthroughTransform {
    async fn transform(&self, data: Bytes, _content_type: &str) -> ServiceResult<Bytes> {
        Ok(data)
    }
}
