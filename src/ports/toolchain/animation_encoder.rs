use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::ControllerResult;

/// Port for composing still frames into one animated image
#[async_trait]
pub trait AnimationEncoder: Send + Sync + 'static {
    /// Encode `frames` in order. Every frame must decode to the same
    /// dimensions; the result loops forever.
    async fn encode(&self, frames: Vec<Bytes>) -> ControllerResult<Bytes>;

    /// File extension of the produced blobs, without the dot
    fn extension(&self) -> &'static str;
}
