use async_trait::async_trait;

use crate::domain::{errors::ControllerResult, models::UploadedFile};

/// Service port for media helpers that only touch the blob store
#[async_trait]
pub trait MediaService: Send + Sync + 'static {
    /// Compose ordered frames into an animated image, upload it and return
    /// its public URL
    async fn frames_to_animated(&self, frames: Vec<UploadedFile>) -> ControllerResult<String>;
}
