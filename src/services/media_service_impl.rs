use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::{
    domain::{
        errors::{ControllerError, ControllerResult},
        models::UploadedFile,
    },
    ports::{services::MediaService, storage::BlobStore, toolchain::AnimationEncoder},
};

/// Implementation of MediaService. Never touches the relational store.
#[derive(Clone)]
pub struct MediaServiceImpl {
    encoder: Arc<dyn AnimationEncoder>,
    blobs: Arc<dyn BlobStore>,
    prefix: String,
}

impl MediaServiceImpl {
    pub fn new(
        encoder: Arc<dyn AnimationEncoder>,
        blobs: Arc<dyn BlobStore>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            encoder,
            blobs,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl MediaService for MediaServiceImpl {
    async fn frames_to_animated(&self, frames: Vec<UploadedFile>) -> ControllerResult<String> {
        if frames.is_empty() {
            return Err(ControllerError::bad_input("at least one frame is required"));
        }
        let count = frames.len();

        let encoded = self
            .encoder
            .encode(frames.into_iter().map(|f| f.data).collect())
            .await?;
        let filename = format!("animation.{}", self.encoder.extension());
        let key = self.blobs.put(&self.prefix, &filename, encoded).await?;

        info!(key = %key, frames = count, "uploaded animation");
        Ok(self.blobs.public_url(key.as_str()))
    }
}
