use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{errors::ControllerResult, value_objects::BlobKey};

/// Port for blob storage operations.
/// This abstracts the actual bucket (S3, Kodo, local disk, memory)
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Store `data` under a fresh `<prefix>/<random>.<ext>` key, the extension
    /// taken from `filename`. Returns the relative key.
    async fn put(&self, prefix: &str, filename: &str, data: Bytes) -> ControllerResult<BlobKey>;

    /// Delete a blob. Deleting a missing key is not an error.
    async fn delete(&self, key: &BlobKey) -> ControllerResult<()>;

    /// Check if a blob exists
    async fn exists(&self, key: &BlobKey) -> ControllerResult<bool>;

    /// Public URL the CDN serves `key` under
    fn public_url(&self, key: &str) -> String;
}
