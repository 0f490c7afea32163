use async_trait::async_trait;
use bytes::Bytes;
use object_store::{ObjectStore as ApacheObjectStore, PutPayload, path::Path as ObjectPath};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::{
    domain::{
        errors::{Backend, ControllerError, ControllerResult},
        value_objects::BlobKey,
    },
    ports::storage::BlobStore,
    services::AddressCodec,
};

/// Adapter that implements our BlobStore trait using Apache object_store
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    /// Location inside `inner` every key is resolved against
    root: ObjectPath,
    codec: AddressCodec,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>, codec: AddressCodec) -> Self {
        Self {
            inner: store,
            root: ObjectPath::default(),
            codec,
        }
    }

    /// Open the store a URL names, e.g. `s3://bucket/base`, `file:///srv/blobs`
    /// or `memory://`. The URL path becomes the root of every key.
    pub fn from_url(url: &str, codec: AddressCodec) -> ControllerResult<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            ControllerError::bad_input(format!("Invalid blob store URL '{}': {}", url, e))
        })?;
        let (store, root) = object_store::parse_url(&parsed)?;
        debug!(url = %url, root = %root, "opened blob store");

        Ok(Self {
            inner: Arc::from(store),
            root,
            codec,
        })
    }

    fn path_of(&self, key: &BlobKey) -> ObjectPath {
        key.as_str()
            .split('/')
            .fold(self.root.clone(), |path, part| path.child(part))
    }
}

#[async_trait]
impl BlobStore for ApacheObjectStoreAdapter {
    async fn put(&self, prefix: &str, filename: &str, data: Bytes) -> ControllerResult<BlobKey> {
        let key = BlobKey::generate(prefix, filename)?;
        let size = data.len();

        self.inner
            .put(&self.path_of(&key), PutPayload::from(data))
            .await?;

        debug!(key = %key, size, "stored blob");
        Ok(key)
    }

    async fn delete(&self, key: &BlobKey) -> ControllerResult<()> {
        match self.inner.delete(&self.path_of(key)).await {
            Ok(()) => {
                debug!(key = %key, "deleted blob");
                Ok(())
            }
            Err(object_store::Error::NotFound { .. }) => {
                warn!(key = %key, "blob already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &BlobKey) -> ControllerResult<bool> {
        match self.inner.head(&self.path_of(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(ControllerError::upstream(
                Backend::BlobStore,
                format!("Failed to check blob existence: {}", e),
            )),
        }
    }

    fn public_url(&self, key: &str) -> String {
        self.codec.public_url(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;

    fn adapter() -> ApacheObjectStoreAdapter {
        ApacheObjectStoreAdapter::new(
            Arc::new(InMemory::new()),
            AddressCodec::new("https://cdn.example.com"),
        )
    }

    #[tokio::test]
    async fn test_put_generates_key_under_prefix() {
        let store = adapter();
        let key = store
            .put("projects", "Game.ZIP", Bytes::from_static(b"zip"))
            .await
            .unwrap();

        assert!(key.as_str().starts_with("projects/"));
        assert_eq!(key.extension(), Some("zip"));
        assert!(store.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_do_not_collide() {
        let store = adapter();
        let a = store.put("sprites", "a.png", Bytes::from_static(b"1")).await.unwrap();
        let b = store.put("sprites", "a.png", Bytes::from_static(b"2")).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = adapter();
        let key = store.put("sounds", "s.wav", Bytes::from_static(b"wav")).await.unwrap();

        store.delete(&key).await.unwrap();
        assert!(!store.exists(&key).await.unwrap());
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_url_roots_keys_under_directory() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_directory_path(dir.path()).unwrap();
        let store =
            ApacheObjectStoreAdapter::from_url(url.as_str(), AddressCodec::new("https://cdn"))
                .unwrap();

        let key = store.put("gifs", "animation.gif", Bytes::from_static(b"GIF89a")).await.unwrap();
        let on_disk = dir.path().join(key.as_str());
        assert_eq!(std::fs::read(on_disk).unwrap(), b"GIF89a");
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        let result = ApacheObjectStoreAdapter::from_url("not a url", AddressCodec::new("https://cdn"));
        assert!(matches!(result, Err(ControllerError::BadInput { .. })));
    }

    #[test]
    fn test_public_url() {
        assert_eq!(adapter().public_url("gifs/a.gif"), "https://cdn.example.com/gifs/a.gif");
    }
}
