use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    domain::{
        errors::{ControllerError, ControllerResult},
        models::{
            Asset, Column, FilterCondition, Manifest, OrderByCondition, Page, SpriteUpload,
            UploadedFile,
        },
        value_objects::{AssetType, BlobKey, RowStatus, Visibility},
    },
    ports::{
        repositories::AssetRepository,
        services::{AssetListQuery, AssetService},
        storage::BlobStore,
    },
    services::AddressCodec,
};

const ENTITY: &str = "asset";

/// Implementation of AssetService. Manifests are stored relative and
/// rewritten to public URLs on the way out.
#[derive(Clone)]
pub struct AssetServiceImpl {
    repository: Arc<dyn AssetRepository>,
    blobs: Arc<dyn BlobStore>,
    codec: AddressCodec,
    sprite_prefix: String,
    sound_prefix: String,
}

impl AssetServiceImpl {
    pub fn new(
        repository: Arc<dyn AssetRepository>,
        blobs: Arc<dyn BlobStore>,
        codec: AddressCodec,
    ) -> Self {
        Self {
            repository,
            blobs,
            codec,
            sprite_prefix: "sprites".to_string(),
            sound_prefix: "sounds".to_string(),
        }
    }

    pub fn with_sprite_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sprite_prefix = prefix.into();
        self
    }

    pub fn with_sound_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.sound_prefix = prefix.into();
        self
    }

    fn not_found(id: &str) -> ControllerError {
        ControllerError::NotFound {
            entity: ENTITY,
            id: id.to_string(),
        }
    }

    fn forbidden(id: &str, user_id: &str) -> ControllerError {
        ControllerError::Forbidden {
            entity: ENTITY,
            id: id.to_string(),
            user_id: user_id.to_string(),
        }
    }

    async fn load_active(&self, id: &str) -> ControllerResult<Asset> {
        if id.is_empty() {
            return Err(Self::not_found(id));
        }
        match self.repository.find_by_id(id).await? {
            Some(asset) if asset.status == RowStatus::Active => Ok(asset),
            _ => Err(Self::not_found(id)),
        }
    }

    fn present(&self, mut asset: Asset) -> Asset {
        asset.address = self.codec.rewrite(&asset.address);
        asset
    }

    async fn list(
        &self,
        query: AssetListQuery,
        owner: FilterCondition,
    ) -> ControllerResult<Page<Asset>> {
        let mut filters = vec![
            FilterCondition::eq(Column::AssetType, query.asset_type),
            owner,
            FilterCondition::active(),
        ];
        if let Some(category) = query.category {
            filters.push(FilterCondition::eq(Column::Category, category));
        }

        let mut orders = Vec::new();
        if query.order_by_time {
            orders.push(OrderByCondition::desc(Column::CTime));
        }
        if query.order_by_hot {
            orders.push(OrderByCondition::desc(Column::ClickCount));
        }

        let page = self.repository.find_page(query.page, filters, orders).await?;
        page.try_map(|a| Ok(self.present(a)))
    }

    async fn create_sound(&self, asset: Asset, file: UploadedFile) -> ControllerResult<Asset> {
        if asset.author_id.is_empty() {
            return Err(ControllerError::bad_input("asset author is required"));
        }

        let key = self.blobs.put(&self.sound_prefix, &file.filename, file.data).await?;
        let now = Utc::now();
        let created = Asset {
            id: Uuid::new_v4().to_string(),
            name: asset.name,
            author_id: asset.author_id,
            category: asset.category,
            is_public: asset.is_public,
            address: Manifest::sound(key.into_string()),
            asset_type: AssetType::Sound,
            click_count: 0,
            status: RowStatus::Active,
            c_time: now,
            u_time: now,
        };
        self.repository.insert(&created).await?;

        info!(asset_id = %created.id, user_id = %created.author_id, "created sound asset");
        Ok(self.present(created))
    }

    async fn replace_sound(&self, asset: Asset, file: UploadedFile) -> ControllerResult<Asset> {
        let current = self.load_active(&asset.id).await?;
        if current.author_id != asset.author_id {
            return Err(Self::forbidden(&asset.id, &asset.author_id));
        }
        if current.asset_type != AssetType::Sound {
            return Err(ControllerError::bad_input(format!(
                "asset {} is not a sound",
                current.id
            )));
        }

        if let Some(old) = current.address.primary_key() {
            self.blobs.delete(&BlobKey::new(old)?).await?;
        }
        let key = self.blobs.put(&self.sound_prefix, &file.filename, file.data).await?;

        let updated = Asset {
            name: asset.name,
            category: asset.category,
            is_public: asset.is_public,
            address: Manifest::sound(key.into_string()),
            u_time: Utc::now(),
            ..current
        };
        if !self.repository.update(&updated).await? {
            return Err(Self::not_found(&updated.id));
        }

        info!(asset_id = %updated.id, "replaced sound blob");
        Ok(self.present(updated))
    }
}

#[async_trait]
impl AssetService for AssetServiceImpl {
    async fn get_asset(&self, id: &str) -> ControllerResult<Asset> {
        let asset = self.load_active(id).await?;
        Ok(self.present(asset))
    }

    async fn list_public(&self, query: AssetListQuery) -> ControllerResult<Page<Asset>> {
        self.list(query, FilterCondition::eq(Column::IsPublic, Visibility::Public))
            .await
    }

    async fn list_by_user(
        &self,
        query: AssetListQuery,
        user_id: &str,
    ) -> ControllerResult<Page<Asset>> {
        self.list(query, FilterCondition::eq(Column::AuthorId, user_id))
            .await
    }

    async fn search_by_name(
        &self,
        text: &str,
        asset_type: AssetType,
        user_id: Option<&str>,
    ) -> ControllerResult<Vec<Asset>> {
        let user_id = user_id.filter(|u| !u.is_empty());
        let found = self
            .repository
            .search_by_name(text, asset_type, user_id)
            .await?;
        debug!(query = %text, hits = found.len(), "asset search");
        Ok(found.into_iter().map(|a| self.present(a)).collect())
    }

    async fn increment_click_count(
        &self,
        id: &str,
        asset_type: AssetType,
    ) -> ControllerResult<()> {
        if self.repository.increment_click_count(id, asset_type).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    async fn save_sound_asset(&self, asset: Asset, file: UploadedFile) -> ControllerResult<Asset> {
        if asset.is_new() {
            self.create_sound(asset, file).await
        } else {
            self.replace_sound(asset, file).await
        }
    }

    async fn upload_sprite(&self, upload: SpriteUpload) -> ControllerResult<Asset> {
        if upload.files.is_empty() {
            return Err(ControllerError::bad_input("a sprite needs at least one file"));
        }
        if upload.author_id.is_empty() {
            return Err(ControllerError::bad_input("asset author is required"));
        }

        // Resolve the preview before any upload so a bad URL leaves no blobs behind
        let animated = if upload.files.len() > 1 {
            let url = upload
                .animated_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or_else(|| {
                    ControllerError::bad_input("an animated preview URL is required for several frames")
                })?;
            Some(self.codec.strip_public_prefix(url)?)
        } else {
            None
        };

        let keys = try_join_all(upload.files.into_iter().map(|file| {
            let blobs = Arc::clone(&self.blobs);
            let prefix = self.sprite_prefix.clone();
            async move { blobs.put(&prefix, &file.filename, file.data).await }
        }))
        .await?;

        let address = match animated {
            Some(animated) => Manifest::frames(keys.into_iter().map(BlobKey::into_string), animated),
            None => Manifest::single_image(keys[0].as_str()),
        };

        let now = Utc::now();
        let asset = Asset {
            id: Uuid::new_v4().to_string(),
            name: upload.name,
            author_id: upload.author_id,
            category: upload.category,
            is_public: upload.is_public,
            address,
            asset_type: AssetType::Sprite,
            click_count: 0,
            status: RowStatus::Active,
            c_time: now,
            u_time: now,
        };
        self.repository.insert(&asset).await?;

        info!(asset_id = %asset.id, frames = asset.address.assets.len(), "registered sprite");
        Ok(self.present(asset))
    }

    async fn update_public(
        &self,
        id: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> ControllerResult<()> {
        if id.is_empty() {
            return Err(Self::not_found(id));
        }
        if self.repository.update_visibility(id, user_id, visibility).await? {
            debug!(asset_id = %id, ?visibility, "changed asset visibility");
            return Ok(());
        }

        self.load_active(id).await?;
        Err(Self::forbidden(id, user_id))
    }
}
