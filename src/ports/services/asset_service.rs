use async_trait::async_trait;

use crate::domain::{
    errors::ControllerResult,
    models::{Asset, Page, PageRequest, SpriteUpload, UploadedFile},
    value_objects::{AssetType, Visibility},
};

/// Listing options shared by the public and per-user asset lists
#[derive(Debug, Clone, PartialEq)]
pub struct AssetListQuery {
    pub page: PageRequest,
    pub asset_type: AssetType,
    pub category: Option<String>,
    /// Newest first
    pub order_by_time: bool,
    /// Most clicked first; applied after the time ordering when both are set
    pub order_by_hot: bool,
}

impl AssetListQuery {
    pub fn new(page: PageRequest, asset_type: AssetType) -> Self {
        Self {
            page,
            asset_type,
            category: None,
            order_by_time: false,
            order_by_hot: false,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order_by_time = true;
        self
    }

    pub fn hottest_first(mut self) -> Self {
        self.order_by_hot = true;
        self
    }
}

/// Service port for asset management. Every asset returned carries a
/// manifest whose keys were rewritten to public URLs.
#[async_trait]
pub trait AssetService: Send + Sync + 'static {
    async fn get_asset(&self, id: &str) -> ControllerResult<Asset>;

    async fn list_public(&self, query: AssetListQuery) -> ControllerResult<Page<Asset>>;

    /// The user's assets, public and personal
    async fn list_by_user(
        &self,
        query: AssetListQuery,
        user_id: &str,
    ) -> ControllerResult<Page<Asset>>;

    /// Name substring search. Without a user only public assets match; with
    /// one, public assets and that user's own.
    async fn search_by_name(
        &self,
        text: &str,
        asset_type: AssetType,
        user_id: Option<&str>,
    ) -> ControllerResult<Vec<Asset>>;

    async fn increment_click_count(&self, id: &str, asset_type: AssetType)
    -> ControllerResult<()>;

    /// Create a sound asset when it has no id, otherwise replace its sound blob
    async fn save_sound_asset(&self, asset: Asset, file: UploadedFile) -> ControllerResult<Asset>;

    /// Upload the frames of a sprite and register it as a new asset
    async fn upload_sprite(&self, upload: SpriteUpload) -> ControllerResult<Asset>;

    async fn update_public(
        &self,
        id: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> ControllerResult<()>;
}
