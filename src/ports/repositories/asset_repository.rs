use async_trait::async_trait;

use crate::domain::{
    errors::ControllerResult,
    models::{Asset, FilterCondition, OrderByCondition, Page, PageRequest},
    value_objects::{AssetType, Visibility},
};

/// Repository for asset rows. Manifests are stored in their relative form.
#[async_trait]
pub trait AssetRepository: Send + Sync + 'static {
    /// Load an asset by id, whatever its status
    async fn find_by_id(&self, id: &str) -> ControllerResult<Option<Asset>>;

    /// Page through assets matching all `filters`, sorted by `orders` then id
    async fn find_page(
        &self,
        page: PageRequest,
        filters: Vec<FilterCondition>,
        orders: Vec<OrderByCondition>,
    ) -> ControllerResult<Page<Asset>>;

    async fn insert(&self, asset: &Asset) -> ControllerResult<()>;

    /// Rewrite every mutable column of an existing row. Returns false when
    /// the row is gone.
    async fn update(&self, asset: &Asset) -> ControllerResult<bool>;

    /// Set `is_public` on a row owned by `author_id`
    async fn update_visibility(
        &self,
        id: &str,
        author_id: &str,
        visibility: Visibility,
    ) -> ControllerResult<bool>;

    /// Atomically add one to the click counter. Returns false when no row matched.
    async fn increment_click_count(&self, id: &str, asset_type: AssetType)
    -> ControllerResult<bool>;

    /// Active assets of `asset_type` whose name contains `text` literally and
    /// that are public, or owned by `user_id` when one is given
    async fn search_by_name(
        &self,
        text: &str,
        asset_type: AssetType,
        user_id: Option<&str>,
    ) -> ControllerResult<Vec<Asset>>;
}
