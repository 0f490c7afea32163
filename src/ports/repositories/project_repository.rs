use async_trait::async_trait;

use crate::domain::{
    errors::ControllerResult,
    models::{FilterCondition, OrderByCondition, Page, PageRequest, Project},
    value_objects::Visibility,
};

/// Repository for project rows. Blob bytes live in the blob store, never here.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Load a project by id, whatever its status
    async fn find_by_id(&self, id: &str) -> ControllerResult<Option<Project>>;

    /// Page through projects matching all `filters`, sorted by `orders` then id
    async fn find_page(
        &self,
        page: PageRequest,
        filters: Vec<FilterCondition>,
        orders: Vec<OrderByCondition>,
    ) -> ControllerResult<Page<Project>>;

    async fn insert(&self, project: &Project) -> ControllerResult<()>;

    /// Write name, address, version and update time, provided the stored
    /// version still equals `expected_version`. Returns false otherwise.
    async fn update_content(&self, project: &Project, expected_version: i64)
    -> ControllerResult<bool>;

    /// Set `is_public` on a row owned by `author_id`. Returns false when no
    /// such row exists.
    async fn update_visibility(
        &self,
        id: &str,
        author_id: &str,
        visibility: Visibility,
    ) -> ControllerResult<bool>;

    /// Remove a row owned by `author_id`. Returns false when no such row exists.
    async fn delete(&self, id: &str, author_id: &str) -> ControllerResult<bool>;
}
