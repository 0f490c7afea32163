use async_trait::async_trait;

use crate::domain::{
    errors::ControllerResult,
    models::{Page, PageRequest, Project, UploadedFile},
    value_objects::Visibility,
};

/// Service port for project management
#[async_trait]
pub trait ProjectService: Send + Sync + 'static {
    /// Get an active project with its address turned into a public URL
    async fn get_project(&self, id: &str) -> ControllerResult<Project>;

    /// Public projects, ordered by id
    async fn list_public(&self, page: PageRequest) -> ControllerResult<Page<Project>>;

    /// Every project authored by `user_id`, public or not
    async fn list_by_user(&self, page: PageRequest, user_id: &str)
    -> ControllerResult<Page<Project>>;

    /// Create the project when it has no id, otherwise replace its bundle and
    /// bump its version. The caller is identified by `project.author_id`.
    async fn save_project(
        &self,
        project: Project,
        file: UploadedFile,
    ) -> ControllerResult<Project>;

    /// Delete the bundle and then the row
    async fn delete_project(&self, id: &str, user_id: &str) -> ControllerResult<()>;

    async fn update_public(
        &self,
        id: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> ControllerResult<()>;
}
