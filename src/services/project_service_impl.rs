use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        errors::{ControllerError, ControllerResult},
        models::{Column, FilterCondition, Page, PageRequest, Project, UploadedFile},
        value_objects::{BlobKey, RowStatus, Visibility},
    },
    ports::{repositories::ProjectRepository, services::ProjectService, storage::BlobStore},
};

const ENTITY: &str = "project";

/// Implementation of ProjectService: rows in the repository, bundles in the blob store
#[derive(Clone)]
pub struct ProjectServiceImpl {
    repository: Arc<dyn ProjectRepository>,
    blobs: Arc<dyn BlobStore>,
    prefix: String,
}

impl ProjectServiceImpl {
    /// `prefix` is where project bundles are uploaded
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        blobs: Arc<dyn BlobStore>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            blobs,
            prefix: prefix.into(),
        }
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

    /// Load a row that has not been soft-deleted
    async fn load_active(&self, id: &str) -> ControllerResult<Project> {
        if id.is_empty() {
            return Err(Self::not_found(id));
        }
        match self.repository.find_by_id(id).await? {
            Some(project) if project.status == RowStatus::Active => Ok(project),
            _ => Err(Self::not_found(id)),
        }
    }

    fn present(&self, mut project: Project) -> Project {
        if !project.address.is_empty() {
            project.address = self.blobs.public_url(&project.address);
        }
        project
    }

    async fn delete_blob(&self, address: &str) -> ControllerResult<()> {
        if address.is_empty() {
            return Ok(());
        }
        self.blobs.delete(&BlobKey::new(address)?).await
    }

    async fn create(&self, project: Project, file: UploadedFile) -> ControllerResult<Project> {
        if project.author_id.is_empty() {
            return Err(ControllerError::bad_input("project author is required"));
        }

        let key = self.blobs.put(&self.prefix, &file.filename, file.data).await?;
        let now = Utc::now();
        let created = Project {
            id: Uuid::new_v4().to_string(),
            name: project.name,
            author_id: project.author_id,
            address: key.into_string(),
            is_public: Visibility::Personal,
            status: RowStatus::Active,
            version: 1,
            c_time: now,
            u_time: now,
        };
        self.repository.insert(&created).await?;

        info!(project_id = %created.id, user_id = %created.author_id, "created project");
        Ok(created)
    }

    async fn replace(&self, project: Project, file: UploadedFile) -> ControllerResult<Project> {
        let current = self.load_active(&project.id).await?;
        if current.author_id != project.author_id {
            return Err(Self::forbidden(&project.id, &project.author_id));
        }

        // Old bundle goes first; the row only ever points at a written blob
        self.delete_blob(&current.address).await?;
        let key = self.blobs.put(&self.prefix, &file.filename, file.data).await?;

        let updated = Project {
            id: current.id,
            name: project.name,
            author_id: current.author_id,
            address: key.into_string(),
            is_public: current.is_public,
            status: RowStatus::Active,
            version: current.version + 1,
            c_time: current.c_time,
            u_time: Utc::now(),
        };

        if !self.repository.update_content(&updated, current.version).await? {
            warn!(project_id = %updated.id, expected = current.version, "concurrent save detected");
            if let Err(e) = self.delete_blob(&updated.address).await {
                warn!(error = %e, key = %updated.address, "failed to remove unreferenced bundle");
            }
            return Err(ControllerError::Conflict {
                entity: ENTITY,
                id: updated.id,
                expected: current.version,
            });
        }

        info!(project_id = %updated.id, version = updated.version, "replaced project bundle");
        Ok(updated)
    }
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    async fn get_project(&self, id: &str) -> ControllerResult<Project> {
        let project = self.load_active(id).await?;
        Ok(self.present(project))
    }

    async fn list_public(&self, page: PageRequest) -> ControllerResult<Page<Project>> {
        let filters = vec![
            FilterCondition::eq(Column::IsPublic, Visibility::Public),
            FilterCondition::active(),
        ];
        let page = self.repository.find_page(page, filters, Vec::new()).await?;
        page.try_map(|p| Ok(self.present(p)))
    }

    async fn list_by_user(
        &self,
        page: PageRequest,
        user_id: &str,
    ) -> ControllerResult<Page<Project>> {
        let filters = vec![
            FilterCondition::eq(Column::AuthorId, user_id),
            FilterCondition::active(),
        ];
        let page = self.repository.find_page(page, filters, Vec::new()).await?;
        page.try_map(|p| Ok(self.present(p)))
    }

    async fn save_project(
        &self,
        project: Project,
        file: UploadedFile,
    ) -> ControllerResult<Project> {
        if project.is_new() {
            self.create(project, file).await
        } else {
            self.replace(project, file).await
        }
    }

    async fn delete_project(&self, id: &str, user_id: &str) -> ControllerResult<()> {
        let current = self.load_active(id).await?;
        if current.author_id != user_id {
            return Err(Self::forbidden(id, user_id));
        }

        self.delete_blob(&current.address).await?;
        if !self.repository.delete(id, user_id).await? {
            return Err(Self::not_found(id));
        }

        info!(project_id = %id, user_id = %user_id, "deleted project");
        Ok(())
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
            debug!(project_id = %id, ?visibility, "changed project visibility");
            return Ok(());
        }

        // Nothing matched: find out whether the row is missing or someone else's
        self.load_active(id).await?;
        Err(Self::forbidden(id, user_id))
    }
}
