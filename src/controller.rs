use std::{future::Future, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::{
    domain::{
        errors::{ControllerError, ControllerResult},
        models::{Asset, FormatResponse, Page, PageRequest, Project, SpriteUpload, UploadedFile},
        value_objects::{AssetType, Visibility},
    },
    ports::{
        services::{AssetListQuery, AssetService, MediaService, ProjectService},
        toolchain::CodeFormatter,
    },
};

/// Single entry point for every backend operation.
///
/// Each call takes the caller's [`CancellationToken`]. Cancelling it drops
/// the in-flight work, which aborts pending driver I/O and kills any
/// formatter subprocess, and the call returns [`ControllerError::Canceled`].
/// Work already committed is not rolled back.
#[derive(Clone)]
pub struct Controller {
    projects: Arc<dyn ProjectService>,
    assets: Arc<dyn AssetService>,
    media: Arc<dyn MediaService>,
    formatter: Arc<dyn CodeFormatter>,
}

impl Controller {
    pub fn new(
        projects: Arc<dyn ProjectService>,
        assets: Arc<dyn AssetService>,
        media: Arc<dyn MediaService>,
        formatter: Arc<dyn CodeFormatter>,
    ) -> Self {
        Self {
            projects,
            assets,
            media,
            formatter,
        }
    }

    async fn run<T, F>(ctx: &CancellationToken, op: F) -> ControllerResult<T>
    where
        F: Future<Output = ControllerResult<T>>,
    {
        if ctx.is_cancelled() {
            return Err(ControllerError::Canceled);
        }
        tokio::select! {
            biased;
            _ = ctx.cancelled() => {
                debug!("operation canceled by caller");
                Err(ControllerError::Canceled)
            }
            result = op => result,
        }
    }

    // Projects

    #[instrument(skip_all, fields(project_id = %id))]
    pub async fn get_project(&self, ctx: &CancellationToken, id: &str) -> ControllerResult<Project> {
        Self::run(ctx, self.projects.get_project(id)).await
    }

    #[instrument(skip_all, fields(page = page.index(), size = page.size()))]
    pub async fn list_public_projects(
        &self,
        ctx: &CancellationToken,
        page: PageRequest,
    ) -> ControllerResult<Page<Project>> {
        Self::run(ctx, self.projects.list_public(page)).await
    }

    #[instrument(skip_all, fields(user_id = %user_id, page = page.index()))]
    pub async fn list_user_projects(
        &self,
        ctx: &CancellationToken,
        page: PageRequest,
        user_id: &str,
    ) -> ControllerResult<Page<Project>> {
        Self::run(ctx, self.projects.list_by_user(page, user_id)).await
    }

    #[instrument(skip_all, fields(project_id = %project.id, user_id = %project.author_id, size = file.data.len()))]
    pub async fn save_project(
        &self,
        ctx: &CancellationToken,
        project: Project,
        file: UploadedFile,
    ) -> ControllerResult<Project> {
        Self::run(ctx, self.projects.save_project(project, file)).await
    }

    #[instrument(skip_all, fields(project_id = %id, user_id = %user_id))]
    pub async fn delete_project(
        &self,
        ctx: &CancellationToken,
        id: &str,
        user_id: &str,
    ) -> ControllerResult<()> {
        Self::run(ctx, self.projects.delete_project(id, user_id)).await
    }

    #[instrument(skip_all, fields(project_id = %id, user_id = %user_id, ?visibility))]
    pub async fn update_project_public(
        &self,
        ctx: &CancellationToken,
        id: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> ControllerResult<()> {
        Self::run(ctx, self.projects.update_public(id, visibility, user_id)).await
    }

    // Assets

    #[instrument(skip_all, fields(asset_id = %id))]
    pub async fn get_asset(&self, ctx: &CancellationToken, id: &str) -> ControllerResult<Asset> {
        Self::run(ctx, self.assets.get_asset(id)).await
    }

    #[instrument(skip_all, fields(asset_type = ?query.asset_type, page = query.page.index()))]
    pub async fn list_public_assets(
        &self,
        ctx: &CancellationToken,
        query: AssetListQuery,
    ) -> ControllerResult<Page<Asset>> {
        Self::run(ctx, self.assets.list_public(query)).await
    }

    #[instrument(skip_all, fields(user_id = %user_id, asset_type = ?query.asset_type))]
    pub async fn list_user_assets(
        &self,
        ctx: &CancellationToken,
        query: AssetListQuery,
        user_id: &str,
    ) -> ControllerResult<Page<Asset>> {
        Self::run(ctx, self.assets.list_by_user(query, user_id)).await
    }

    #[instrument(skip_all, fields(query = %text, ?asset_type, user_id = ?user_id))]
    pub async fn search_assets(
        &self,
        ctx: &CancellationToken,
        text: &str,
        asset_type: AssetType,
        user_id: Option<&str>,
    ) -> ControllerResult<Vec<Asset>> {
        Self::run(ctx, self.assets.search_by_name(text, asset_type, user_id)).await
    }

    #[instrument(skip_all, fields(asset_id = %id, ?asset_type))]
    pub async fn increment_click_count(
        &self,
        ctx: &CancellationToken,
        id: &str,
        asset_type: AssetType,
    ) -> ControllerResult<()> {
        Self::run(ctx, self.assets.increment_click_count(id, asset_type)).await
    }

    #[instrument(skip_all, fields(asset_id = %asset.id, user_id = %asset.author_id, size = file.data.len()))]
    pub async fn save_sound_asset(
        &self,
        ctx: &CancellationToken,
        asset: Asset,
        file: UploadedFile,
    ) -> ControllerResult<Asset> {
        Self::run(ctx, self.assets.save_sound_asset(asset, file)).await
    }

    #[instrument(skip_all, fields(user_id = %upload.author_id, frames = upload.files.len()))]
    pub async fn upload_sprite(
        &self,
        ctx: &CancellationToken,
        upload: SpriteUpload,
    ) -> ControllerResult<Asset> {
        Self::run(ctx, self.assets.upload_sprite(upload)).await
    }

    #[instrument(skip_all, fields(asset_id = %id, user_id = %user_id, ?visibility))]
    pub async fn update_asset_public(
        &self,
        ctx: &CancellationToken,
        id: &str,
        visibility: Visibility,
        user_id: &str,
    ) -> ControllerResult<()> {
        Self::run(ctx, self.assets.update_public(id, visibility, user_id)).await
    }

    // Media and tooling

    #[instrument(skip_all, fields(frames = frames.len()))]
    pub async fn frames_to_animated(
        &self,
        ctx: &CancellationToken,
        frames: Vec<UploadedFile>,
    ) -> ControllerResult<String> {
        Self::run(ctx, self.media.frames_to_animated(frames)).await
    }

    #[instrument(skip_all, fields(size = source.len()))]
    pub async fn format_code(
        &self,
        ctx: &CancellationToken,
        source: &str,
    ) -> ControllerResult<FormatResponse> {
        Self::run(ctx, self.formatter.format(source)).await
    }
}
