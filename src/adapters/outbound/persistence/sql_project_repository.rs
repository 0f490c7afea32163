use async_trait::async_trait;
use sqlx::{Row, any::AnyRow};

use crate::{
    adapters::outbound::persistence::sql_store::{
        Record, SqlStore, timestamp_from_column, timestamp_to_column,
    },
    domain::{
        errors::{ControllerError, ControllerResult},
        models::{Column, FilterCondition, OrderByCondition, Page, PageRequest, Project, SqlValue},
        value_objects::{RowStatus, Visibility},
    },
    ports::repositories::ProjectRepository,
};

impl Record for Project {
    const TABLE: &'static str = "project";
    const ENTITY: &'static str = "project";
    const COLUMNS: &'static [Column] = &[
        Column::Id,
        Column::Name,
        Column::AuthorId,
        Column::Address,
        Column::IsPublic,
        Column::Status,
        Column::Version,
        Column::CTime,
        Column::UTime,
    ];
    const MUTABLE: &'static [Column] =
        &[Column::Name, Column::Address, Column::Version, Column::UTime];

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &AnyRow) -> ControllerResult<Self> {
        let is_public: i64 = row.try_get("is_public")?;
        let status: i64 = row.try_get("status")?;
        let c_time: String = row.try_get("c_time")?;
        let u_time: String = row.try_get("u_time")?;
        Ok(Project {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            author_id: row.try_get("author_id")?,
            address: row.try_get("address")?,
            is_public: Visibility::try_from(is_public)
                .map_err(|e| ControllerError::internal(e.to_string()))?,
            status: RowStatus::try_from(status)
                .map_err(|e| ControllerError::internal(e.to_string()))?,
            version: row.try_get("version")?,
            c_time: timestamp_from_column(&c_time)?,
            u_time: timestamp_from_column(&u_time)?,
        })
    }

    fn value_of(&self, column: Column) -> Option<SqlValue> {
        match column {
            Column::Id => Some(self.id.clone().into()),
            Column::Name => Some(self.name.clone().into()),
            Column::AuthorId => Some(self.author_id.clone().into()),
            Column::Address => Some(self.address.clone().into()),
            Column::IsPublic => Some(self.is_public.into()),
            Column::Status => Some(self.status.into()),
            Column::Version => Some(self.version.into()),
            Column::CTime => Some(timestamp_to_column(&self.c_time)),
            Column::UTime => Some(timestamp_to_column(&self.u_time)),
            _ => None,
        }
    }
}

/// SQL-based implementation of ProjectRepository
#[derive(Clone)]
pub struct SqlProjectRepository {
    store: SqlStore,
}

impl SqlProjectRepository {
    pub fn new(store: SqlStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProjectRepository for SqlProjectRepository {
    async fn find_by_id(&self, id: &str) -> ControllerResult<Option<Project>> {
        self.store.query_by_id(id).await
    }

    async fn find_page(
        &self,
        page: PageRequest,
        filters: Vec<FilterCondition>,
        orders: Vec<OrderByCondition>,
    ) -> ControllerResult<Page<Project>> {
        self.store.query_by_page(page, &filters, &orders).await
    }

    async fn insert(&self, project: &Project) -> ControllerResult<()> {
        self.store.insert(project).await
    }

    async fn update_content(
        &self,
        project: &Project,
        expected_version: i64,
    ) -> ControllerResult<bool> {
        let guards = [FilterCondition::eq(Column::Version, expected_version)];
        let changed = self.store.update(project, &guards).await?;
        Ok(changed > 0)
    }

    async fn update_visibility(
        &self,
        id: &str,
        author_id: &str,
        visibility: Visibility,
    ) -> ControllerResult<bool> {
        let guards = [
            FilterCondition::eq(Column::AuthorId, author_id),
            FilterCondition::active(),
        ];
        let changed = self
            .store
            .update_field::<Project>(id, Column::IsPublic, visibility.into(), &guards)
            .await?;
        Ok(changed > 0)
    }

    async fn delete(&self, id: &str, author_id: &str) -> ControllerResult<bool> {
        let guards = [FilterCondition::eq(Column::AuthorId, author_id)];
        let changed = self.store.delete_by_id::<Project>(id, &guards).await?;
        Ok(changed > 0)
    }
}
