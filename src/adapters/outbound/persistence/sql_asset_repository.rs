use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Row, any::AnyRow};
use tracing::debug;

use crate::{
    adapters::outbound::persistence::sql_store::{
        Record, SqlStore, select_list, timestamp_from_column, timestamp_to_column,
        unsigned_from_column,
    },
    domain::{
        errors::{ControllerError, ControllerResult},
        models::{
            Asset, Column, FilterCondition, OrderByCondition, Page, PageRequest, SqlValue,
            escape_like,
        },
        value_objects::{AssetType, RowStatus, Visibility},
    },
    ports::repositories::AssetRepository,
    services::AddressCodec,
};

impl Record for Asset {
    const TABLE: &'static str = "asset";
    const ENTITY: &'static str = "asset";
    const COLUMNS: &'static [Column] = &[
        Column::Id,
        Column::Name,
        Column::AuthorId,
        Column::Category,
        Column::IsPublic,
        Column::Address,
        Column::AssetType,
        Column::ClickCount,
        Column::Status,
        Column::CTime,
        Column::UTime,
    ];
    // click_count only ever moves through increment_click_count
    const MUTABLE: &'static [Column] = &[
        Column::Name,
        Column::Category,
        Column::IsPublic,
        Column::Address,
        Column::UTime,
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &AnyRow) -> ControllerResult<Self> {
        let address: String = row.try_get("address")?;
        let is_public: i64 = row.try_get("is_public")?;
        let asset_type: String = row.try_get("asset_type")?;
        let c_time: String = row.try_get("c_time")?;
        let u_time: String = row.try_get("u_time")?;
        let status: i64 = row.try_get("status")?;
        Ok(Asset {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            author_id: row.try_get("author_id")?,
            category: row.try_get("category")?,
            is_public: Visibility::try_from(is_public)
                .map_err(|e| ControllerError::internal(e.to_string()))?,
            address: AddressCodec::decode(&address)?,
            asset_type: AssetType::parse(asset_type.trim())
                .map_err(|e| ControllerError::internal(e.to_string()))?,
            click_count: unsigned_from_column(row.try_get("click_count")?, Column::ClickCount)?,
            status: RowStatus::try_from(status)
                .map_err(|e| ControllerError::internal(e.to_string()))?,
            c_time: timestamp_from_column(&c_time)?,
            u_time: timestamp_from_column(&u_time)?,
        })
    }

    fn value_of(&self, column: Column) -> Option<SqlValue> {
        match column {
            Column::Id => Some(self.id.clone().into()),
            Column::Name => Some(self.name.clone().into()),
            Column::AuthorId => Some(self.author_id.clone().into()),
            Column::Category => Some(self.category.clone().into()),
            Column::IsPublic => Some(self.is_public.into()),
            // an unencodable manifest surfaces as a missing value on insert
            Column::Address => AddressCodec::encode(&self.address).ok().map(SqlValue::Text),
            Column::AssetType => Some(self.asset_type.into()),
            Column::ClickCount => i64::try_from(self.click_count).ok().map(SqlValue::Int),
            Column::Status => Some(self.status.into()),
            Column::CTime => Some(timestamp_to_column(&self.c_time)),
            Column::UTime => Some(timestamp_to_column(&self.u_time)),
            _ => None,
        }
    }
}

/// SQL-based implementation of AssetRepository
#[derive(Clone)]
pub struct SqlAssetRepository {
    store: SqlStore,
}

impl SqlAssetRepository {
    pub fn new(store: SqlStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AssetRepository for SqlAssetRepository {
    async fn find_by_id(&self, id: &str) -> ControllerResult<Option<Asset>> {
        self.store.query_by_id(id).await
    }

    async fn find_page(
        &self,
        page: PageRequest,
        filters: Vec<FilterCondition>,
        orders: Vec<OrderByCondition>,
    ) -> ControllerResult<Page<Asset>> {
        self.store.query_by_page(page, &filters, &orders).await
    }

    async fn insert(&self, asset: &Asset) -> ControllerResult<()> {
        self.store.insert(asset).await
    }

    async fn update(&self, asset: &Asset) -> ControllerResult<bool> {
        let guards = [FilterCondition::eq(Column::AuthorId, asset.author_id.as_str())];
        let changed = self.store.update(asset, &guards).await?;
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
            .update_field::<Asset>(id, Column::IsPublic, visibility.into(), &guards)
            .await?;
        Ok(changed > 0)
    }

    async fn increment_click_count(
        &self,
        id: &str,
        asset_type: AssetType,
    ) -> ControllerResult<bool> {
        let changed = self
            .store
            .exec_raw(
                "UPDATE asset SET click_count = click_count + 1 WHERE id = ? AND asset_type = ?",
                &[SqlValue::from(id), asset_type.into()],
            )
            .await?;
        Ok(changed > 0)
    }

    async fn search_by_name(
        &self,
        text: &str,
        asset_type: AssetType,
        user_id: Option<&str>,
    ) -> ControllerResult<Vec<Asset>> {
        let mut args = vec![
            SqlValue::Text(format!("%{}%", escape_like(text))),
            asset_type.into(),
            RowStatus::Active.into(),
            Visibility::Public.into(),
        ];
        let visibility = match user_id {
            Some(user_id) => {
                args.push(SqlValue::from(user_id));
                "(is_public = ? OR author_id = ?)"
            }
            None => "is_public = ?",
        };
        let sql = format!(
            "SELECT {} FROM asset WHERE name LIKE ? ESCAPE '!' AND asset_type = ? \
             AND status = ? AND {} ORDER BY id ASC",
            select_list(<Asset as Record>::COLUMNS),
            visibility
        );
        debug!(sql = %sql, "asset search");

        self.store.search::<Asset>(&sql, &args).try_collect().await
    }
}
