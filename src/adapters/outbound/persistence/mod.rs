pub mod error;
pub mod sql_asset_repository;
pub mod sql_project_repository;
pub mod sql_store;

pub use sql_asset_repository::SqlAssetRepository;
pub use sql_project_repository::SqlProjectRepository;
pub use sql_store::{Record, SqlStore};
