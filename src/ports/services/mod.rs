mod asset_service;
mod media_service;
mod project_service;

pub use asset_service::{AssetListQuery, AssetService};
pub use media_service::MediaService;
pub use project_service::ProjectService;
