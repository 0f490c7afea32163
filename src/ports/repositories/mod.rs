mod asset_repository;
mod project_repository;

pub use asset_repository::AssetRepository;
pub use project_repository::ProjectRepository;
