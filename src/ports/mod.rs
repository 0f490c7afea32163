pub mod repositories;
pub mod services;
pub mod storage;
pub mod toolchain;

// Re-export all port traits for convenience
pub use repositories::{AssetRepository, ProjectRepository};
pub use services::{AssetListQuery, AssetService, MediaService, ProjectService};
pub use storage::BlobStore;
pub use toolchain::{AnimationEncoder, CodeFormatter};
