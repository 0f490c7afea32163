pub mod adapters;
pub mod app;
pub mod controller;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    Asset,
    AssetType,
    Backend,
    // Value objects
    BlobKey,
    // Errors
    ControllerError,
    ControllerResult,
    ErrorKind,
    FormatError,
    FormatResponse,
    // Models
    Manifest,
    ManifestKind,
    Page,
    PageRequest,
    Project,
    RowStatus,
    SpriteUpload,
    UploadedFile,
    ValidationError,
    Visibility,
};

// Port types - interfaces for external systems
pub use ports::{
    AnimationEncoder,
    AssetListQuery,
    // Repository ports
    AssetRepository,
    // Service ports
    AssetService,
    // Storage ports
    BlobStore,
    CodeFormatter,
    MediaService,
    ProjectRepository,
    ProjectService,
};

// Service implementations - business logic
pub use services::{AddressCodec, AssetServiceImpl, MediaServiceImpl, ProjectServiceImpl};

// Facade
pub use controller::Controller;

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, BlobPrefixes,
    RepositoryBackend, StorageBackend, create_app_from_env, create_in_memory_app,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    formatter::GopFormatter,
    media::GifAnimationEncoder,
    persistence::{SqlAssetRepository, SqlProjectRepository, SqlStore},
    storage::ApacheObjectStoreAdapter,
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        AppBuilder, AppServices, Asset, AssetListQuery, AssetType, Controller, ControllerError,
        ControllerResult, Manifest, PageRequest, Project, SpriteUpload, UploadedFile, Visibility,
        create_in_memory_app,
    };
    pub use tokio_util::sync::CancellationToken;
}
