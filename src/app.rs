use object_store::memory::InMemory;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    adapters::outbound::{
        formatter::GopFormatter,
        media::GifAnimationEncoder,
        persistence::{SqlAssetRepository, SqlProjectRepository, SqlStore},
        storage::ApacheObjectStoreAdapter,
    },
    controller::Controller,
    ports::{
        repositories::{AssetRepository, ProjectRepository},
        storage::BlobStore,
        toolchain::{AnimationEncoder, CodeFormatter},
    },
    services::{AddressCodec, AssetServiceImpl, MediaServiceImpl, ProjectServiceImpl},
};

/// Default relational driver
pub const DEFAULT_DRIVER: &str = "mysql";

/// Key prefixes inside the blob store, one per kind of upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobPrefixes {
    pub project: String,
    pub sprite: String,
    pub sound: String,
    pub animated: String,
}

impl Default for BlobPrefixes {
    fn default() -> Self {
        Self {
            project: "projects".to_string(),
            sprite: "sprites".to_string(),
            sound: "sounds".to_string(),
            animated: "gifs".to_string(),
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    /// Public base URL blobs are served under
    pub cdn_prefix: String,
    pub prefixes: BlobPrefixes,
    /// Go+ toolchain executable used by the formatter
    pub formatter_binary: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            cdn_prefix: "http://localhost/".to_string(),
            prefixes: BlobPrefixes::default(),
            formatter_binary: "gop".to_string(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    ///
    /// | variable         | meaning                         | default        |
    /// |------------------|---------------------------------|----------------|
    /// | `GOP_SPX_DRIVER` | relational driver               | `mysql`        |
    /// | `GOP_SPX_DSN`    | data source name                | required       |
    /// | `GOP_SPX_BLOBUS` | blob store URL                  | required       |
    /// | `QINIU_PATH`     | CDN prefix for public URLs      | required       |
    /// | `PROJECT_PATH`, `SPRITE_PATH`, `SOUNDS_PATH`, `GIF_PATH` | key prefixes | see [`BlobPrefixes`] |
    /// | `GOP_BINARY`     | formatter executable            | `gop`          |
    ///
    /// In-memory backends are never chosen here; build them through
    /// [`AppBuilder`] or [`create_in_memory_app`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = BlobPrefixes::default();

        let required = |name: &str| {
            var(name).ok_or_else(|| AppError::Configuration {
                message: format!("{} environment variable required", name),
            })
        };

        let repository_backend = RepositoryBackend::Database {
            driver: var("GOP_SPX_DRIVER").unwrap_or_else(|| DEFAULT_DRIVER.to_string()),
            dsn: required("GOP_SPX_DSN")?,
        };
        let storage_backend = StorageBackend::Url(required("GOP_SPX_BLOBUS")?);
        let cdn_prefix = required("QINIU_PATH")?;

        Ok(Self {
            storage_backend,
            repository_backend,
            cdn_prefix,
            prefixes: BlobPrefixes {
                project: var("PROJECT_PATH").unwrap_or(defaults.project),
                sprite: var("SPRITE_PATH").unwrap_or(defaults.sprite),
                sound: var("SOUNDS_PATH").unwrap_or(defaults.sound),
                animated: var("GIF_PATH").unwrap_or(defaults.animated),
            },
            formatter_binary: var("GOP_BINARY").unwrap_or_else(|| "gop".to_string()),
        })
    }
}

/// Storage backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    /// Any URL `object_store` understands: `s3://`, `file://`, `memory://`, ...
    Url(String),
}

/// Repository backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryBackend {
    /// Private SQLite database living as long as the process
    InMemory,
    Database { driver: String, dsn: String },
}

/// Application dependencies container
pub struct AppDependencies {
    pub codec: AddressCodec,
    pub sql_store: SqlStore,
    pub blob_store: Arc<dyn BlobStore>,
    pub project_repository: Arc<dyn ProjectRepository>,
    pub asset_repository: Arc<dyn AssetRepository>,
    pub encoder: Arc<dyn AnimationEncoder>,
    pub formatter: Arc<dyn CodeFormatter>,
}

/// Application services container
pub struct AppServices {
    pub controller: Controller,
    pub codec: AddressCodec,
    pub sql_store: SqlStore,
    pub blob_store: Arc<dyn BlobStore>,
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    pub fn with_cdn_prefix(mut self, cdn_prefix: impl Into<String>) -> Self {
        self.config.cdn_prefix = cdn_prefix.into();
        self
    }

    pub fn with_prefixes(mut self, prefixes: BlobPrefixes) -> Self {
        self.config.prefixes = prefixes;
        self
    }

    pub fn with_formatter_binary(mut self, binary: impl Into<String>) -> Self {
        self.config.formatter_binary = binary.into();
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the application dependencies. Fails unless both stores open.
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let codec = AddressCodec::new(self.config.cdn_prefix.clone());
        let blob_store = self.create_blob_store(&codec)?;
        let sql_store = self.create_sql_store().await?;

        let project_repository = Arc::new(SqlProjectRepository::new(sql_store.clone()));
        let asset_repository = Arc::new(SqlAssetRepository::new(sql_store.clone()));

        Ok(AppDependencies {
            codec,
            sql_store,
            blob_store,
            project_repository,
            asset_repository,
            encoder: Arc::new(GifAnimationEncoder::new()),
            formatter: Arc::new(GopFormatter::new(&self.config.formatter_binary)),
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let prefixes = self.config.prefixes.clone();
        let deps = self.build_dependencies().await?;

        // Create services with dependency injection
        let project_service = ProjectServiceImpl::new(
            deps.project_repository.clone(),
            deps.blob_store.clone(),
            prefixes.project,
        );

        let asset_service = AssetServiceImpl::new(
            deps.asset_repository.clone(),
            deps.blob_store.clone(),
            deps.codec.clone(),
        )
        .with_sprite_prefix(prefixes.sprite)
        .with_sound_prefix(prefixes.sound);

        let media_service = MediaServiceImpl::new(
            deps.encoder.clone(),
            deps.blob_store.clone(),
            prefixes.animated,
        );

        let controller = Controller::new(
            Arc::new(project_service),
            Arc::new(asset_service),
            Arc::new(media_service),
            deps.formatter.clone(),
        );

        Ok(AppServices {
            controller,
            codec: deps.codec,
            sql_store: deps.sql_store,
            blob_store: deps.blob_store,
        })
    }

    /// Create the blob store adapter based on configuration
    fn create_blob_store(&self, codec: &AddressCodec) -> Result<Arc<dyn BlobStore>, AppError> {
        match &self.config.storage_backend {
            StorageBackend::InMemory => {
                let store = Arc::new(InMemory::new());
                Ok(Arc::new(ApacheObjectStoreAdapter::new(store, codec.clone())))
            }
            StorageBackend::Url(url) => {
                let adapter = ApacheObjectStoreAdapter::from_url(url, codec.clone()).map_err(
                    |e| AppError::StorageInit {
                        message: format!("{}: {}", url, e),
                    },
                )?;
                info!(url = %url, "blob store ready");
                Ok(Arc::new(adapter))
            }
        }
    }

    /// Open the relational store based on configuration
    async fn create_sql_store(&self) -> Result<SqlStore, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => {
                warn!("using an in-memory database; data is lost on exit");
                SqlStore::in_memory()
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: e.to_string(),
                    })
            }
            RepositoryBackend::Database { driver, dsn } => {
                let store = SqlStore::connect(driver, dsn).await.map_err(|e| {
                    AppError::RepositoryInit {
                        message: format!("{} connection failed: {}", driver, e),
                    }
                })?;
                info!(driver = %driver, "database ready");
                Ok(store)
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    let config = AppConfig::from_env()?;
    AppBuilder::new().with_config(config).build().await
}
