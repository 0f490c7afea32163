use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spx_backend::{
    app::{AppBuilder, AppConfig, BlobPrefixes, RepositoryBackend, StorageBackend},
    domain::{AssetType, PageRequest, UploadedFile},
    ports::AssetListQuery,
};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spx-cli")]
#[command(about = "Operator CLI for the spx-builder backend", long_about = None)]
struct Cli {
    /// Relational driver (mysql or sqlite)
    #[arg(long, env = "GOP_SPX_DRIVER", default_value = "mysql")]
    driver: String,

    /// Data source name, required unless --in-memory
    #[arg(long, env = "GOP_SPX_DSN")]
    dsn: Option<String>,

    /// Blob store URL (s3://bucket, file:///path, memory://), required unless --in-memory
    #[arg(long, env = "GOP_SPX_BLOBUS")]
    blob_url: Option<String>,

    /// Run against a throwaway in-memory database and blob store
    #[arg(long, conflicts_with_all = ["dsn", "blob_url"])]
    in_memory: bool,

    /// CDN prefix public URLs are built from
    #[arg(long, env = "QINIU_PATH", default_value = "http://localhost")]
    cdn_prefix: String,

    #[arg(long, env = "PROJECT_PATH", default_value = "projects")]
    project_path: String,

    #[arg(long, env = "SPRITE_PATH", default_value = "sprites")]
    sprite_path: String,

    #[arg(long, env = "SOUNDS_PATH", default_value = "sounds")]
    sounds_path: String,

    #[arg(long, env = "GIF_PATH", default_value = "gifs")]
    gif_path: String,

    /// Go+ executable used by `fmt`
    #[arg(long, env = "GOP_BINARY", default_value = "gop")]
    gop_binary: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the project and asset tables if they are missing
    Migrate,

    /// Show one project
    GetProject {
        id: String,
    },

    /// List public projects, or the projects of one user
    ListProjects {
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long, default_value = "10")]
        size: String,
    },

    /// Show one asset
    GetAsset {
        id: String,
    },

    /// List public assets, or the assets of one user
    ListAssets {
        /// 0 = sprite, 1 = background, 2 = sound
        #[arg(long = "type", default_value = "0")]
        asset_type: String,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Newest first
        #[arg(long)]
        newest: bool,
        /// Most clicked first
        #[arg(long)]
        hottest: bool,
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long, default_value = "10")]
        size: String,
    },

    /// Search assets by name
    SearchAssets {
        text: String,
        #[arg(long = "type", default_value = "0")]
        asset_type: String,
        #[arg(long)]
        user: Option<String>,
    },

    /// Compose image files into an animated GIF and upload it
    FramesToGif {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Format a Go+ source file
    Fmt {
        file: PathBuf,
    },
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let (repository_backend, storage_backend) = if self.in_memory {
            warn!("--in-memory: nothing written by this run is kept");
            (RepositoryBackend::InMemory, StorageBackend::InMemory)
        } else {
            let dsn = self
                .dsn
                .clone()
                .context("GOP_SPX_DSN (or --dsn) is required unless --in-memory is given")?;
            let url = self
                .blob_url
                .clone()
                .context("GOP_SPX_BLOBUS (or --blob-url) is required unless --in-memory is given")?;
            (
                RepositoryBackend::Database {
                    driver: self.driver.clone(),
                    dsn,
                },
                StorageBackend::Url(url),
            )
        };

        Ok(AppConfig {
            storage_backend,
            repository_backend,
            cdn_prefix: self.cdn_prefix.clone(),
            prefixes: BlobPrefixes {
                project: self.project_path.clone(),
                sprite: self.sprite_path.clone(),
                sound: self.sounds_path.clone(),
                animated: self.gif_path.clone(),
            },
            formatter_binary: self.gop_binary.clone(),
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_new(&self.log_level)
            .with_context(|| format!("invalid log level '{}'", self.log_level))?;

        // stdout carries the JSON results
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();

        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn read_upload(path: &Path) -> Result<UploadedFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedFile::new(filename, data))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    let app = AppBuilder::new()
        .with_config(cli.to_app_config()?)
        .build()
        .await
        .context("failed to initialise backend")?;
    let controller = app.controller;

    let ctx = CancellationToken::new();
    let on_interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    match cli.command {
        Commands::Migrate => {
            app.sql_store.migrate().await.context("migration failed")?;
            info!("schema is up to date");
        }
        Commands::GetProject { id } => {
            print_json(&controller.get_project(&ctx, &id).await?)?;
        }
        Commands::ListProjects { user, page, size } => {
            let page = PageRequest::parse(&page, &size)?;
            let projects = match user {
                Some(user) => controller.list_user_projects(&ctx, page, &user).await?,
                None => controller.list_public_projects(&ctx, page).await?,
            };
            print_json(&projects)?;
        }
        Commands::GetAsset { id } => {
            print_json(&controller.get_asset(&ctx, &id).await?)?;
        }
        Commands::ListAssets {
            asset_type,
            user,
            category,
            newest,
            hottest,
            page,
            size,
        } => {
            let mut query =
                AssetListQuery::new(PageRequest::parse(&page, &size)?, AssetType::parse(&asset_type)?);
            if let Some(category) = category {
                query = query.with_category(category);
            }
            if newest {
                query = query.newest_first();
            }
            if hottest {
                query = query.hottest_first();
            }
            let assets = match user {
                Some(user) => controller.list_user_assets(&ctx, query, &user).await?,
                None => controller.list_public_assets(&ctx, query).await?,
            };
            print_json(&assets)?;
        }
        Commands::SearchAssets {
            text,
            asset_type,
            user,
        } => {
            let assets = controller
                .search_assets(&ctx, &text, AssetType::parse(&asset_type)?, user.as_deref())
                .await?;
            print_json(&assets)?;
        }
        Commands::FramesToGif { files } => {
            let mut frames = Vec::with_capacity(files.len());
            for path in &files {
                frames.push(read_upload(path).await?);
            }
            let url = controller.frames_to_animated(&ctx, frames).await?;
            print_json(&serde_json::json!({ "url": url }))?;
        }
        Commands::Fmt { file } => {
            let source = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            print_json(&controller.format_code(&ctx, &source).await?)?;
        }
    }

    Ok(())
}
