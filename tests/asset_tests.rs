use bytes::Bytes;
use chrono::{Duration, Utc};
use futures::future::join_all;
use spx_backend::{
    AppBuilder, AppServices, Asset, AssetListQuery, AssetRepository, AssetType, BlobKey,
    BlobStore, ControllerError, Manifest, ManifestKind, PageRequest, RepositoryBackend, RowStatus,
    SpriteUpload, SqlAssetRepository, UploadedFile, Visibility,
};
use tokio_util::sync::CancellationToken;

const CDN: &str = "https://cdn.example.com";

async fn app() -> AppServices {
    AppBuilder::new().with_cdn_prefix(CDN).build().await.unwrap()
}

fn frame(name: &str) -> UploadedFile {
    UploadedFile::new(name, Bytes::from(format!("bytes of {name}")))
}

fn sprite(files: Vec<UploadedFile>, animated_url: Option<&str>) -> SpriteUpload {
    SpriteUpload {
        name: "s".to_string(),
        files,
        animated_url: animated_url.map(str::to_string),
        author_id: "u1".to_string(),
        category: "cat".to_string(),
        is_public: Visibility::Public,
    }
}

/// Row written straight to the table, bypassing the services
fn row(id: &str, name: &str, author: &str, visibility: Visibility) -> Asset {
    let now = Utc::now();
    Asset {
        id: id.to_string(),
        name: name.to_string(),
        author_id: author.to_string(),
        category: "animals".to_string(),
        is_public: visibility,
        address: Manifest::single_image(format!("sprites/{id}.png")),
        asset_type: AssetType::Sprite,
        click_count: 0,
        status: RowStatus::Active,
        c_time: now,
        u_time: now,
    }
}

fn all_urls(manifest: &Manifest) -> Vec<&str> {
    manifest
        .assets
        .values()
        .map(String::as_str)
        .chain([manifest.index_json.as_str(), manifest.url.as_str()])
        .filter(|u| !u.is_empty())
        .collect()
}

#[tokio::test]
async fn sprite_ingest_with_frames() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let animated = format!("{CDN}/gifs/x.gif");

    let asset = app
        .controller
        .upload_sprite(
            &ctx,
            sprite(vec![frame("f1.png"), frame("f2.png"), frame("f3.png")], Some(&animated)),
        )
        .await
        .unwrap();
    assert_eq!(asset.is_public, Visibility::Public);
    assert_eq!(asset.asset_type, AssetType::Sprite);
    assert_eq!(asset.click_count, 0);

    // the stored manifest keeps relative keys
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    let stored = repository.find_by_id(&asset.id).await.unwrap().unwrap();
    let manifest = &stored.address;
    assert_eq!(manifest.kind, ManifestKind::Gif);
    assert_eq!(manifest.index_json, "index.json");
    assert_eq!(manifest.url, "gifs/x.gif");
    let slots: Vec<_> = manifest.assets.keys().cloned().collect();
    assert_eq!(slots, vec!["image0", "image1", "image2"]);
    for key in manifest.assets.values() {
        assert!(key.starts_with("sprites/"));
        assert!(app.blob_store.exists(&BlobKey::new(key.clone()).unwrap()).await.unwrap());
    }
}

#[tokio::test]
async fn sprite_ingest_single_image() {
    let app = app().await;
    let ctx = CancellationToken::new();

    let asset = app
        .controller
        .upload_sprite(&ctx, sprite(vec![frame("only.png")], None))
        .await
        .unwrap();
    assert_eq!(asset.address.kind, ManifestKind::Image);
    assert_eq!(asset.address.index_json, format!("{CDN}/index.json"));
    assert!(asset.address.assets["image"].starts_with(&format!("{CDN}/sprites/")));
    assert_eq!(asset.address.url, "");
}

#[tokio::test]
async fn sprite_ingest_rejects_bad_input() {
    let app = app().await;
    let ctx = CancellationToken::new();

    let empty = app.controller.upload_sprite(&ctx, sprite(Vec::new(), None)).await;
    assert!(matches!(empty, Err(ControllerError::BadInput { .. })));

    let no_preview = app
        .controller
        .upload_sprite(&ctx, sprite(vec![frame("a.png"), frame("b.png")], None))
        .await;
    assert!(matches!(no_preview, Err(ControllerError::BadInput { .. })));

    let foreign = app
        .controller
        .upload_sprite(
            &ctx,
            sprite(
                vec![frame("a.png"), frame("b.png")],
                Some("https://elsewhere.example.com/gifs/x.gif"),
            ),
        )
        .await;
    assert!(matches!(foreign, Err(ControllerError::BadInput { .. })));
}

#[tokio::test]
async fn reads_rewrite_addresses_exactly_once() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let animated = format!("{CDN}/gifs/x.gif");
    let created = app
        .controller
        .upload_sprite(&ctx, sprite(vec![frame("a.png"), frame("b.png")], Some(&animated)))
        .await
        .unwrap();

    let read = app.controller.get_asset(&ctx, &created.id).await.unwrap();
    for url in all_urls(&read.address) {
        assert!(url.starts_with(&format!("{CDN}/")), "{url}");
        assert_eq!(url.matches(CDN).count(), 1, "{url}");
    }
    assert_eq!(read.address.url, animated);
    assert_eq!(read.address, created.address);

    // reading twice does not stack prefixes
    let again = app.controller.get_asset(&ctx, &created.id).await.unwrap();
    assert_eq!(again.address, read.address);
}

#[tokio::test]
async fn search_respects_visibility() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    repository.insert(&row("a", "A", "u1", Visibility::Public)).await.unwrap();
    repository.insert(&row("b", "B", "u2", Visibility::Personal)).await.unwrap();

    let ids = |assets: Vec<Asset>| assets.into_iter().map(|a| a.id).collect::<Vec<_>>();

    let anonymous = app.controller.search_assets(&ctx, "", AssetType::Sprite, None).await.unwrap();
    assert_eq!(ids(anonymous), vec!["a"]);

    let owner = app
        .controller
        .search_assets(&ctx, "", AssetType::Sprite, Some("u2"))
        .await
        .unwrap();
    assert_eq!(ids(owner), vec!["a", "b"]);

    let other = app
        .controller
        .search_assets(&ctx, "", AssetType::Sprite, Some("u1"))
        .await
        .unwrap();
    assert_eq!(ids(other), vec!["a"]);

    let hits = app.controller.search_assets(&ctx, "A", AssetType::Sprite, None).await.unwrap();
    assert!(hits[0].address.assets["image"].starts_with(CDN));
}

#[tokio::test]
async fn click_count_increments_sequentially() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    repository.insert(&row("a", "A", "u1", Visibility::Public)).await.unwrap();

    for _ in 0..5 {
        app.controller
            .increment_click_count(&ctx, "a", AssetType::Sprite)
            .await
            .unwrap();
    }
    let read = app.controller.get_asset(&ctx, "a").await.unwrap();
    assert_eq!(read.click_count, 5);

    let wrong_type = app
        .controller
        .increment_click_count(&ctx, "a", AssetType::Sound)
        .await;
    assert!(matches!(wrong_type, Err(ControllerError::NotFound { .. })));
}

#[tokio::test]
async fn click_count_increments_concurrently() {
    // a file-backed database so the increments really run on separate connections
    let dir = tempfile::tempdir().unwrap();
    let dsn = format!("sqlite://{}?mode=rwc", dir.path().join("spx.db").display());
    let app = AppBuilder::new()
        .with_cdn_prefix(CDN)
        .with_repository_backend(RepositoryBackend::Database {
            driver: "sqlite".to_string(),
            dsn,
        })
        .build()
        .await
        .unwrap();
    app.sql_store.migrate().await.unwrap();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    repository.insert(&row("a", "A", "u1", Visibility::Public)).await.unwrap();

    const CLICKS: u64 = 32;
    let ctx = CancellationToken::new();
    let results = join_all(
        (0..CLICKS).map(|_| app.controller.increment_click_count(&ctx, "a", AssetType::Sprite)),
    )
    .await;
    assert!(results.iter().all(Result::is_ok), "{:?}", results);

    let read = app.controller.get_asset(&ctx, "a").await.unwrap();
    assert_eq!(read.click_count, CLICKS);
}

#[tokio::test]
async fn list_public_hides_deleted_and_personal_rows() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    repository.insert(&row("a", "A", "u1", Visibility::Public)).await.unwrap();
    repository.insert(&row("b", "B", "u1", Visibility::Personal)).await.unwrap();
    let mut deleted = row("c", "C", "u1", Visibility::Public);
    deleted.status = RowStatus::Deleted;
    repository.insert(&deleted).await.unwrap();
    let mut other_category = row("d", "D", "u2", Visibility::Public);
    other_category.category = "plants".to_string();
    repository.insert(&other_category).await.unwrap();

    let page = PageRequest::new(1, 10).unwrap();
    let public = app
        .controller
        .list_public_assets(&ctx, AssetListQuery::new(page, AssetType::Sprite))
        .await
        .unwrap();
    let ids: Vec<_> = public.data.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "d"]);
    assert!(public
        .data
        .iter()
        .all(|a| a.status == RowStatus::Active && a.is_public == Visibility::Public));

    let animals = app
        .controller
        .list_public_assets(
            &ctx,
            AssetListQuery::new(page, AssetType::Sprite).with_category("animals"),
        )
        .await
        .unwrap();
    assert_eq!(animals.total, 1);

    let mine = app
        .controller
        .list_user_assets(&ctx, AssetListQuery::new(page, AssetType::Sprite), "u1")
        .await
        .unwrap();
    let ids: Vec<_> = mine.data.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn list_orders_by_time_then_clicks() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    let base = Utc::now() - Duration::hours(1);

    for (id, minutes) in [("old", 0), ("mid", 10), ("new", 20)] {
        let mut asset = row(id, id, "u1", Visibility::Public);
        asset.c_time = base + Duration::minutes(minutes);
        repository.insert(&asset).await.unwrap();
    }
    for _ in 0..3 {
        app.controller.increment_click_count(&ctx, "old", AssetType::Sprite).await.unwrap();
    }
    app.controller.increment_click_count(&ctx, "mid", AssetType::Sprite).await.unwrap();

    let page = PageRequest::new(1, 10).unwrap();
    let newest = app
        .controller
        .list_public_assets(&ctx, AssetListQuery::new(page, AssetType::Sprite).newest_first())
        .await
        .unwrap();
    let ids: Vec<_> = newest.data.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);

    let hottest = app
        .controller
        .list_public_assets(&ctx, AssetListQuery::new(page, AssetType::Sprite).hottest_first())
        .await
        .unwrap();
    let ids: Vec<_> = hottest.data.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["old", "mid", "new"]);
}

#[tokio::test]
async fn sound_asset_create_and_replace() {
    let app = app().await;
    let ctx = CancellationToken::new();

    let mut draft = row("", "meow", "u1", Visibility::Public);
    draft.category = "effects".to_string();
    let created = app
        .controller
        .save_sound_asset(&ctx, draft, UploadedFile::new("meow.WAV", Bytes::from_static(b"RIFF")))
        .await
        .unwrap();
    assert_eq!(created.asset_type, AssetType::Sound);
    let first_url = created.address.assets["sound"].clone();
    assert!(first_url.starts_with(&format!("{CDN}/sounds/")));
    assert!(first_url.ends_with(".wav"));

    let repository = SqlAssetRepository::new(app.sql_store.clone());
    let stored = repository.find_by_id(&created.id).await.unwrap().unwrap();
    let old_key = BlobKey::new(stored.address.assets["sound"].clone()).unwrap();

    let mut update = stored.clone();
    update.name = "purr".to_string();
    let replaced = app
        .controller
        .save_sound_asset(&ctx, update, UploadedFile::new("purr.mp3", Bytes::from_static(b"ID3")))
        .await
        .unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.name, "purr");
    assert!(replaced.address.assets["sound"].ends_with(".mp3"));
    assert!(!app.blob_store.exists(&old_key).await.unwrap());

    let mut stranger = stored;
    stranger.author_id = "u2".to_string();
    let forbidden = app
        .controller
        .save_sound_asset(&ctx, stranger, UploadedFile::new("x.wav", Bytes::from_static(b"x")))
        .await;
    assert!(matches!(forbidden, Err(ControllerError::Forbidden { .. })));
}

#[tokio::test]
async fn update_asset_public_checks_owner() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    repository.insert(&row("a", "A", "u1", Visibility::Personal)).await.unwrap();

    let forbidden = app
        .controller
        .update_asset_public(&ctx, "a", Visibility::Public, "u2")
        .await;
    assert!(matches!(forbidden, Err(ControllerError::Forbidden { .. })));

    app.controller
        .update_asset_public(&ctx, "a", Visibility::Public, "u1")
        .await
        .unwrap();
    let read = app.controller.get_asset(&ctx, "a").await.unwrap();
    assert_eq!(read.is_public, Visibility::Public);
}

#[tokio::test]
async fn deleted_asset_is_not_found() {
    let app = app().await;
    let ctx = CancellationToken::new();
    let repository = SqlAssetRepository::new(app.sql_store.clone());
    let mut gone = row("a", "A", "u1", Visibility::Public);
    gone.status = RowStatus::Deleted;
    repository.insert(&gone).await.unwrap();

    let result = app.controller.get_asset(&ctx, "a").await;
    assert!(matches!(result, Err(ControllerError::NotFound { .. })));
}
