use netflex::config::{LatencyProfile, Settings, StoreKind};
use netflex::db::Database;
use netflex::prelude::*;

fn settings(store: StoreKind, dir: &std::path::Path) -> Settings {
    Settings { store, data_dir: Some(dir.to_path_buf()), latency: LatencyProfile::none(), ..Settings::default() }
}

fn entry(title: &str) -> NewContent {
    NewContent {
        title: title.to_string(),
        description: String::new(),
        poster_path: "https://picsum.photos/seed/x/300/450".to_string(),
        video_path: String::new(),
        content_type: ContentType::Single,
        country: Country::India,
        genre: Genre::Horror,
        year: 2019,
        is_popular: false,
    }
}

async fn survives_reopen(kind: StoreKind) {
    let dir = tempfile::tempdir().unwrap();
    let created = {
        let nf = Netflex::connect(&settings(kind, dir.path())).await.unwrap();
        nf.login("admin", "admin123").await.unwrap();
        nf.delete("1").await.unwrap();
        nf.create(entry("Persisted")).await.unwrap()
    };

    let nf = Netflex::connect(&settings(kind, dir.path())).await.unwrap();
    let items = nf.list_all().await.unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0], created);
    assert!(items.iter().all(|m| m.id != "1"));
    assert_eq!(nf.current_session().await.unwrap().map(|s| s.username).as_deref(), Some("admin"));
}

#[tokio::test]
async fn file_backend_persists_catalog_and_session() {
    survives_reopen(StoreKind::File).await;
}

#[tokio::test]
async fn sqlite_backend_persists_catalog_and_session() {
    survives_reopen(StoreKind::Sqlite).await;
}

#[tokio::test]
async fn memory_backend_starts_fresh_each_time() {
    let dir = tempfile::tempdir().unwrap();
    let nf = Netflex::connect(&settings(StoreKind::Memory, dir.path())).await.unwrap();
    nf.delete("1").await.unwrap();
    let nf = Netflex::connect(&settings(StoreKind::Memory, dir.path())).await.unwrap();
    assert_eq!(nf.list_all().await.unwrap().len(), 6);
}

#[tokio::test]
async fn sqlite_url_takes_precedence() {
    let mut s = settings(StoreKind::Sqlite, std::path::Path::new("/nonexistent/never-used"));
    s.database_url = Some("sqlite::memory:".to_string());
    let nf = Netflex::connect(&s).await.unwrap();
    assert_eq!(nf.list_all().await.unwrap().len(), 6);
}

#[tokio::test]
async fn logout_removes_the_session_row() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open_file(&dir.path().join("slots.db")).await.unwrap();
    let nf = Netflex::new(std::sync::Arc::new(db.clone()), &settings(StoreKind::Sqlite, dir.path())).await.unwrap();

    nf.login("admin", "admin123").await.unwrap();
    assert_eq!(db.slot_keys().await.unwrap(), vec!["netflex_movies".to_string(), "netflex_user".to_string()]);
    nf.logout().await.unwrap();
    assert_eq!(db.slot_keys().await.unwrap(), vec!["netflex_movies".to_string()]);
}
