pub mod api;
pub mod assist;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod dao;
pub mod data;
pub mod db;
pub mod error;
pub mod fsstore;
pub mod mapping;
pub mod storage;
pub mod types;
pub mod upload;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::ApiResponse;
    pub use crate::catalog::{CatalogFilter, CatalogStats, WatchHistory};
    pub use crate::config::{LatencyProfile, Settings, StoreKind};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::storage::{MemoryStorage, Storage};
    pub use crate::types::{ContentItem, ContentPatch, ContentType, Country, Genre, NewContent, Session};
    pub use crate::Netflex;
}

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{respond, respond_unit, ApiResponse};
use crate::catalog::{CatalogFilter, CatalogStats};
use crate::config::{Credentials, LatencyProfile, Settings, StoreKind};
use crate::error::{ApiError, ApiResult};
use crate::storage::{MemoryStorage, Storage};
use crate::types::{ContentItem, ContentPatch, NewContent, Session};

/// Async library entry point: the mock backend behind the admin and client UIs.
///
/// Every catalog operation loads the whole collection from the slot store, works on it in
/// memory, and writes it back whole. Calls are not coordinated with each other; a `create`
/// racing a `list_all` may be observed either way round.
pub struct Netflex {
    store: Arc<dyn Storage>,
    latency: LatencyProfile,
    credentials: Credentials,
    upload_limit: u64,
}

impl Netflex {
    /// Wrap a slot store and seed it if it has never held a catalog.
    pub async fn new(store: Arc<dyn Storage>, settings: &Settings) -> ApiResult<Self> {
        let nf = Self {
            store,
            latency: settings.latency,
            credentials: settings.credentials.clone(),
            upload_limit: settings.upload.max_bytes,
        };
        nf.init().await?;
        Ok(nf)
    }

    /// Open the store named by `settings` (SQLite, slot files or memory).
    pub async fn connect(settings: &Settings) -> ApiResult<Self> {
        let store: Arc<dyn Storage> = match settings.store {
            StoreKind::Memory => Arc::new(MemoryStorage::new()),
            StoreKind::File => {
                let dir = match &settings.data_dir {
                    Some(d) => d.clone(),
                    None => db::default_data_dir()?.join("slots"),
                };
                Arc::new(fsstore::FileStorage::new(dir))
            }
            StoreKind::Sqlite => {
                let database = match (&settings.database_url, &settings.data_dir) {
                    (Some(url), _) => {
                        let database = db::Database::connect(Some(url.as_str())).await?;
                        database.run_migrations().await?;
                        database
                    }
                    (None, Some(dir)) => db::Database::open_file(&dir.join("netflex.db")).await?,
                    (None, None) => {
                        let database = db::Database::connect(None).await?;
                        database.run_migrations().await?;
                        database
                    }
                };
                Arc::new(database)
            }
        };
        Self::new(store, settings).await
    }

    /// In-memory backend with no simulated latency.
    pub async fn in_memory() -> ApiResult<Self> {
        let settings = Settings { latency: LatencyProfile::none(), ..Settings::default() };
        Self::new(Arc::new(MemoryStorage::new()), &settings).await
    }

    /// Seed the example catalog when the collection slot is absent. Safe to call repeatedly.
    pub async fn init(&self) -> ApiResult<bool> { dao::seed_if_absent(self.store.as_ref()).await }

    async fn simulate(&self, d: Duration) {
        if !d.is_zero() { tokio::time::sleep(d).await; }
    }

    // --- Catalog CRUD ---

    /// Every item, newest created first.
    pub async fn list_all(&self) -> ApiResult<Vec<ContentItem>> {
        self.simulate(self.latency.list()).await;
        let movies = dao::load_movies(self.store.as_ref()).await?;
        tracing::debug!(count = movies.len(), "list_all");
        Ok(movies)
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<ContentItem> {
        self.simulate(self.latency.get()).await;
        let movies = dao::load_movies(self.store.as_ref()).await?;
        movies.into_iter().find(|m| m.id == id).ok_or_else(|| ApiError::not_found(id))
    }

    /// Assign a fresh id and timestamp, prepend, persist.
    pub async fn create(&self, fields: NewContent) -> ApiResult<ContentItem> {
        self.simulate(self.latency.create()).await;
        let mut movies = dao::load_movies(self.store.as_ref()).await?;
        let mut id = mapping::new_item_id();
        while movies.iter().any(|m| m.id == id) { id = mapping::new_item_id(); }
        let item = mapping::item_from_new(id, mapping::timestamp_now(), fields);
        movies.insert(0, item.clone());
        dao::save_movies(self.store.as_ref(), &movies).await?;
        tracing::info!(id = %item.id, title = %item.title, "created item");
        Ok(item)
    }

    pub async fn update(&self, id: &str, patch: ContentPatch) -> ApiResult<ContentItem> {
        self.simulate(self.latency.update()).await;
        let mut movies = dao::load_movies(self.store.as_ref()).await?;
        let Some(item) = movies.iter_mut().find(|m| m.id == id) else {
            return Err(ApiError::not_found(id));
        };
        mapping::apply_patch(item, patch);
        let updated = item.clone();
        dao::save_movies(self.store.as_ref(), &movies).await?;
        tracing::debug!(%id, "updated item");
        Ok(updated)
    }

    /// Remove any item with this id. Succeeds whether or not one existed.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.simulate(self.latency.delete()).await;
        let mut movies = dao::load_movies(self.store.as_ref()).await?;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        dao::save_movies(self.store.as_ref(), &movies).await?;
        tracing::info!(%id, removed = before - movies.len(), "deleted item");
        Ok(())
    }

    // --- Session ---

    /// On success the session slot is written; on failure any existing session is left as is.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        self.simulate(self.latency.login()).await;
        match auth::check_credentials(&self.credentials, username, password) {
            Some(session) => {
                dao::save_session(self.store.as_ref(), &session).await?;
                tracing::info!(%username, "logged in");
                Ok(session)
            }
            None => {
                tracing::warn!(%username, "rejected login");
                Err(ApiError::InvalidCredentials)
            }
        }
    }

    /// Clear the session slot. No simulated latency.
    pub async fn logout(&self) -> ApiResult<()> {
        dao::clear_session(self.store.as_ref()).await?;
        tracing::debug!("logged out");
        Ok(())
    }

    /// Read the session slot. No simulated latency.
    pub async fn current_session(&self) -> ApiResult<Option<Session>> { dao::load_session(self.store.as_ref()).await }

    pub async fn is_authenticated(&self) -> bool { matches!(self.current_session().await, Ok(Some(_))) }

    // --- Uploads ---

    pub fn upload_binary(&self, bytes: &[u8], mime: &str) -> String { upload::encode_data_uri(bytes, mime) }

    pub async fn upload_file(&self, path: &Path) -> ApiResult<String> { upload::encode_file(path, self.upload_limit).await }

    // --- Catalog views ---

    pub async fn search(&self, query: &str) -> ApiResult<Vec<ContentItem>> {
        let movies = self.list_all().await?;
        Ok(catalog::search(&movies, query).into_iter().cloned().collect())
    }

    /// `list_all` narrowed by type, country, genre and popularity.
    pub async fn browse(&self, filter: &CatalogFilter) -> ApiResult<Vec<ContentItem>> {
        let movies = self.list_all().await?;
        Ok(filter.apply(&movies))
    }

    pub async fn new_releases(&self, limit: usize) -> ApiResult<Vec<ContentItem>> {
        let movies = self.list_all().await?;
        Ok(catalog::new_releases(&movies, limit).into_iter().cloned().collect())
    }

    pub async fn stats(&self) -> ApiResult<CatalogStats> {
        let movies = self.list_all().await?;
        Ok(catalog::stats(&movies))
    }

    // --- Envelope forms for the rendering layer ---

    pub async fn get_movies(&self) -> ApiResponse<Vec<ContentItem>> { respond(self.list_all().await) }

    pub async fn get_movie_by_id(&self, id: &str) -> ApiResponse<ContentItem> { respond(self.get_by_id(id).await) }

    pub async fn create_movie(&self, fields: NewContent) -> ApiResponse<ContentItem> { respond(self.create(fields).await) }

    pub async fn update_movie(&self, id: &str, patch: ContentPatch) -> ApiResponse<ContentItem> { respond(self.update(id, patch).await) }

    pub async fn delete_movie(&self, id: &str) -> ApiResponse<()> { respond_unit(self.delete(id).await) }

    pub async fn login_response(&self, username: &str, password: &str) -> ApiResponse<Session> { respond(self.login(username, password).await) }
}
