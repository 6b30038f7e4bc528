use anyhow::{Context, Result};
use directories::ProjectDirs;
use sqlx::{any::AnyConnectOptions, AnyPool, ConnectOptions, migrate::Migrator};
use sqlx::any::AnyPoolOptions;
use std::{path::{Path, PathBuf}, str::FromStr};
use std::sync::Once;

use crate::storage::Storage;

// Ensure drivers are installed exactly once for sqlx::any
static INSTALL_DRIVERS: Once = Once::new();

// Embed SQL migrations from the migrations/ directory
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// SQLite-backed slot store. One row per slot in the `slots` table.
#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    // Create a connection pool. If database_url is None, use a SQLite file in the user's data directory.
    pub async fn connect(database_url: Option<&str>) -> Result<Self> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let url = match database_url {
            Some(u) if !u.trim().is_empty() => u.to_string(),
            _ => default_sqlite_url()?,
        };

        let opts = AnyConnectOptions::from_str(&url)
            .with_context(|| format!("invalid database URL: {url}"))?;
        // Quiet by default; callers can enable SQLX_LOG if they want
        let opts = opts.disable_statement_logging();

        // a single connection keeps `sqlite::memory:` pointing at one database
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .with_context(|| format!("failed to connect to database: {url}"))?;

        tracing::debug!(%url, "connected slot database");
        Ok(Self { pool })
    }

    /// Open (creating if needed) a SQLite file at an explicit path and run migrations.
    pub async fn open_file(path: &Path) -> Result<Self> {
        let db = Self::connect(Some(&sqlite_url_for(path)?)).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await.context("running migrations")
    }

    pub async fn slot_keys(&self) -> Result<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM slots ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

#[async_trait::async_trait]
impl Storage for Database {
    async fn get_slot(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query_scalar::<_, String>("SELECT value FROM slots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn put_slot(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO slots(key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_slot(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM slots WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "netflex", "netflex")
        .context("unable to determine data directory")?;
    Ok(proj.data_dir().to_path_buf())
}

fn default_sqlite_url() -> Result<String> {
    let mut path = default_data_dir()?;
    path.push("netflex.db");
    sqlite_url_for(&path)
}

fn sqlite_url_for(path: &Path) -> Result<String> {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().context("resolving working directory")?.join(path)
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating db parent dir: {}", parent.display()))?;
    }

    // Encode spaces in the path for a valid sqlite URL
    let mut path_str = path.to_string_lossy().to_string();
    if path_str.contains(' ') { path_str = path_str.replace(' ', "%20"); }
    Ok(format!("sqlite://{path_str}?mode=rwc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slots_roundtrip_in_memory() {
        let db = Database::connect(Some("sqlite::memory:")).await.unwrap();
        db.run_migrations().await.unwrap();

        assert_eq!(db.get_slot("netflex_movies").await.unwrap(), None);
        db.put_slot("netflex_movies", "[]").await.unwrap();
        db.put_slot("netflex_movies", "[1]").await.unwrap();
        assert_eq!(db.get_slot("netflex_movies").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(db.slot_keys().await.unwrap(), vec!["netflex_movies".to_string()]);

        db.remove_slot("netflex_movies").await.unwrap();
        assert_eq!(db.get_slot("netflex_movies").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("netflex.db");
        {
            let db = Database::open_file(&path).await.unwrap();
            db.put_slot("netflex_user", "{}").await.unwrap();
        }
        let db = Database::open_file(&path).await.unwrap();
        assert_eq!(db.get_slot("netflex_user").await.unwrap().as_deref(), Some("{}"));
    }
}
