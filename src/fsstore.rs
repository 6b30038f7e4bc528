//! Filesystem-backed slot store.
//!
//! Each slot lives in `<base>/<key>.json`. Writes go to a temporary sibling first and are
//! renamed into place, so a reader never sees a half-written collection.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::storage::Storage;

#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: impl Into<PathBuf>) -> Self { Self { base: base.into() } }

    pub fn base(&self) -> &Path { &self.base }

    fn slot_path(&self, key: &str) -> PathBuf {
        // slot keys are fixed identifiers, but keep separators out of file names anyway
        let name: String = key.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' }).collect();
        self.base.join(format!("{name}.json"))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get_slot(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading slot file {}", path.display())),
        }
    }

    async fn put_slot(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.base)
            .await
            .with_context(|| format!("creating data dir: {}", self.base.display()))?;
        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value).await.with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path).await.with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    async fn remove_slot(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slots_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path().join("data"));
        assert_eq!(store.get_slot("netflex_user").await.unwrap(), None);
        store.put_slot("netflex_user", r#"{"username":"admin"}"#).await.unwrap();

        let reopened = FileStorage::new(dir.path().join("data"));
        assert_eq!(reopened.get_slot("netflex_user").await.unwrap().as_deref(), Some(r#"{"username":"admin"}"#));
        assert!(dir.path().join("data/netflex_user.json").exists());
        assert!(!dir.path().join("data/netflex_user.json.tmp").exists());
    }

    #[tokio::test]
    async fn removing_missing_slot_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path());
        store.remove_slot("nothing").await.unwrap();
        store.put_slot("x", "1").await.unwrap();
        store.remove_slot("x").await.unwrap();
        assert_eq!(store.get_slot("x").await.unwrap(), None);
    }

    #[test]
    fn slot_names_are_sanitized() {
        let store = FileStorage::new("/tmp/base");
        assert_eq!(store.slot_path("../etc/passwd"), PathBuf::from("/tmp/base/___etc_passwd.json"));
    }
}
