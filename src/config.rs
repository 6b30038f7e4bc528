use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Which slot store backs the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Sqlite,
    File,
    Memory,
}

/// Simulated round-trip time per operation, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    pub list_ms: u64,
    pub get_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub delete_ms: u64,
    pub login_ms: u64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self { list_ms: 500, get_ms: 300, create_ms: 800, update_ms: 800, delete_ms: 600, login_ms: 800 }
    }
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self { list_ms: 0, get_ms: 0, create_ms: 0, update_ms: 0, delete_ms: 0, login_ms: 0 }
    }

    pub fn is_none(&self) -> bool { *self == Self::none() }

    pub fn list(&self) -> Duration { Duration::from_millis(self.list_ms) }
    pub fn get(&self) -> Duration { Duration::from_millis(self.get_ms) }
    pub fn create(&self) -> Duration { Duration::from_millis(self.create_ms) }
    pub fn update(&self) -> Duration { Duration::from_millis(self.update_ms) }
    pub fn delete(&self) -> Duration { Duration::from_millis(self.delete_ms) }
    pub fn login(&self) -> Duration { Duration::from_millis(self.login_ms) }
}

/// The fixed credential pair accepted by `login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self { Self { username: "admin".into(), password: "admin123".into() } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub max_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self { Self { max_bytes: 5 * 1024 * 1024 } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AssistSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            timeout_secs: 30,
        }
    }
}

/// Top-level settings, read from `netflex.toml`. Every field has a default so an empty
/// or missing file behaves like the stock demo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub latency: LatencyProfile,
    pub credentials: Credentials,
    pub upload: UploadSettings,
    pub assist: AssistSettings,
}

impl Settings {
    pub fn filename() -> &'static str { "netflex.toml" }

    /// Default location under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "netflex", "netflex").map(|p| p.config_dir().join(Self::filename()))
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> { toml::from_str(s) }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> { toml::to_string_pretty(self) }

    /// Load from `path` if given (must exist), else from the default path if present, else defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::read(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::read(&p)?,
                _ => Self::default(),
            },
        };
        settings.apply_env(|k| std::env::var(k).ok());
        Ok(settings)
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("NETFLEX_DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            self.database_url = Some(url);
        }
        if let Some(dir) = var("NETFLEX_DATA_DIR").filter(|s| !s.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if matches!(var("NETFLEX_NO_LATENCY").as_deref(), Some("1") | Some("true")) {
            self.latency = LatencyProfile::none();
        }
        if let Some(key) = var("NETFLEX_ASSIST_API_KEY").filter(|s| !s.trim().is_empty()) {
            self.assist.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let s = Settings::from_toml("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.store, StoreKind::Sqlite);
        assert_eq!(s.latency.list_ms, 500);
        assert_eq!(s.credentials.username, "admin");
        assert_eq!(s.upload.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let s = Settings::from_toml("store = \"file\"\n[latency]\nget_ms = 10\n").unwrap();
        assert_eq!(s.store, StoreKind::File);
        assert_eq!(s.latency.get_ms, 10);
        assert_eq!(s.latency.create_ms, 800);
    }

    #[test]
    fn env_overrides() {
        let mut s = Settings::default();
        s.apply_env(|k| match k {
            "NETFLEX_NO_LATENCY" => Some("1".into()),
            "NETFLEX_DATA_DIR" => Some("/srv/netflex".into()),
            _ => None,
        });
        assert!(s.latency.is_none());
        assert_eq!(s.data_dir, Some(PathBuf::from("/srv/netflex")));
        assert!(s.database_url.is_none());
    }

    #[test]
    fn toml_roundtrip() {
        let mut s = Settings::default();
        s.store = StoreKind::Memory;
        s.assist.api_key = Some("k".into());
        let back = Settings::from_toml(&s.to_toml().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
