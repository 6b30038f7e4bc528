//! Turns binary uploads into self-contained `data:` URIs that can sit in `posterPath` or
//! `videoPath` in place of a remote URL.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_MIME: &str = "application/octet-stream";

/// What a poster or video path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    Inline { mime: String, len: usize },
    Remote(url::Url),
    Unknown,
}

impl MediaRef {
    pub fn classify(path: &str) -> Self {
        if let Some(rest) = path.strip_prefix("data:") {
            if let Some((meta, payload)) = rest.split_once(',') {
                let mime = meta.split(';').next().filter(|m| !m.is_empty()).unwrap_or("text/plain").to_string();
                let len = if meta.ends_with(";base64") {
                    STANDARD.decode(payload).map(|b| b.len()).unwrap_or(0)
                } else {
                    payload.len()
                };
                return MediaRef::Inline { mime, len };
            }
            return MediaRef::Unknown;
        }
        match url::Url::parse(path) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => MediaRef::Remote(u),
            _ => MediaRef::Unknown,
        }
    }

    /// Short human-readable form for listings; inline payloads are summarized, not printed.
    pub fn label(&self) -> Option<String> {
        match self {
            MediaRef::Inline { mime, len } => Some(format!("inline {mime}, {len} bytes")),
            MediaRef::Remote(u) => Some(u.to_string()),
            MediaRef::Unknown => None,
        }
    }
}

pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    let mime = if mime.trim().is_empty() { DEFAULT_MIME } else { mime.trim() };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        _ => DEFAULT_MIME,
    }
}

/// Read a file and encode it, refusing anything larger than `max_bytes`.
pub async fn encode_file(path: &Path, max_bytes: u64) -> ApiResult<String> {
    let meta = tokio::fs::metadata(path)
        .await
        .map_err(|source| ApiError::StorageRead { path: path.to_path_buf(), source })?;
    if meta.len() > max_bytes {
        return Err(ApiError::TooLarge { size: meta.len(), limit: max_bytes });
    }
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ApiError::StorageRead { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "encoded upload");
    Ok(encode_data_uri(&bytes, mime_for_path(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_with_padding() {
        assert_eq!(encode_data_uri(b"hi", "image/png"), "data:image/png;base64,aGk=");
        assert_eq!(encode_data_uri(b"", ""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn classifies_paths() {
        assert_eq!(MediaRef::classify("data:image/png;base64,aGk="), MediaRef::Inline { mime: "image/png".into(), len: 2 });
        assert!(matches!(MediaRef::classify("https://picsum.photos/seed/rrr/300/450"), MediaRef::Remote(_)));
        assert_eq!(MediaRef::classify("not a url"), MediaRef::Unknown);
        assert_eq!(MediaRef::classify("data:broken"), MediaRef::Unknown);
    }

    #[test]
    fn labels_summarize_inline_media() {
        assert_eq!(MediaRef::classify(&encode_data_uri(&[7; 300], "image/png")).label().as_deref(), Some("inline image/png, 300 bytes"));
        assert_eq!(MediaRef::classify("https://picsum.photos/seed/rrr/300/450").label().as_deref(), Some("https://picsum.photos/seed/rrr/300/450"));
        assert_eq!(MediaRef::Unknown.label(), None);
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("poster.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(mime_for_path(Path::new("blob")), DEFAULT_MIME);
    }

    #[tokio::test]
    async fn file_roundtrip_and_limits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.png");
        std::fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        let uri = encode_file(&path, 1024).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,AAECAw==");

        assert!(matches!(encode_file(&path, 3).await, Err(ApiError::TooLarge { size: 4, limit: 3 })));
        assert!(matches!(encode_file(&dir.path().join("missing.png"), 1024).await, Err(ApiError::StorageRead { .. })));
    }
}
