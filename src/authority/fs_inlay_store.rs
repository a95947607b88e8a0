use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use tracing::trace;

use super::InlayStore;
use crate::InlayData;
use crate::InlayKey;
use crate::InlayPayload;
use crate::InlayType;
use crate::Result;
use crate::StorageError;

/// Directory-backed authoritative store.
///
/// Every regular file directly inside `root` is one inlay; the file name is
/// its key and the extension decides media type and [`InlayType`].
#[derive(Debug, Clone)]
pub struct FsInlayStore {
    root: PathBuf,
}

impl FsInlayStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(
        &self,
        key: &str,
    ) -> Option<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(&['/', '\\'][..]) {
            return None;
        }
        Some(self.root.join(key))
    }
}

/// Maps a file extension to its media type
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        _ => return None,
    };
    Some(mime)
}

#[async_trait]
impl InlayStore for FsInlayStore {
    async fn get_keys(&self) -> Result<Vec<InlayKey>> {
        let mut dir = tokio::fs::read_dir(&self.root).await.map_err(|e| StorageError::PathError {
            path: self.root.clone(),
            source: e,
        })?;

        let mut keys = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => keys.push(name),
                Err(name) => debug!(?name, "skip non utf-8 inlay file name"),
            }
        }
        keys.sort();

        trace!(root = ?self.root, count = keys.len(), "FsInlayStore listed keys");
        Ok(keys)
    }

    async fn get_inlay_data(
        &self,
        key: &str,
    ) -> Result<Option<InlayData>> {
        let Some(path) = self.path_for(key) else {
            return Ok(None);
        };

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::PathError { path, source: e }.into()),
        };

        let mime = path.extension().and_then(|ext| ext.to_str()).and_then(mime_for_extension);
        let kind = mime.and_then(InlayType::from_mime);

        Ok(Some(InlayData::new(InlayPayload::binary(bytes, mime), kind)))
    }
}
