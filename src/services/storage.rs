use std::fs;
use std::path::{Component, Path, PathBuf};

use base64::Engine;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid data URL")]
    InvalidDataUrl,

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Uploaded files live under a single root directory, served statically at
/// `/uploads`. Database rows store the `/uploads/...` relative path.
#[derive(Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decodes a `data:<mime>;base64,<payload>` string into `<root>/<folder>`
    /// and returns the stored path. Strings that are not data URLs are passed
    /// through untouched (the client re-submitted an already-stored path).
    /// Unsupported image types are dropped with a warning rather than failing
    /// the surrounding request.
    pub fn save_data_url(&self, data: &str, folder: &str) -> Result<Option<String>, StorageError> {
        if !data.starts_with("data:") {
            return Ok(Some(data.to_string()));
        }

        let (mime, payload) = data[5..]
            .split_once(";base64,")
            .ok_or(StorageError::InvalidDataUrl)?;

        let subtype = mime.split('/').nth(1).unwrap_or("bin");
        let extension = match subtype {
            "svg+xml" => "svg",
            "jpeg" => "jpg",
            other => other,
        };

        if !matches!(extension, "png" | "jpg" | "svg") {
            tracing::warn!(extension, "blocked upload of unsupported file type");
            return Ok(None);
        }

        let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
        self.save_bytes(&bytes, folder, extension).map(Some)
    }

    pub fn save_bytes(&self, bytes: &[u8], folder: &str, extension: &str) -> Result<String, StorageError> {
        let dir = self.root.join(folder);
        fs::create_dir_all(&dir)?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        fs::write(dir.join(&file_name), bytes)?;

        Ok(format!("/uploads/{}/{}", folder, file_name))
    }

    /// Best-effort removal of a previously stored path. Only plain
    /// `/uploads/<folder>/<file>` paths are honored; anything that could step
    /// outside the root is refused.
    pub fn remove(&self, stored_path: &str) {
        let Some(relative) = stored_path.strip_prefix("/uploads/") else {
            return;
        };
        let traversal = Path::new(relative)
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if traversal {
            tracing::warn!(stored_path, "refusing to remove path outside the uploads root");
            return;
        }
        if let Err(e) = fs::remove_file(self.root.join(relative)) {
            tracing::debug!(stored_path, "could not remove file: {}", e);
        }
    }
}
