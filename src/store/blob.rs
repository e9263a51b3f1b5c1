use std::path::{Path, PathBuf};
use tokio::{fs::{self, File}, io::AsyncWriteExt};
use tracing::info;

use crate::{
    error::{bad, io, AppErr, AppResult},
    utils::filename::secure_filename,
};

/// Flat directory of uploaded files, one per sanitized name.
#[derive(Clone)]
pub struct BlobStore {
    dir: PathBuf,
}

impl BlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    /// Store under the sanitized name, replacing any earlier blob with the
    /// same name. Returns the stored name and its full path.
    pub async fn put(&self, original: &str, data: &[u8]) -> AppResult<(String, PathBuf)> {
        let name = secure_filename(original);
        if name.is_empty() {
            return Err(bad("Invalid filename"));
        }

        fs::create_dir_all(&self.dir).await.map_err(io)?;
        let full = self.dir.join(&name);

        let mut file = File::create(&full).await.map_err(io)?;
        file.write_all(data).await.map_err(io)?;
        file.flush().await.map_err(io)?;

        info!(path = %full.display(), bytes = data.len(), "file saved");
        Ok((name, full))
    }

    pub async fn get(&self, name: &str) -> AppResult<Vec<u8>> {
        if name.is_empty() || secure_filename(name) != name {
            return Err(AppErr::NotFound(name.to_string()));
        }
        match fs::read(self.dir.join(name)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppErr::NotFound(name.to_string()))
            }
            Err(e) => Err(io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path().join("uploads"));

        let (name, path) = blobs.put("my photo.PNG", b"\x89PNG").await.unwrap();
        assert_eq!(name, "my_photo.PNG");
        assert_eq!(path, dir.path().join("uploads").join("my_photo.PNG"));
        assert_eq!(blobs.get(&name).await.unwrap(), b"\x89PNG");
    }

    #[tokio::test]
    async fn same_name_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path());

        blobs.put("a.txt", b"first").await.unwrap();
        blobs.put("a.txt", b"second").await.unwrap();
        assert_eq!(blobs.get("a.txt").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn unsanitizable_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path());
        let err = blobs.put("../..", b"x").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid filename");
    }

    #[tokio::test]
    async fn missing_or_traversing_names_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path().join("uploads"));
        std::fs::write(dir.path().join("secret.txt"), b"s").unwrap();

        assert!(matches!(blobs.get("nope.txt").await, Err(AppErr::NotFound(_))));
        assert!(matches!(blobs.get("../secret.txt").await, Err(AppErr::NotFound(_))));
    }
}
