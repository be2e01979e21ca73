//! Filesystem adapter rooted at the app's private temp directory.

use crate::errors::GuidecamError;
use crate::services::FilesystemService;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct NativeFilesystem {
    private_root: PathBuf,
}

impl NativeFilesystem {
    /// Create the adapter, making sure the private root exists.
    pub fn new(private_root: impl Into<PathBuf>) -> Result<Self, GuidecamError> {
        let private_root = private_root.into();
        std::fs::create_dir_all(&private_root).map_err(|e| {
            GuidecamError::Io(format!(
                "Failed to create private storage at {:?}: {}",
                private_root, e
            ))
        })?;
        Ok(Self { private_root })
    }

    pub fn private_root(&self) -> &Path {
        &self.private_root
    }
}

#[async_trait]
impl FilesystemService for NativeFilesystem {
    async fn copy(&self, from: &str, to: &str) -> Result<(), GuidecamError> {
        tokio::fs::copy(from, to)
            .await
            .map_err(|e| GuidecamError::Io(format!("Failed to copy {} to {}: {}", from, to, e)))?;
        log::debug!("Copied {} to {}", from, to);
        Ok(())
    }

    async fn delete(&self, path: &str, idempotent: bool) -> Result<(), GuidecamError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                log::debug!("Deleted {}", path);
                Ok(())
            }
            Err(e) if idempotent && e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GuidecamError::Io(format!("Failed to delete {}: {}", path, e))),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, GuidecamError> {
        Ok(tokio::fs::metadata(path).await.is_ok())
    }

    fn is_private_path(&self, path: &str) -> bool {
        Path::new(path).starts_with(&self.private_root)
    }

    fn temp_destination(&self, file_name: &str) -> String {
        self.private_root.join(file_name).to_string_lossy().into_owned()
    }
}
