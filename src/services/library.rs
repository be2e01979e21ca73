//! Desktop analog of the mobile photo library: a managed output directory.
//!
//! Saved photos are copied into the configured directory, optionally
//! organized into per-date subdirectories, and assigned a generated asset
//! id. Permission maps to directory writability.

use crate::errors::GuidecamError;
use crate::permissions::PermissionStatus;
use crate::services::MediaLibraryService;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FolderLibrary {
    output_dir: PathBuf,
    organize_by_date: bool,
}

impl FolderLibrary {
    pub fn new(output_dir: impl Into<PathBuf>, organize_by_date: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            organize_by_date,
        }
    }

    fn probe_writable(&self) -> PermissionStatus {
        match std::fs::create_dir_all(&self.output_dir) {
            Ok(()) => {
                let probe = self.output_dir.join(format!(".probe-{}", Uuid::new_v4()));
                match std::fs::write(&probe, b"") {
                    Ok(()) => {
                        let _ = std::fs::remove_file(&probe);
                        PermissionStatus::Granted
                    }
                    Err(e) => {
                        log::warn!("Library directory not writable: {}", e);
                        PermissionStatus::Denied
                    }
                }
            }
            Err(e) => {
                log::warn!("Cannot create library directory {:?}: {}", self.output_dir, e);
                PermissionStatus::Denied
            }
        }
    }

    fn destination_dir(&self) -> PathBuf {
        if self.organize_by_date {
            let date = chrono::Local::now().format("%Y-%m-%d").to_string();
            self.output_dir.join(date)
        } else {
            self.output_dir.clone()
        }
    }
}

#[async_trait]
impl MediaLibraryService for FolderLibrary {
    async fn permission_status(&self) -> Result<PermissionStatus, GuidecamError> {
        if self.output_dir.exists() {
            Ok(self.probe_writable())
        } else {
            Ok(PermissionStatus::NotDetermined)
        }
    }

    async fn request_permission(&self) -> Result<PermissionStatus, GuidecamError> {
        Ok(self.probe_writable())
    }

    async fn add_to_library(&self, uri: &str) -> Result<String, GuidecamError> {
        let dest_dir = self.destination_dir();
        tokio::fs::create_dir_all(&dest_dir).await.map_err(|e| {
            GuidecamError::Persistence(format!("Failed to create {:?}: {}", dest_dir, e))
        })?;

        let asset_id = Uuid::new_v4().to_string();
        let extension = Path::new(uri)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg");
        let dest = dest_dir.join(format!("{}.{}", asset_id, extension));

        tokio::fs::copy(uri, &dest).await.map_err(|e| {
            GuidecamError::Persistence(format!("Failed to save {} to library: {}", uri, e))
        })?;

        log::info!("Saved {} to library as {:?}", uri, dest);
        Ok(asset_id)
    }
}
