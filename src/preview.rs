//! Preview controller: the transient lifecycle of one captured photo.
//!
//! On receipt of a [`CapturedImage`] the session is `Materializing`: the
//! controller decides whether the cropped image can be displayed and saved
//! as-is or must first be copied into private storage. The session ends in
//! `Done` through save, retake, or forced dismissal; whichever way it ends,
//! exactly one cleanup pass releases any temporary copy it created.

use crate::errors::GuidecamError;
use crate::services::{FilesystemService, MediaLibraryService};
use crate::types::CapturedImage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    Materializing,
    Ready,
    Saving,
    Done,
}

impl std::fmt::Display for PreviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewState::Materializing => write!(f, "materializing"),
            PreviewState::Ready => write!(f, "ready"),
            PreviewState::Saving => write!(f, "saving"),
            PreviewState::Done => write!(f, "done"),
        }
    }
}

/// A private working copy created during materialization. Owned exclusively
/// by the preview session and deleted when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporaryFileRef {
    pub path: String,
}

/// Snapshot of the preview session for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewInfo {
    pub state: PreviewState,
    /// Handle the rendering layer should display and save.
    pub working_uri: String,
    /// True when the working copy could not be created and the original
    /// handle is used as a fallback.
    pub degraded: bool,
    pub orientation: crate::types::GuideOrientation,
    pub category: crate::types::CaptureCategory,
}

pub struct PreviewController {
    photo: CapturedImage,
    filesystem: Arc<dyn FilesystemService>,
    library: Arc<dyn MediaLibraryService>,
    state: PreviewState,
    working_uri: String,
    temp_file: Option<TemporaryFileRef>,
    degraded: bool,
}

impl PreviewController {
    /// Take ownership of a captured photo. The session starts in
    /// `Materializing`; call [`PreviewController::materialize`] next.
    pub fn new(
        photo: CapturedImage,
        filesystem: Arc<dyn FilesystemService>,
        library: Arc<dyn MediaLibraryService>,
    ) -> Self {
        let working_uri = photo.final_uri.clone();
        Self {
            photo,
            filesystem,
            library,
            state: PreviewState::Materializing,
            working_uri,
            temp_file: None,
            degraded: false,
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state
    }

    pub fn working_uri(&self) -> &str {
        &self.working_uri
    }

    pub fn photo(&self) -> &CapturedImage {
        &self.photo
    }

    pub fn info(&self) -> PreviewInfo {
        PreviewInfo {
            state: self.state,
            working_uri: self.working_uri.clone(),
            degraded: self.degraded,
            orientation: self.photo.orientation,
            category: self.photo.category,
        }
    }

    /// Prepare a usable local reference for display and save.
    ///
    /// Handles already inside private storage are used directly. Anything
    /// else (in particular opaque platform-asset handles) is copied into
    /// private storage and the copy recorded for cleanup. A failed copy is
    /// non-fatal: the original handle is used for both display and save and
    /// the session is marked degraded.
    pub async fn materialize(&mut self) -> Result<PreviewState, GuidecamError> {
        match self.state {
            PreviewState::Materializing => {}
            // Retake arrived before materialization settled; stay finished.
            PreviewState::Done => return Ok(PreviewState::Done),
            state => {
                return Err(GuidecamError::InvalidState(format!(
                    "materialize called in {} state",
                    state
                )))
            }
        }

        if self.filesystem.is_private_path(&self.photo.final_uri) {
            log::debug!("{} already in private storage", self.photo.final_uri);
            self.state = PreviewState::Ready;
            return Ok(self.state);
        }

        let extension = Path::new(&self.photo.final_uri)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg");
        let destination = self
            .filesystem
            .temp_destination(&format!("preview-{}.{}", Uuid::new_v4(), extension));

        match self
            .filesystem
            .copy(&self.photo.final_uri, &destination)
            .await
        {
            Ok(()) => {
                log::debug!("Materialized working copy at {}", destination);
                self.working_uri = destination.clone();
                self.temp_file = Some(TemporaryFileRef { path: destination });
            }
            Err(e) => {
                log::warn!(
                    "Falling back to original capture handle, copy failed: {}",
                    e
                );
                self.degraded = true;
            }
        }

        self.state = PreviewState::Ready;
        Ok(self.state)
    }

    /// Save the working reference to the photo library.
    ///
    /// Permission denial and library failures are non-fatal: the session
    /// stays `Ready` with the working copy intact so the user can retry or
    /// retake. Only a successful save releases the temporary file.
    pub async fn save(&mut self) -> Result<String, GuidecamError> {
        if self.state != PreviewState::Ready {
            return Err(GuidecamError::InvalidState(format!(
                "save called in {} state",
                self.state
            )));
        }
        self.state = PreviewState::Saving;

        let permission = match self.library.request_permission().await {
            Ok(status) => status,
            Err(e) => {
                self.state = PreviewState::Ready;
                return Err(e);
            }
        };
        if !permission.is_granted() {
            log::warn!("Photo library permission {}", permission);
            self.state = PreviewState::Ready;
            return Err(GuidecamError::Permission(
                "Photo library access is required to save photos".to_string(),
            ));
        }

        match self.library.add_to_library(&self.working_uri).await {
            Ok(asset_id) => {
                log::info!("Photo saved to library as asset {}", asset_id);
                self.release_temp_file().await;
                self.state = PreviewState::Done;
                Ok(asset_id)
            }
            Err(e) => {
                log::error!("Failed to save photo: {}", e);
                self.state = PreviewState::Ready;
                Err(e)
            }
        }
    }

    /// Discard the photo and end the session. Never fails; callable in any
    /// state and idempotent once the session is `Done`.
    pub async fn retake(&mut self) {
        self.finish().await;
    }

    /// Forced teardown (navigation away, session shutdown). Same cleanup
    /// path as retake.
    pub async fn dismiss(&mut self) {
        self.finish().await;
    }

    async fn finish(&mut self) {
        self.release_temp_file().await;
        self.state = PreviewState::Done;
    }

    /// Delete-then-clear of the working copy. Taking the ref first makes a
    /// second pass a no-op, and the delete itself tolerates an absent file.
    async fn release_temp_file(&mut self) {
        if let Some(temp) = self.temp_file.take() {
            match self.filesystem.delete(&temp.path, true).await {
                Ok(()) => log::debug!("Deleted temporary file {}", temp.path),
                Err(e) => log::warn!("Failed to delete temporary file {}: {}", temp.path, e),
            }
        }
    }
}

impl Drop for PreviewController {
    fn drop(&mut self) {
        if let Some(temp) = &self.temp_file {
            log::warn!(
                "Preview session dropped without cleanup; temporary file {} left behind",
                temp.path
            );
        }
    }
}
