//! External collaborator seams.
//!
//! The capture and preview controllers never talk to a platform SDK
//! directly; they call these traits. The thin adapters in this module own
//! every platform-specific decision, including which URI schemes count as
//! private app storage. Core code never inspects URI prefixes.

pub mod crop;
pub mod filesystem;
pub mod library;

pub use crop::ImageCropper;
pub use filesystem::NativeFilesystem;
pub use library::FolderLibrary;

use crate::errors::GuidecamError;
use crate::geometry::GuideRect;
use crate::permissions::PermissionStatus;
use crate::types::{CaptureOptions, OutputFormat, RawFrame};
use async_trait::async_trait;

/// Still-image source: one frame per call, dimensions authoritative from
/// the device.
#[async_trait]
pub trait CameraService: Send + Sync {
    async fn capture(&self, options: &CaptureOptions) -> Result<RawFrame, GuidecamError>;
}

/// Crops a captured frame to a rectangle and re-encodes it.
#[async_trait]
pub trait CropService: Send + Sync {
    /// Returns the handle of the cropped output. Fails with
    /// [`GuidecamError::Geometry`] if the rectangle falls outside the
    /// source, [`GuidecamError::Processing`] on codec or I/O failure.
    async fn crop(
        &self,
        source_uri: &str,
        rect: GuideRect,
        format: OutputFormat,
    ) -> Result<String, GuidecamError>;
}

/// Persistent photo library the user saves into.
#[async_trait]
pub trait MediaLibraryService: Send + Sync {
    /// Non-mutating probe of the current permission state.
    async fn permission_status(&self) -> Result<PermissionStatus, GuidecamError>;

    /// Request library access, prompting the user where the platform
    /// supports it.
    async fn request_permission(&self) -> Result<PermissionStatus, GuidecamError>;

    /// Add a photo to the library, returning the new asset id.
    async fn add_to_library(&self, uri: &str) -> Result<String, GuidecamError>;
}

/// File copy / delete / probe operations plus the private-storage policy.
#[async_trait]
pub trait FilesystemService: Send + Sync {
    async fn copy(&self, from: &str, to: &str) -> Result<(), GuidecamError>;

    /// Delete a file. With `idempotent` set, deleting an already-absent
    /// file is not an error.
    async fn delete(&self, path: &str, idempotent: bool) -> Result<(), GuidecamError>;

    async fn exists(&self, path: &str) -> Result<bool, GuidecamError>;

    /// Whether a handle already points into the app's private storage area
    /// and can be used directly for display and save.
    fn is_private_path(&self, path: &str) -> bool;

    /// Destination inside private storage for a preview working copy.
    fn temp_destination(&self, file_name: &str) -> String;
}
