//! In-memory service fakes for exercising controller state machines
//! without touching the real filesystem.

use crate::errors::GuidecamError;
use crate::geometry::GuideRect;
use crate::permissions::PermissionStatus;
use crate::services::{CameraService, CropService, FilesystemService, MediaLibraryService};
use crate::types::{CaptureOptions, OutputFormat, RawFrame};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Camera fake returning a fixed frame, with optional failure injection and
/// an optional gate for exercising the single-flight capture guard.
pub struct StubCamera {
    frame: RawFrame,
    fail: bool,
    gate: Option<tokio::sync::Semaphore>,
}

impl StubCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RawFrame {
                // Opaque platform-asset style handle, outside private storage.
                uri: "asset://stub-frame".to_string(),
                width,
                height,
            },
            fail: false,
            gate: None,
        }
    }

    pub fn failing() -> Self {
        let mut camera = Self::new(0, 0);
        camera.fail = true;
        camera
    }

    /// Capture blocks until [`StubCamera::release`] adds a permit.
    pub fn gated(width: u32, height: u32) -> Self {
        let mut camera = Self::new(width, height);
        camera.gate = Some(tokio::sync::Semaphore::new(0));
        camera
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }
}

#[async_trait]
impl CameraService for StubCamera {
    async fn capture(&self, _options: &CaptureOptions) -> Result<RawFrame, GuidecamError> {
        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| GuidecamError::Camera(e.to_string()))?;
            permit.forget();
        }
        if self.fail {
            return Err(GuidecamError::Camera("stub hardware unavailable".to_string()));
        }
        Ok(self.frame.clone())
    }
}

/// Crop fake that records every rectangle it was asked for.
#[derive(Default)]
pub struct RecordingCropper {
    pub rects: Mutex<Vec<GuideRect>>,
    fail: bool,
}

impl RecordingCropper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            rects: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn last_rect(&self) -> Option<GuideRect> {
        self.rects.lock().unwrap().last().copied()
    }
}

#[async_trait]
impl CropService for RecordingCropper {
    async fn crop(
        &self,
        source_uri: &str,
        rect: GuideRect,
        format: OutputFormat,
    ) -> Result<String, GuidecamError> {
        if self.fail {
            return Err(GuidecamError::Processing("stub codec failure".to_string()));
        }
        self.rects.lock().unwrap().push(rect);
        Ok(format!("{}.cropped.{}", source_uri, format.extension()))
    }
}

/// In-memory filesystem with a `memfs:/private/` storage root.
pub struct MemoryFilesystem {
    files: Mutex<HashSet<String>>,
    pub delete_calls: Mutex<Vec<String>>,
    fail_copy: bool,
}

pub const MEMFS_PRIVATE_ROOT: &str = "memfs:/private/";

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashSet::new()),
            delete_calls: Mutex::new(Vec::new()),
            fail_copy: false,
        }
    }

    pub fn with_copy_failure() -> Self {
        let mut fs = Self::new();
        fs.fail_copy = true;
        fs
    }

    /// Seed a pre-existing file.
    pub fn insert(&self, path: &str) {
        self.files.lock().unwrap().insert(path.to_string());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains(path)
    }

    pub fn delete_count(&self) -> usize {
        self.delete_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl FilesystemService for MemoryFilesystem {
    async fn copy(&self, from: &str, to: &str) -> Result<(), GuidecamError> {
        if self.fail_copy {
            return Err(GuidecamError::Io(format!(
                "simulated copy failure for {}",
                from
            )));
        }
        self.files.lock().unwrap().insert(to.to_string());
        Ok(())
    }

    async fn delete(&self, path: &str, idempotent: bool) -> Result<(), GuidecamError> {
        self.delete_calls.lock().unwrap().push(path.to_string());
        let removed = self.files.lock().unwrap().remove(path);
        if !removed && !idempotent {
            return Err(GuidecamError::Io(format!("{} does not exist", path)));
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool, GuidecamError> {
        Ok(self.contains(path))
    }

    fn is_private_path(&self, path: &str) -> bool {
        path.starts_with(MEMFS_PRIVATE_ROOT)
    }

    fn temp_destination(&self, file_name: &str) -> String {
        format!("{}{}", MEMFS_PRIVATE_ROOT, file_name)
    }
}

/// In-memory photo library with scriptable permission responses.
pub struct MemoryLibrary {
    permission: Mutex<PermissionStatus>,
    pub saved: Mutex<Vec<String>>,
    fail_add: bool,
}

impl Default for MemoryLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self {
            permission: Mutex::new(PermissionStatus::Granted),
            saved: Mutex::new(Vec::new()),
            fail_add: false,
        }
    }

    pub fn denying() -> Self {
        let library = Self::new();
        *library.permission.lock().unwrap() = PermissionStatus::Denied;
        library
    }

    pub fn with_add_failure() -> Self {
        let mut library = Self::new();
        library.fail_add = true;
        library
    }

    pub fn set_permission(&self, status: PermissionStatus) {
        *self.permission.lock().unwrap() = status;
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaLibraryService for MemoryLibrary {
    async fn permission_status(&self) -> Result<PermissionStatus, GuidecamError> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn request_permission(&self) -> Result<PermissionStatus, GuidecamError> {
        Ok(*self.permission.lock().unwrap())
    }

    async fn add_to_library(&self, uri: &str) -> Result<String, GuidecamError> {
        if self.fail_add {
            return Err(GuidecamError::Persistence(
                "simulated library write failure".to_string(),
            ));
        }
        self.saved.lock().unwrap().push(uri.to_string());
        Ok(uuid::Uuid::new_v4().to_string())
    }
}
