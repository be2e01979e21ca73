pub mod capture;
pub mod config;
pub mod init;
pub mod permissions;
pub mod preview;

pub use capture::*;
pub use config::*;
pub use init::*;
pub use permissions::*;
pub use preview::*;

use crate::capture::CaptureController;
use crate::preview::PreviewController;
use crate::services::{FilesystemService, MediaLibraryService};
use std::sync::Arc;
use tokio::sync::RwLock;

/// One capture session: the live-view controller plus, after a photo is
/// taken, the preview session that now owns it.
pub struct CaptureSession {
    pub controller: CaptureController,
    pub preview: Option<PreviewController>,
    pub filesystem: Arc<dyn FilesystemService>,
    pub library: Arc<dyn MediaLibraryService>,
}

// Global session registry; the write lock serializes command access so the
// per-photo sequence capture -> materialize -> (save | retake) -> cleanup
// stays strictly ordered.
lazy_static::lazy_static! {
    pub(crate) static ref SESSION: Arc<RwLock<Option<CaptureSession>>> =
        Arc::new(RwLock::new(None));
}
