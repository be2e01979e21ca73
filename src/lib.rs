//! Guidecam: guide-box camera capture for Tauri applications
//!
//! This crate drives a camera-capture screen: a live feed with a fixed
//! guide rectangle overlaid, a capture that crops the photo to the guide
//! region, and a preview session with save-to-library and retake actions.
//!
//! # Features
//! - Guide-box geometry with clamped crop rectangles
//! - Capture / crop / preview / save state machines
//! - Pluggable camera, crop, filesystem, and photo-library services
//! - Offline synthetic capture source for development and testing
//!
//! # Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! guidecam = "0.3"
//! tauri = { version = "2.0", features = ["protocol-asset"] }
//! ```
//!
//! Then in your Tauri app:
//! ```rust,ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(guidecam::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
pub mod capture;
pub mod commands;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod permissions;
pub mod preview;
pub mod services;
pub mod types;

// Testing utilities - synthetic capture source and service fakes
pub mod testing;

// Re-exports for convenience
pub use capture::CaptureController;
pub use config::GuidecamConfig;
pub use errors::GuidecamError;
pub use geometry::{guide_rect, GuideFractions, GuideRect};
pub use preview::{PreviewController, PreviewInfo, PreviewState};
pub use types::{
    CameraFacing, CaptureCategory, CaptureOptions, CaptureState, CapturedImage, GuideBox,
    GuideOrientation, OutputFormat, RawFrame,
};

use tauri::{
    plugin::{Builder, TauriPlugin},
    Runtime,
};

/// Initialize the guidecam plugin with all commands
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("guidecam")
        .invoke_handler(tauri::generate_handler![
            // Session commands
            commands::init::initialize_capture_session,
            commands::init::shutdown_capture_session,
            commands::init::is_session_active,
            // Capture commands
            commands::capture::toggle_camera_facing,
            commands::capture::toggle_guide_orientation,
            commands::capture::toggle_capture_category,
            commands::capture::get_capture_state,
            commands::capture::get_guide_box,
            commands::capture::take_photo,
            // Preview commands
            commands::preview::get_preview_state,
            commands::preview::save_photo,
            commands::preview::retake_photo,
            commands::preview::dismiss_preview,
            // Permission commands
            commands::permissions::request_library_permission,
            commands::permissions::check_library_permission_status,
            // Configuration commands
            commands::config::get_config,
            commands::config::update_config,
            commands::config::reset_config,
        ])
        .build()
}

/// Initialize logging for the capture flow
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "guidecam=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn test_crate_metadata() {
        assert_eq!(NAME, "guidecam");
        assert!(!VERSION.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_default_state_is_back_camera_vertical_label() {
        let state = CaptureState::default();
        assert_eq!(state.facing, CameraFacing::Back);
        assert_eq!(state.orientation, GuideOrientation::Vertical);
        assert_eq!(state.category, CaptureCategory::Label);
    }
}
