use crate::capture::CaptureController;
use crate::commands::{CaptureSession, SESSION};
use crate::config::GuidecamConfig;
use crate::services::{FolderLibrary, ImageCropper, NativeFilesystem};
use crate::testing::SyntheticCamera;
use crate::types::{CaptureOptions, CaptureState};
use std::sync::Arc;
use tauri::command;

/// Start a capture session, replacing any existing one.
///
/// With no explicit config the persisted configuration is used. The default
/// service set wires the offline synthetic capture source; host apps with a
/// real camera install their own [`crate::services::CameraService`] through
/// [`crate::commands::start_session_with`].
#[command]
pub async fn initialize_capture_session(
    config: Option<GuidecamConfig>,
) -> Result<CaptureState, String> {
    let config = match config {
        Some(config) => {
            config.validate()?;
            config
        }
        None => crate::commands::config::current_config().await?,
    };

    log::info!("Initializing capture session");

    let temp_dir = config.storage.temp_directory.clone();
    let filesystem = Arc::new(NativeFilesystem::new(&temp_dir).map_err(|e| e.to_string())?);
    let cropper = Arc::new(ImageCropper::new(&temp_dir, config.storage.jpeg_quality));
    let camera = Arc::new(SyntheticCamera::with_resolution(
        &temp_dir,
        config.camera.default_resolution[0],
        config.camera.default_resolution[1],
    ));
    let library = Arc::new(FolderLibrary::new(
        &config.storage.output_directory,
        config.storage.auto_organize_by_date,
    ));

    let controller = CaptureController::new(
        camera,
        cropper,
        config.guide.clone(),
        CaptureOptions {
            quality: config.camera.quality,
            include_exif: config.camera.include_exif,
        },
        config.storage.output_format,
        CaptureState {
            facing: config.camera.facing,
            ..CaptureState::default()
        },
    );

    start_session_with(CaptureSession {
        controller,
        preview: None,
        filesystem,
        library,
    })
    .await
}

/// Install a fully wired session. Public so host apps and tests can supply
/// their own service implementations.
pub async fn start_session_with(session: CaptureSession) -> Result<CaptureState, String> {
    let state = session.controller.state();

    let mut guard = SESSION.write().await;
    if let Some(mut previous) = guard.take() {
        if let Some(mut preview) = previous.preview.take() {
            log::warn!("Replacing session with an active preview; cleaning it up");
            preview.dismiss().await;
        }
    }
    *guard = Some(session);

    log::info!("Capture session ready");
    Ok(state)
}

/// End the capture session, cleaning up any active preview.
#[command]
pub async fn shutdown_capture_session() -> Result<String, String> {
    let mut guard = SESSION.write().await;
    match guard.take() {
        Some(mut session) => {
            if let Some(mut preview) = session.preview.take() {
                preview.dismiss().await;
            }
            log::info!("Capture session shut down");
            Ok("Capture session shut down".to_string())
        }
        None => Ok("No active capture session".to_string()),
    }
}

/// Whether a capture session is currently active.
#[command]
pub async fn is_session_active() -> bool {
    SESSION.read().await.is_some()
}
