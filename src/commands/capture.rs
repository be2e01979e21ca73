use crate::commands::SESSION;
use crate::preview::{PreviewController, PreviewInfo};
use crate::types::{CaptureState, GuideBox};
use tauri::command;

/// Flip between back and front camera.
#[command]
pub async fn toggle_camera_facing() -> Result<CaptureState, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;
    Ok(session.controller.toggle_facing())
}

/// Flip the guide box between vertical and horizontal.
#[command]
pub async fn toggle_guide_orientation() -> Result<CaptureState, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;
    Ok(session.controller.toggle_orientation())
}

/// Flip between label and fruit capture mode.
#[command]
pub async fn toggle_capture_category() -> Result<CaptureState, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;
    Ok(session.controller.toggle_category())
}

/// Current state snapshot for the rendering layer.
#[command]
pub async fn get_capture_state() -> Result<CaptureState, String> {
    let guard = SESSION.read().await;
    let session = guard.as_ref().ok_or("No active capture session")?;
    Ok(session.controller.state())
}

/// Descriptor of the live guide box (proportions plus styling state).
#[command]
pub async fn get_guide_box() -> Result<GuideBox, String> {
    let guard = SESSION.read().await;
    let session = guard.as_ref().ok_or("No active capture session")?;
    Ok(session.controller.guide_box())
}

/// Capture a photo, crop it to the guide box, and open the preview session.
///
/// Returns `Ok(None)` when the request was ignored because a capture is
/// already in flight.
#[command]
pub async fn take_photo() -> Result<Option<PreviewInfo>, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;

    if session.preview.is_some() {
        return Err("A photo is already in preview; save or retake it first".to_string());
    }

    let photo = match session.controller.capture().await {
        Ok(Some(photo)) => photo,
        Ok(None) => return Ok(None),
        Err(e) => {
            log::error!("Capture failed: {}", e);
            return Err(e.to_string());
        }
    };

    // Ownership of the photo moves to the preview session here.
    let mut preview =
        PreviewController::new(photo, session.filesystem.clone(), session.library.clone());
    preview.materialize().await.map_err(|e| e.to_string())?;

    let info = preview.info();
    session.preview = Some(preview);
    log::info!("Photo ready for preview: {}", info.working_uri);
    Ok(Some(info))
}
