use crate::commands::SESSION;
use crate::preview::PreviewInfo;
use tauri::command;

/// Snapshot of the active preview session, if any.
#[command]
pub async fn get_preview_state() -> Result<Option<PreviewInfo>, String> {
    let guard = SESSION.read().await;
    let session = guard.as_ref().ok_or("No active capture session")?;
    Ok(session.preview.as_ref().map(|preview| preview.info()))
}

/// Save the previewed photo to the photo library. On success the preview
/// session ends and the screen returns to the live view; on failure the
/// preview stays ready for a retry or retake.
#[command]
pub async fn save_photo() -> Result<String, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;
    let preview = session.preview.as_mut().ok_or("No photo in preview")?;

    match preview.save().await {
        Ok(asset_id) => {
            session.preview = None;
            log::info!("Photo saved, returning to live view");
            Ok(asset_id)
        }
        Err(e) => {
            log::warn!("Save failed, preview kept for retry: {}", e);
            Err(e.to_string())
        }
    }
}

/// Discard the previewed photo and return to the live view.
#[command]
pub async fn retake_photo() -> Result<String, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;

    match session.preview.take() {
        Some(mut preview) => {
            preview.retake().await;
            log::info!("Photo discarded, returning to live view");
            Ok("Photo discarded".to_string())
        }
        None => Ok("No photo in preview".to_string()),
    }
}

/// Forced teardown of the preview session (navigation away). Same cleanup
/// as retake; not an error when no preview is active.
#[command]
pub async fn dismiss_preview() -> Result<String, String> {
    let mut guard = SESSION.write().await;
    let session = guard.as_mut().ok_or("No active capture session")?;

    match session.preview.take() {
        Some(mut preview) => {
            preview.dismiss().await;
            Ok("Preview dismissed".to_string())
        }
        None => Ok("No preview to dismiss".to_string()),
    }
}
