use crate::commands::SESSION;
use crate::permissions::{PermissionInfo, PermissionStatus};
use tauri::command;

/// Request photo-library permission, prompting the user where supported.
#[command]
pub async fn request_library_permission() -> Result<PermissionInfo, String> {
    log::info!("Requesting photo library permission");

    let guard = SESSION.read().await;
    let session = guard.as_ref().ok_or("No active capture session")?;

    let status = session
        .library
        .request_permission()
        .await
        .map_err(|e| e.to_string())?;

    Ok(info_for(status))
}

/// Check photo-library permission without prompting.
#[command]
pub async fn check_library_permission_status() -> Result<PermissionInfo, String> {
    log::debug!("Checking photo library permission status");

    let guard = SESSION.read().await;
    let session = guard.as_ref().ok_or("No active capture session")?;

    let status = session
        .library
        .permission_status()
        .await
        .map_err(|e| e.to_string())?;

    Ok(info_for(status))
}

fn info_for(status: PermissionStatus) -> PermissionInfo {
    let message = match status {
        PermissionStatus::Granted => "Photo library access granted",
        PermissionStatus::Denied => {
            "Photo library access denied - saving photos requires library permission"
        }
        PermissionStatus::NotDetermined => "Photo library permission not yet requested",
    };
    PermissionInfo::new(status, message)
}
