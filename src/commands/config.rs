use crate::config::GuidecamConfig;
use std::sync::{Arc, RwLock};
use tauri::command;

lazy_static::lazy_static! {
    static ref GLOBAL_CONFIG: Arc<RwLock<GuidecamConfig>> =
        Arc::new(RwLock::new(GuidecamConfig::load_or_default()));
}

/// Snapshot of the current configuration for session wiring.
pub(crate) async fn current_config() -> Result<GuidecamConfig, String> {
    let config = GLOBAL_CONFIG.read().map_err(|e| e.to_string())?;
    Ok(config.clone())
}

/// Get the current configuration
#[command]
pub async fn get_config() -> Result<GuidecamConfig, String> {
    let config = GLOBAL_CONFIG.read().map_err(|e| e.to_string())?;
    Ok(config.clone())
}

/// Update configuration
#[command]
pub async fn update_config(new_config: GuidecamConfig) -> Result<(), String> {
    new_config.validate()?;

    {
        let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
        *config = new_config.clone();
    }

    new_config
        .save_to_file(GuidecamConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Reset configuration to defaults
#[command]
pub async fn reset_config() -> Result<GuidecamConfig, String> {
    let default_config = GuidecamConfig::default();

    {
        let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
        *config = default_config.clone();
    }

    default_config
        .save_to_file(GuidecamConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(default_config)
}
