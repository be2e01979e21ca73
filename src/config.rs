//! Configuration management for guidecam.
//!
//! Provides loading, saving, and validation of camera defaults, guide-box
//! proportions, and storage preferences.

use crate::errors::GuidecamError;
use crate::geometry::GuideFractions;
use crate::types::{CameraFacing, GuideOrientation, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidecamConfig {
    pub camera: CameraConfig,
    pub guide: GuideConfig,
    pub storage: StorageConfig,
}

/// Camera-facing defaults for a new capture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera the session starts on
    pub facing: CameraFacing,
    /// Frame resolution requested from the capture source [width, height]
    pub default_resolution: [u32; 2],
    /// Still-capture encoder quality (0.0-1.0)
    pub quality: f32,
    /// Keep EXIF metadata on captured frames
    pub include_exif: bool,
}

/// Guide-box proportions per orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    pub vertical: GuideFractions,
    pub horizontal: GuideFractions,
}

impl GuideConfig {
    /// Fractions for the currently active orientation.
    pub fn fractions(&self, orientation: GuideOrientation) -> GuideFractions {
        match orientation {
            GuideOrientation::Vertical => self.vertical,
            GuideOrientation::Horizontal => self.horizontal,
        }
    }
}

/// Storage and file management configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the photo library writes saved photos into
    pub output_directory: String,
    /// Organize saved photos into per-date subdirectories
    pub auto_organize_by_date: bool,
    /// Private directory for cropped frames and preview copies
    pub temp_directory: String,
    /// Encoding of the cropped photo
    pub output_format: OutputFormat,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for GuidecamConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                facing: CameraFacing::Back,
                default_resolution: [1920, 1080],
                quality: 1.0,
                include_exif: false,
            },
            guide: GuideConfig {
                vertical: GuideFractions::new(0.8, 0.3),
                horizontal: GuideFractions::new(0.6, 0.5),
            },
            storage: StorageConfig {
                output_directory: "./captures".to_string(),
                auto_organize_by_date: true,
                temp_directory: std::env::temp_dir()
                    .join("guidecam")
                    .to_string_lossy()
                    .into_owned(),
                output_format: OutputFormat::Jpeg,
                jpeg_quality: 95,
            },
        }
    }
}

impl GuidecamConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, GuidecamError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| GuidecamError::Io(format!("Failed to read config file: {}", e)))?;

        let config: GuidecamConfig = toml::from_str(&contents)
            .map_err(|e| GuidecamError::Io(format!("Failed to parse config file: {}", e)))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GuidecamError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GuidecamError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| GuidecamError::Io(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| GuidecamError::Io(format!("Failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("guidecam.toml")
    }

    /// Load from default location or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.camera.default_resolution[0] == 0 || self.camera.default_resolution[1] == 0 {
            return Err("Invalid default resolution".to_string());
        }
        if !(0.0..=1.0).contains(&self.camera.quality) {
            return Err("Capture quality must be between 0.0 and 1.0".to_string());
        }

        self.guide
            .vertical
            .validate()
            .map_err(|e| format!("Vertical guide box: {}", e))?;
        self.guide
            .horizontal
            .validate()
            .map_err(|e| format!("Horizontal guide box: {}", e))?;

        if self.storage.jpeg_quality == 0 || self.storage.jpeg_quality > 100 {
            return Err("JPEG quality must be between 1 and 100".to_string());
        }
        if self.storage.output_directory.is_empty() {
            return Err("Output directory must not be empty".to_string());
        }
        if self.storage.temp_directory.is_empty() {
            return Err("Temp directory must not be empty".to_string());
        }

        Ok(())
    }
}
