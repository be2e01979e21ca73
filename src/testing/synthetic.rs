//! Synthetic capture source.
//!
//! Generates deterministic gradient frames and writes them to disk as JPEG,
//! so the full capture-crop-preview-save flow can run offline.

use crate::errors::GuidecamError;
use crate::services::CameraService;
use crate::types::{CaptureOptions, RawFrame};
use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub struct SyntheticCamera {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    frame_counter: AtomicU64,
}

impl SyntheticCamera {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_resolution(output_dir, 1920, 1080)
    }

    pub fn with_resolution(output_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: width.max(1),
            height: height.max(1),
            frame_counter: AtomicU64::new(0),
        }
    }
}

/// Gradient pattern that varies per frame, so successive captures differ.
fn gradient_frame(frame_number: u64, width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0u8; (width * height * 3) as usize];
    let base = (frame_number % 256) as u8;
    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 3) as usize;
            data[idx] = base.wrapping_add((x % 256) as u8);
            data[idx + 1] = base.wrapping_add((y % 256) as u8);
            data[idx + 2] = base.wrapping_add(((x + y) % 256) as u8);
        }
    }
    data
}

#[async_trait]
impl CameraService for SyntheticCamera {
    async fn capture(&self, options: &CaptureOptions) -> Result<RawFrame, GuidecamError> {
        let frame_number = self.frame_counter.fetch_add(1, Ordering::SeqCst);
        let (width, height) = (self.width, self.height);
        let output_dir = self.output_dir.clone();
        let quality = ((options.quality.clamp(0.0, 1.0) * 100.0) as u8).max(1);

        let uri = tokio::task::spawn_blocking(move || {
            let data = gradient_frame(frame_number, width, height);
            let img = image::RgbImage::from_vec(width, height, data)
                .ok_or_else(|| GuidecamError::Camera("Failed to build frame buffer".to_string()))?;

            std::fs::create_dir_all(&output_dir)
                .map_err(|e| GuidecamError::Camera(format!("Failed to create frame dir: {}", e)))?;
            let path = output_dir.join(format!("frame-{}.jpg", Uuid::new_v4()));

            let mut file = File::create(&path)
                .map_err(|e| GuidecamError::Camera(format!("Failed to create frame file: {}", e)))?;
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut file, quality);
            image::DynamicImage::ImageRgb8(img)
                .write_with_encoder(encoder)
                .map_err(|e| GuidecamError::Camera(format!("Failed to encode frame: {}", e)))?;

            Ok::<String, GuidecamError>(path.to_string_lossy().into_owned())
        })
        .await
        .map_err(|e| GuidecamError::Camera(format!("Capture task join error: {}", e)))??;

        log::debug!("Synthetic frame {} captured to {}", frame_number, uri);
        Ok(RawFrame {
            uri,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_frames_differ() {
        let frame0 = gradient_frame(0, 320, 240);
        let frame1 = gradient_frame(1, 320, 240);
        assert_eq!(frame0.len(), 320 * 240 * 3);
        assert_ne!(frame0[0], frame1[0]);
    }
}
