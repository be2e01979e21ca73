//! Crop adapter backed by the `image` crate.

use crate::errors::GuidecamError;
use crate::geometry::GuideRect;
use crate::services::CropService;
use crate::types::OutputFormat;
use async_trait::async_trait;
use std::fs::File;
use std::path::PathBuf;
use uuid::Uuid;

/// Crops frames on a blocking worker and writes the result into the app's
/// private temp directory.
pub struct ImageCropper {
    output_dir: PathBuf,
    jpeg_quality: u8,
}

impl ImageCropper {
    pub fn new(output_dir: impl Into<PathBuf>, jpeg_quality: u8) -> Self {
        Self {
            output_dir: output_dir.into(),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }
}

#[async_trait]
impl CropService for ImageCropper {
    async fn crop(
        &self,
        source_uri: &str,
        rect: GuideRect,
        format: OutputFormat,
    ) -> Result<String, GuidecamError> {
        let source = source_uri.to_string();
        let output_dir = self.output_dir.clone();
        let quality = self.jpeg_quality;

        log::debug!("Cropping {} to {}", source, rect);

        // Decode and re-encode are CPU-bound, keep them off the async runtime.
        let output_path = tokio::task::spawn_blocking(move || {
            let img = image::open(&source)
                .map_err(|e| GuidecamError::Processing(format!("Failed to open {}: {}", source, e)))?;

            if !rect.fits_within(img.width(), img.height()) {
                return Err(GuidecamError::Geometry(format!(
                    "crop rect {} exceeds {}x{} source",
                    rect,
                    img.width(),
                    img.height()
                )));
            }

            let cropped = img.crop_imm(rect.origin_x, rect.origin_y, rect.width, rect.height);

            std::fs::create_dir_all(&output_dir)
                .map_err(|e| GuidecamError::Io(format!("Failed to create output dir: {}", e)))?;
            let output_path =
                output_dir.join(format!("crop-{}.{}", Uuid::new_v4(), format.extension()));

            match format {
                OutputFormat::Jpeg => {
                    let mut file = File::create(&output_path).map_err(|e| {
                        GuidecamError::Io(format!("Failed to create output file: {}", e))
                    })?;
                    let encoder =
                        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut file, quality);
                    // JPEG has no alpha channel; flatten before encoding.
                    image::DynamicImage::ImageRgb8(cropped.to_rgb8())
                        .write_with_encoder(encoder)
                        .map_err(|e| {
                            GuidecamError::Processing(format!("Failed to encode JPEG: {}", e))
                        })?;
                }
                OutputFormat::Png => {
                    cropped.save_with_format(&output_path, image::ImageFormat::Png).map_err(
                        |e| GuidecamError::Processing(format!("Failed to encode PNG: {}", e)),
                    )?;
                }
            }

            Ok(output_path.to_string_lossy().into_owned())
        })
        .await
        .map_err(|e| GuidecamError::Processing(format!("Crop task join error: {}", e)))??;

        log::debug!("Cropped frame written to {}", output_path);
        Ok(output_path)
    }
}
