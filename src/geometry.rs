//! Guide-box geometry.
//!
//! The guide box is the rectangle overlaid on the live camera view that
//! marks the region kept after cropping. Its pixel rectangle is derived
//! deterministically from the frame dimensions reported by the camera and
//! the configured fractions; nothing downstream ever re-derives it.

use crate::errors::GuidecamError;
use serde::{Deserialize, Serialize};

/// Guide-box proportions relative to the captured frame.
///
/// `vertical_shift` moves the box up from the frame center by that fraction
/// of the frame height. A shift that would push the box past the frame edge
/// is clamped, never forwarded to the crop service as an out-of-bounds
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideFractions {
    /// Box width as a fraction of frame width (0, 1].
    pub width_fraction: f64,
    /// Box height as a fraction of frame height (0, 1].
    pub height_fraction: f64,
    /// Upward shift from center as a fraction of frame height [0, 1].
    pub vertical_shift: f64,
}

impl GuideFractions {
    pub fn new(width_fraction: f64, height_fraction: f64) -> Self {
        Self {
            width_fraction,
            height_fraction,
            vertical_shift: 0.0,
        }
    }

    pub fn with_vertical_shift(mut self, shift: f64) -> Self {
        self.vertical_shift = shift;
        self
    }

    /// Validate fraction ranges. Used both by config validation and by
    /// [`guide_rect`] before computing a rectangle.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width_fraction > 0.0 && self.width_fraction <= 1.0) {
            return Err(format!(
                "width fraction must be in (0, 1], got {}",
                self.width_fraction
            ));
        }
        if !(self.height_fraction > 0.0 && self.height_fraction <= 1.0) {
            return Err(format!(
                "height fraction must be in (0, 1], got {}",
                self.height_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.vertical_shift) {
            return Err(format!(
                "vertical shift must be in [0, 1], got {}",
                self.vertical_shift
            ));
        }
        Ok(())
    }
}

/// A crop rectangle in frame pixel coordinates.
///
/// Invariant: `origin_x + width <= frame width` and
/// `origin_y + height <= frame height` for the frame it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRect {
    pub origin_x: u32,
    pub origin_y: u32,
    pub width: u32,
    pub height: u32,
}

impl GuideRect {
    /// Whether the rectangle fits inside a frame of the given dimensions.
    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.width >= 1
            && self.height >= 1
            && self.origin_x.checked_add(self.width).is_some_and(|r| r <= frame_width)
            && self.origin_y.checked_add(self.height).is_some_and(|b| b <= frame_height)
    }
}

impl std::fmt::Display for GuideRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.origin_x, self.origin_y
        )
    }
}

/// Compute the guide rectangle for a frame.
///
/// The frame dimensions are the authoritative values reported by the camera
/// at capture time. The box is centered horizontally; vertically it sits at
/// center minus `vertical_shift * height`, clamped to the frame bounds so
/// the crop service is never asked for a rectangle outside the frame.
pub fn guide_rect(
    frame_width: u32,
    frame_height: u32,
    fractions: &GuideFractions,
) -> Result<GuideRect, GuidecamError> {
    if frame_width == 0 || frame_height == 0 {
        return Err(GuidecamError::Geometry(format!(
            "frame has zero dimension: {}x{}",
            frame_width, frame_height
        )));
    }
    fractions.validate().map_err(GuidecamError::Geometry)?;

    let width = ((frame_width as f64 * fractions.width_fraction).round() as u32)
        .clamp(1, frame_width);
    let height = ((frame_height as f64 * fractions.height_fraction).round() as u32)
        .clamp(1, frame_height);

    let origin_x = (frame_width - width) / 2;

    let centered_y = (frame_height - height) as f64 / 2.0;
    let raw_y = centered_y - fractions.vertical_shift * frame_height as f64;
    let max_y = (frame_height - height) as i64;
    let origin_y = (raw_y.round() as i64).clamp(0, max_y) as u32;

    let rect = GuideRect {
        origin_x,
        origin_y,
        width,
        height,
    };
    debug_assert!(rect.fits_within(frame_width, frame_height));
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_box_with_shift() {
        let fractions = GuideFractions::new(0.6, 0.5).with_vertical_shift(0.1);
        let rect = guide_rect(1000, 2000, &fractions).unwrap();
        assert_eq!(rect.width, 600);
        assert_eq!(rect.height, 1000);
        assert_eq!(rect.origin_x, 200);
        assert_eq!(rect.origin_y, 300);
        assert!(rect.fits_within(1000, 2000));
    }

    #[test]
    fn oversized_shift_clamps_to_top_edge() {
        let fractions = GuideFractions::new(0.8, 0.5).with_vertical_shift(0.6);
        let rect = guide_rect(500, 500, &fractions).unwrap();
        // Raw origin would be (500-250)/2 - 300 = -175.
        assert_eq!(rect.origin_y, 0);
        assert!(rect.fits_within(500, 500));
    }

    #[test]
    fn full_frame_fractions() {
        let rect = guide_rect(640, 480, &GuideFractions::new(1.0, 1.0)).unwrap();
        assert_eq!(rect.origin_x, 0);
        assert_eq!(rect.origin_y, 0);
        assert_eq!(rect.width, 640);
        assert_eq!(rect.height, 480);
    }

    #[test]
    fn tiny_frame_keeps_at_least_one_pixel() {
        let rect = guide_rect(3, 3, &GuideFractions::new(0.01, 0.01)).unwrap();
        assert!(rect.width >= 1 && rect.height >= 1);
        assert!(rect.fits_within(3, 3));
    }

    #[test]
    fn zero_frame_is_rejected() {
        let err = guide_rect(0, 1080, &GuideFractions::new(0.8, 0.3)).unwrap_err();
        assert!(matches!(err, GuidecamError::Geometry(_)));
    }

    #[test]
    fn bad_fractions_are_rejected() {
        assert!(guide_rect(100, 100, &GuideFractions::new(0.0, 0.5)).is_err());
        assert!(guide_rect(100, 100, &GuideFractions::new(0.5, 1.2)).is_err());
        let shifted = GuideFractions::new(0.5, 0.5).with_vertical_shift(-0.1);
        assert!(guide_rect(100, 100, &shifted).is_err());
    }
}
