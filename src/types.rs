//! Core value types shared by the capture and preview controllers.

use crate::geometry::GuideFractions;
use serde::{Deserialize, Serialize};

/// Which physical camera feeds the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraFacing {
    Back,
    Front,
}

impl CameraFacing {
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }
}

impl std::fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraFacing::Back => write!(f, "back"),
            CameraFacing::Front => write!(f, "front"),
        }
    }
}

/// Which guide-box shape is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideOrientation {
    Vertical,
    Horizontal,
}

impl GuideOrientation {
    pub fn toggled(self) -> Self {
        match self {
            GuideOrientation::Vertical => GuideOrientation::Horizontal,
            GuideOrientation::Horizontal => GuideOrientation::Vertical,
        }
    }
}

impl std::fmt::Display for GuideOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuideOrientation::Vertical => write!(f, "vertical"),
            GuideOrientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Capture-mode tag attached to each photo. Purely informational to the
/// capture flow; the rendering layer uses it to color the guide box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureCategory {
    Label,
    Fruit,
}

impl CaptureCategory {
    pub fn toggled(self) -> Self {
        match self {
            CaptureCategory::Label => CaptureCategory::Fruit,
            CaptureCategory::Fruit => CaptureCategory::Label,
        }
    }
}

impl std::fmt::Display for CaptureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureCategory::Label => write!(f, "label"),
            CaptureCategory::Fruit => write!(f, "fruit"),
        }
    }
}

/// Snapshot of the capture controller's user-visible state. The rendering
/// layer subscribes to these snapshots; every toggle returns a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureState {
    pub facing: CameraFacing,
    pub orientation: GuideOrientation,
    pub category: CaptureCategory,
}

impl Default for CaptureState {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Back,
            orientation: GuideOrientation::Vertical,
            category: CaptureCategory::Label,
        }
    }
}

/// Options forwarded to the camera service for a still capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Encoder quality in [0.0, 1.0].
    pub quality: f32,
    /// Whether EXIF metadata should be kept on the raw frame.
    pub include_exif: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 1.0,
            include_exif: false,
        }
    }
}

/// A raw frame as produced by the camera service. The dimensions are
/// authoritative from the device, never assumed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Opaque handle to the frame contents.
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

/// One captured photo, owned exclusively by whichever controller currently
/// holds it. Ownership moves from the capture controller to the preview
/// session on hand-off and is released on retake or save completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedImage {
    /// Handle to the raw frame as produced by the camera service.
    pub source_uri: String,
    /// Source frame dimensions at capture time.
    pub width: u32,
    pub height: u32,
    /// Guide-box shape active at capture.
    pub orientation: GuideOrientation,
    /// Capture mode active at capture.
    pub category: CaptureCategory,
    /// Handle to the cropped image, ready for display and save. Always set
    /// before the photo is handed to the preview session.
    pub final_uri: String,
}

/// Output encoding for the cropped photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Descriptor of the live guide box for the rendering layer: proportions
/// plus the state that drives its styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideBox {
    pub orientation: GuideOrientation,
    pub category: CaptureCategory,
    pub fractions: GuideFractions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_toggle_returns_to_original() {
        assert_eq!(CameraFacing::Back.toggled().toggled(), CameraFacing::Back);
        assert_eq!(
            GuideOrientation::Vertical.toggled().toggled(),
            GuideOrientation::Vertical
        );
        assert_eq!(
            CaptureCategory::Fruit.toggled().toggled(),
            CaptureCategory::Fruit
        );
    }

    #[test]
    fn default_state_matches_initial_screen() {
        let state = CaptureState::default();
        assert_eq!(state.facing, CameraFacing::Back);
        assert_eq!(state.orientation, GuideOrientation::Vertical);
        assert_eq!(state.category, CaptureCategory::Label);
    }

    #[test]
    fn enums_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&GuideOrientation::Vertical).unwrap(),
            "\"vertical\""
        );
        assert_eq!(
            serde_json::to_string(&CaptureCategory::Label).unwrap(),
            "\"label\""
        );
        assert_eq!(serde_json::to_string(&OutputFormat::Jpeg).unwrap(), "\"jpeg\"");
    }
}
