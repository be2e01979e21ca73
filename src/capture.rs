//! Capture controller: owns the camera-facing state, the guide-box
//! geometry, and the single-flight capture sequence.

use crate::config::GuideConfig;
use crate::errors::GuidecamError;
use crate::geometry::guide_rect;
use crate::services::{CameraService, CropService};
use crate::types::{CaptureOptions, CaptureState, CapturedImage, GuideBox, OutputFormat};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Drives the live-view screen: toggles mutate the state snapshot, and
/// `capture` runs the capture-then-crop sequence against the external
/// services. At most one capture is in flight at a time; requests arriving
/// while one is pending are ignored, mirroring a disabled shutter control.
pub struct CaptureController {
    camera: Arc<dyn CameraService>,
    cropper: Arc<dyn CropService>,
    guide: GuideConfig,
    options: CaptureOptions,
    output_format: OutputFormat,
    state: CaptureState,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the capture sequence ends, on every path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CaptureController {
    pub fn new(
        camera: Arc<dyn CameraService>,
        cropper: Arc<dyn CropService>,
        guide: GuideConfig,
        options: CaptureOptions,
        output_format: OutputFormat,
        initial_state: CaptureState,
    ) -> Self {
        Self {
            camera,
            cropper,
            guide,
            options,
            output_format,
            state: initial_state,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Descriptor of the live guide box for the rendering layer.
    pub fn guide_box(&self) -> GuideBox {
        GuideBox {
            orientation: self.state.orientation,
            category: self.state.category,
            fractions: self.guide.fractions(self.state.orientation),
        }
    }

    pub fn toggle_facing(&mut self) -> CaptureState {
        self.state.facing = self.state.facing.toggled();
        log::debug!("Camera facing toggled to {}", self.state.facing);
        self.state
    }

    pub fn toggle_orientation(&mut self) -> CaptureState {
        self.state.orientation = self.state.orientation.toggled();
        log::debug!("Guide orientation toggled to {}", self.state.orientation);
        self.state
    }

    pub fn toggle_category(&mut self) -> CaptureState {
        self.state.category = self.state.category.toggled();
        log::debug!("Capture category toggled to {}", self.state.category);
        self.state
    }

    /// Capture a frame, crop it to the guide box, and return the finished
    /// photo ready for preview.
    ///
    /// Returns `Ok(None)` when another capture is already in flight. Any
    /// service failure abandons the capture and returns the controller to
    /// idle; no partial photo is ever published.
    pub async fn capture(&self) -> Result<Option<CapturedImage>, GuidecamError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            log::debug!("Capture request ignored: another capture is in flight");
            return Ok(None);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.capture_inner().await.map(Some)
    }

    async fn capture_inner(&self) -> Result<CapturedImage, GuidecamError> {
        // Snapshot the state up front so a toggle racing the async sequence
        // cannot mix orientations between geometry and metadata.
        let state = self.state;

        let frame = self.camera.capture(&self.options).await?;
        log::info!(
            "Captured {}x{} frame from {} camera",
            frame.width,
            frame.height,
            state.facing
        );

        let fractions = self.guide.fractions(state.orientation);
        let rect = guide_rect(frame.width, frame.height, &fractions)?;
        log::debug!("Guide rect for {} orientation: {}", state.orientation, rect);

        let final_uri = self
            .cropper
            .crop(&frame.uri, rect, self.output_format)
            .await?;

        Ok(CapturedImage {
            source_uri: frame.uri,
            width: frame.width,
            height: frame.height,
            orientation: state.orientation,
            category: state.category,
            final_uri,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GuidecamConfig;
    use crate::testing::{RecordingCropper, StubCamera};

    fn controller(camera: StubCamera, cropper: RecordingCropper) -> CaptureController {
        let config = GuidecamConfig::default();
        CaptureController::new(
            Arc::new(camera),
            Arc::new(cropper),
            config.guide,
            CaptureOptions::default(),
            OutputFormat::Jpeg,
            CaptureState::default(),
        )
    }

    #[tokio::test]
    async fn capture_uses_current_orientation_fractions() {
        let cropper = Arc::new(RecordingCropper::new());
        let config = GuidecamConfig::default();
        let mut controller = CaptureController::new(
            Arc::new(StubCamera::new(1000, 1000)),
            cropper.clone(),
            config.guide,
            CaptureOptions::default(),
            OutputFormat::Jpeg,
            CaptureState::default(),
        );

        controller.toggle_orientation(); // horizontal: 0.6 x 0.5
        let photo = controller.capture().await.unwrap().unwrap();

        let rect = cropper.last_rect().unwrap();
        assert_eq!(rect.width, 600);
        assert_eq!(rect.height, 500);
        assert_eq!(photo.orientation, crate::types::GuideOrientation::Horizontal);
        assert!(photo.final_uri.ends_with(".cropped.jpg"));
    }

    #[tokio::test]
    async fn camera_failure_leaves_controller_idle() {
        let controller = controller(StubCamera::failing(), RecordingCropper::new());
        let err = controller.capture().await.unwrap_err();
        assert!(matches!(err, GuidecamError::Camera(_)));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn crop_failure_abandons_capture() {
        let controller = controller(StubCamera::new(640, 480), RecordingCropper::failing());
        let err = controller.capture().await.unwrap_err();
        assert!(matches!(err, GuidecamError::Processing(_)));
        assert!(!controller.is_busy());
    }
}
