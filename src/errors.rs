use thiserror::Error;

/// Error taxonomy for the capture / preview / save flow.
///
/// Every external-service failure is converted into one of these kinds at
/// the controller boundary, together with a human-readable message. None of
/// them is fatal to the process: each one leaves the owning controller in a
/// well-defined, user-actionable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidecamError {
    /// Camera or photo-library access denied. Recoverable by re-prompting.
    #[error("Permission error: {0}")]
    Permission(String),

    /// Hardware or capture failure. The current capture is abandoned and
    /// the capture controller returns to idle.
    #[error("Camera error: {0}")]
    Camera(String),

    /// Invalid crop rectangle. With origin clamping in place this indicates
    /// a programming-invariant violation, not a runtime condition.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Crop or image codec failure. Non-fatal, reported to the user.
    #[error("Processing error: {0}")]
    Processing(String),

    /// File copy / delete / probe failure. Non-fatal.
    #[error("IO error: {0}")]
    Io(String),

    /// Photo-library save failure. The preview stays ready so the user can
    /// retry or retake.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// An operation was invoked in a state that does not accept it. Same
    /// class as [`GuidecamError::Geometry`]: a programming-invariant
    /// violation rather than an expected runtime failure.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
