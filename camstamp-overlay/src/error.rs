//! Overlay error types

use thiserror::Error;

/// Main error type for overlay and encoding operations
#[derive(Error, Debug)]
pub enum OverlayError {
    /// Drawing surface has no pixels yet. Transient and expected before the
    /// first frame arrives.
    #[error("Drawing surface not ready")]
    SurfaceNotReady,

    /// Frame data could not be copied onto the surface
    #[error("Invalid frame: {reason}")]
    InvalidFrame {
        /// Failure reason
        reason: String,
    },

    /// Image encoding failed
    #[error("Encoding failed: {reason}")]
    Encoding {
        /// Failure reason
        reason: String,
    },
}

/// Result type alias for overlay operations
pub type OverlayResult<T> = Result<T, OverlayError>;
