//! Top-level error type

use camstamp_capture::CaptureError;
use camstamp_overlay::OverlayError;
use thiserror::Error;

/// Main error type for the camstamp API
#[derive(Error, Debug)]
pub enum CamStampError {
    /// Initialization error
    #[error("Initialization failed: {reason}")]
    Initialization {
        /// Reason for initialization failure
        reason: String,
    },

    /// Capture device error
    #[error("Capture error: {source}")]
    Capture {
        /// Underlying capture error
        #[from]
        source: CaptureError,
    },

    /// Overlay rendering or encoding error
    #[error("Overlay error: {source}")]
    Overlay {
        /// Underlying overlay error
        #[from]
        source: OverlayError,
    },
}
