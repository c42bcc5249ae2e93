//! Capture error types and handling

use thiserror::Error;

/// Main error type for capture operations
#[derive(Error, Debug)]
pub enum CaptureError {
    /// User or platform declined camera access
    #[error("Permission denied opening {device} camera")]
    PermissionDenied {
        /// Device the permission request was for
        device: String,
    },

    /// No matching camera, or the device is already in use
    #[error("Device unavailable: {reason}")]
    DeviceUnavailable {
        /// Failure reason
        reason: String,
    },

    /// No camera matches the requested facing mode
    #[error("No camera found for facing mode {facing}")]
    DeviceNotFound {
        /// Requested facing mode
        facing: String,
    },

    /// Frame data does not match the advertised dimensions
    #[error("Invalid frame data: expected {expected} bytes, got {actual}")]
    InvalidFrameData {
        /// Expected data size
        expected: usize,
        /// Actual data size
        actual: usize,
    },

    /// Platform backend failure while a stream was live
    #[error("Backend error: {reason}")]
    Backend {
        /// Failure reason
        reason: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },
}

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

impl CaptureError {
    /// Check if error is recoverable by retrying the open
    pub fn is_recoverable(&self) -> bool {
        match self {
            CaptureError::PermissionDenied { .. } => false,
            CaptureError::DeviceUnavailable { .. } => true,
            CaptureError::DeviceNotFound { .. } => true,
            CaptureError::InvalidFrameData { .. } => false,
            CaptureError::Backend { .. } => true,
            CaptureError::InvalidConfiguration { .. } => false,
        }
    }
}
