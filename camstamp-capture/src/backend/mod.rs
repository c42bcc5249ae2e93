//! Platform capture backends

pub mod mock;
#[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
pub mod native;

use crate::device::{CameraDevice, FacingMode};
use crate::error::CaptureResult;
use crate::frame::{Resolution, VideoFrame};

/// Platform-specific camera backend.
///
/// Implementations deliver decoded frames at whatever native resolution the
/// device negotiated, which may differ from the requested hint.
pub trait CameraBackend: Send {
    /// List cameras visible to this backend
    fn enumerate(&self) -> CaptureResult<Vec<CameraDevice>>;

    /// Open a stream for the given facing mode with a resolution hint.
    /// An already-open stream is released first.
    fn open(&mut self, facing: FacingMode, hint: Resolution) -> CaptureResult<()>;

    /// Release the stream. Idempotent.
    fn close(&mut self);

    /// The most recent frame, or `None` when no stream is open
    fn latest_frame(&mut self) -> CaptureResult<Option<VideoFrame>>;

    /// Native resolution of the open stream, if any
    fn native_resolution(&self) -> Option<Resolution>;

    /// Whether a stream is currently open
    fn is_open(&self) -> bool;
}

/// Get the appropriate platform capture backend
pub fn default_backend() -> Box<dyn CameraBackend> {
    #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
    {
        Box::new(native::NativeCameraBackend::new())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Box::new(mock::MockCameraBackend::new())
    }
}
