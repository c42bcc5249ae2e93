//! # camstamp capture
//!
//! Capture device session management for the camstamp pipeline. This crate
//! owns the lifetime of a live camera stream: backend selection, facing-mode
//! device matching, frame delivery, and stream handle release.

#![warn(clippy::all)]

pub mod backend;
pub mod device;
pub mod error;
pub mod frame;
pub mod session;

// Re-export main types
pub use backend::mock::{MockCameraBackend, MockControl};
pub use backend::{default_backend, CameraBackend};
pub use device::{CameraDevice, FacingMode};
pub use error::{CaptureError, CaptureResult};
pub use frame::{epoch_millis, PixelFormat, Resolution, VideoFrame};
pub use session::{CaptureSession, StreamHandle};
