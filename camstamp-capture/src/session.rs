//! Capture session and stream handle lifecycle

use crate::backend::{default_backend, CameraBackend};
use crate::device::{CameraDevice, FacingMode};
use crate::error::CaptureResult;
use crate::frame::{Resolution, VideoFrame};
use tracing::{debug, info};
use uuid::Uuid;

/// An active camera connection.
///
/// Owned exclusively by the [`CaptureSession`] that created it and never
/// cloned out; the session releases it before opening a replacement and on
/// drop.
#[derive(Debug)]
pub struct StreamHandle {
    id: Uuid,
    facing: FacingMode,
    hint: Resolution,
    live: bool,
}

impl StreamHandle {
    /// Unique id of this stream
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Facing mode the stream was opened with
    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    /// Resolution hint the stream was requested with
    pub fn hint(&self) -> Resolution {
        self.hint
    }

    /// Whether the stream is live
    pub fn is_live(&self) -> bool {
        self.live
    }
}

/// Owns the lifetime of a live camera stream acquired from a backend.
///
/// Open failures leave the session with no handle; frame requests then
/// return `Ok(None)` until a later open succeeds.
pub struct CaptureSession {
    backend: Box<dyn CameraBackend>,
    handle: Option<StreamHandle>,
    hint: Resolution,
}

impl CaptureSession {
    /// Create a session over the platform default backend
    pub fn new(hint: Resolution) -> Self {
        Self::with_backend(default_backend(), hint)
    }

    /// Create a session over an explicit backend
    pub fn with_backend(backend: Box<dyn CameraBackend>, hint: Resolution) -> Self {
        Self {
            backend,
            handle: None,
            hint,
        }
    }

    /// List cameras visible to the backend
    pub fn devices(&self) -> CaptureResult<Vec<CameraDevice>> {
        self.backend.enumerate()
    }

    /// Open a stream for the given facing mode, releasing any existing one
    /// first
    pub fn open(&mut self, facing: FacingMode) -> CaptureResult<&StreamHandle> {
        self.close();
        debug!(facing = facing.as_str(), "Opening capture session");
        self.backend.open(facing, self.hint)?;
        let handle = StreamHandle {
            id: Uuid::new_v4(),
            facing,
            hint: self.hint,
            live: true,
        };
        info!(stream = %handle.id, facing = facing.as_str(), "Capture session open");
        Ok(&*self.handle.insert(handle))
    }

    /// Stop all tracks and release the handle. Idempotent.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.live = false;
            self.backend.close();
            debug!(stream = %handle.id, "Capture session closed");
        }
    }

    /// Close the existing stream, then open a new one with the given facing
    /// mode, preserving the resolution hint
    pub fn switch_facing(&mut self, facing: FacingMode) -> CaptureResult<&StreamHandle> {
        debug!(facing = facing.as_str(), "Switching capture facing");
        self.open(facing)
    }

    /// The most recent frame, or `None` when no stream is live
    pub fn latest_frame(&mut self) -> CaptureResult<Option<VideoFrame>> {
        if self.handle.is_none() {
            return Ok(None);
        }
        self.backend.latest_frame()
    }

    /// Native resolution of the live stream, if any
    pub fn native_resolution(&self) -> Option<Resolution> {
        self.backend.native_resolution()
    }

    /// The live stream handle, if any
    pub fn handle(&self) -> Option<&StreamHandle> {
        self.handle.as_ref()
    }

    /// Whether a stream is currently live
    pub fn is_live(&self) -> bool {
        self.handle.as_ref().map(|h| h.live).unwrap_or(false)
    }

    /// The configured resolution hint
    pub fn hint(&self) -> Resolution {
        self.hint
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.close();
    }
}
