//! Mock camera backend for testing and unsupported platforms

use crate::backend::CameraBackend;
use crate::device::{CameraDevice, FacingMode};
use crate::error::{CaptureError, CaptureResult};
use crate::frame::{epoch_millis, PixelFormat, Resolution, VideoFrame};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Shared control and accounting handle for a [`MockCameraBackend`].
///
/// Tests hold a clone to change the native resolution mid-stream, force
/// permission denials, and assert that every opened stream was released.
#[derive(Debug, Default)]
pub struct MockControl {
    opens: AtomicU64,
    closes: AtomicU64,
    deny_open: AtomicBool,
    native_override: RwLock<Option<Resolution>>,
}

impl MockControl {
    /// Streams opened so far
    pub fn opens(&self) -> u64 {
        self.opens.load(Ordering::SeqCst)
    }

    /// Streams released so far
    pub fn closes(&self) -> u64 {
        self.closes.load(Ordering::SeqCst)
    }

    /// Streams currently open (opened minus released)
    pub fn live_streams(&self) -> u64 {
        self.opens().saturating_sub(self.closes())
    }

    /// Make subsequent opens fail with `PermissionDenied`
    pub fn set_denying(&self, deny: bool) {
        self.deny_open.store(deny, Ordering::SeqCst);
    }

    /// Change the native resolution delivered from the next frame on,
    /// modeling a mid-stream renegotiation
    pub fn set_native_resolution(&self, resolution: Resolution) {
        *self.native_override.write() = Some(resolution);
    }
}

/// Mock capture backend delivering deterministic gradient frames
pub struct MockCameraBackend {
    control: Arc<MockControl>,
    facing: Option<FacingMode>,
    native: Resolution,
    sequence: u64,
}

impl MockCameraBackend {
    /// Create a mock backend with its own control handle
    pub fn new() -> Self {
        Self::with_control(Arc::new(MockControl::default()))
    }

    /// Create a mock backend sharing the given control handle
    pub fn with_control(control: Arc<MockControl>) -> Self {
        Self {
            control,
            facing: None,
            native: Resolution::VGA,
            sequence: 0,
        }
    }

    /// The control handle shared with this backend
    pub fn control(&self) -> Arc<MockControl> {
        self.control.clone()
    }

    fn current_native(&self) -> Resolution {
        (*self.control.native_override.read()).unwrap_or(self.native)
    }

    fn test_frame(&self, resolution: Resolution, sequence: u64) -> VideoFrame {
        let (w, h) = (resolution.width, resolution.height);
        let mut data = vec![0u8; w as usize * h as usize * 4];
        for y in 0..h {
            for x in 0..w {
                let i = ((y * w + x) * 4) as usize;
                data[i] = ((x * 255) / w.max(1)) as u8;
                data[i + 1] = ((y * 255) / h.max(1)) as u8;
                data[i + 2] = (sequence % 256) as u8;
                data[i + 3] = 255;
            }
        }
        VideoFrame {
            width: w,
            height: h,
            format: PixelFormat::Rgba32,
            data,
            timestamp_ms: epoch_millis(),
        }
    }
}

impl Default for MockCameraBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for MockCameraBackend {
    fn enumerate(&self) -> CaptureResult<Vec<CameraDevice>> {
        Ok(vec![
            CameraDevice {
                id: "mock-0".to_string(),
                name: "Mock Back Camera".to_string(),
                facing: Some(FacingMode::Back),
            },
            CameraDevice {
                id: "mock-1".to_string(),
                name: "Mock Front Camera".to_string(),
                facing: Some(FacingMode::Front),
            },
        ])
    }

    fn open(&mut self, facing: FacingMode, _hint: Resolution) -> CaptureResult<()> {
        self.close();
        if self.control.deny_open.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied {
                device: facing.as_str().to_string(),
            });
        }
        self.control.opens.fetch_add(1, Ordering::SeqCst);
        self.facing = Some(facing);
        self.sequence = 0;
        Ok(())
    }

    fn close(&mut self) {
        if self.facing.take().is_some() {
            self.control.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn latest_frame(&mut self) -> CaptureResult<Option<VideoFrame>> {
        if self.facing.is_none() {
            return Ok(None);
        }
        self.sequence += 1;
        let resolution = self.current_native();
        Ok(Some(self.test_frame(resolution, self.sequence)))
    }

    fn native_resolution(&self) -> Option<Resolution> {
        self.facing.map(|_| self.current_native())
    }

    fn is_open(&self) -> bool {
        self.facing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_deterministic() {
        let mut backend = MockCameraBackend::new();
        backend.open(FacingMode::Back, Resolution::VGA).unwrap();
        let first = backend.latest_frame().unwrap().unwrap();
        assert_eq!(first.resolution(), Resolution::VGA);
        assert!(first.validate().is_ok());

        let mut other = MockCameraBackend::new();
        other.open(FacingMode::Back, Resolution::VGA).unwrap();
        let again = other.latest_frame().unwrap().unwrap();
        assert_eq!(first.data, again.data);
    }

    #[test]
    fn test_open_close_accounting() {
        let mut backend = MockCameraBackend::new();
        let control = backend.control();

        backend.open(FacingMode::Back, Resolution::VGA).unwrap();
        backend.open(FacingMode::Front, Resolution::VGA).unwrap();
        backend.close();
        backend.close();

        assert_eq!(control.opens(), 2);
        assert_eq!(control.closes(), 2);
        assert_eq!(control.live_streams(), 0);
    }
}
