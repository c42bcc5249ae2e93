//! Native camera backend built on nokhwa

use crate::backend::CameraBackend;
use crate::device::{CameraDevice, FacingMode};
use crate::error::{CaptureError, CaptureResult};
use crate::frame::{epoch_millis, PixelFormat, Resolution, VideoFrame};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::{debug, info, warn};

/// Capture backend using the platform camera API via nokhwa
pub struct NativeCameraBackend {
    camera: Option<Camera>,
    native: Option<Resolution>,
}

impl NativeCameraBackend {
    /// Create an idle backend with no open stream
    pub fn new() -> Self {
        Self {
            camera: None,
            native: None,
        }
    }

    fn classify_open_error(facing: FacingMode, err: &nokhwa::NokhwaError) -> CaptureError {
        let message = err.to_string();
        let lower = message.to_lowercase();
        if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
            CaptureError::PermissionDenied {
                device: facing.as_str().to_string(),
            }
        } else {
            CaptureError::DeviceUnavailable { reason: message }
        }
    }

    fn index_label(index: &CameraIndex) -> String {
        match index {
            CameraIndex::Index(i) => i.to_string(),
            CameraIndex::String(s) => s.clone(),
        }
    }
}

impl Default for NativeCameraBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for NativeCameraBackend {
    fn enumerate(&self) -> CaptureResult<Vec<CameraDevice>> {
        let devices =
            nokhwa::query(ApiBackend::Auto).map_err(|e| CaptureError::DeviceUnavailable {
                reason: e.to_string(),
            })?;
        Ok(devices
            .into_iter()
            .map(|info| {
                let name = info.human_name().to_string();
                CameraDevice {
                    id: Self::index_label(info.index()),
                    facing: FacingMode::guess_from_name(&name),
                    name,
                }
            })
            .collect())
    }

    fn open(&mut self, facing: FacingMode, hint: Resolution) -> CaptureResult<()> {
        self.close();

        let devices =
            nokhwa::query(ApiBackend::Auto).map_err(|e| CaptureError::DeviceUnavailable {
                reason: e.to_string(),
            })?;
        if devices.is_empty() {
            return Err(CaptureError::DeviceNotFound {
                facing: facing.as_str().to_string(),
            });
        }

        // Facing is matched by device name; unnamed layouts fall back to the
        // conventional ordering (rear camera first).
        let position = devices
            .iter()
            .position(|d| facing.matches_name(&d.human_name()))
            .unwrap_or(match facing {
                FacingMode::Back => 0,
                FacingMode::Front => devices.len().saturating_sub(1).min(1),
            });
        let index = devices[position].index().clone();
        debug!(
            device = %Self::index_label(&index),
            facing = facing.as_str(),
            "Opening native camera"
        );

        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(
                nokhwa::utils::Resolution::new(hint.width, hint.height),
                FrameFormat::MJPEG,
                30,
            ),
        ));
        let mut camera =
            Camera::new(index, requested).map_err(|e| Self::classify_open_error(facing, &e))?;
        camera
            .open_stream()
            .map_err(|e| Self::classify_open_error(facing, &e))?;

        let resolution = camera.resolution();
        let native = Resolution::new(resolution.width(), resolution.height());
        info!(
            width = native.width,
            height = native.height,
            "Native camera stream open"
        );
        self.native = Some(native);
        self.camera = Some(camera);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(e) = camera.stop_stream() {
                warn!("Failed to stop camera stream: {}", e);
            }
        }
        self.native = None;
    }

    fn latest_frame(&mut self) -> CaptureResult<Option<VideoFrame>> {
        let Some(camera) = self.camera.as_mut() else {
            return Ok(None);
        };
        let buffer = camera.frame().map_err(|e| CaptureError::Backend {
            reason: e.to_string(),
        })?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::Backend {
                reason: e.to_string(),
            })?;
        let width = decoded.width();
        let height = decoded.height();
        // The stream may renegotiate resolution; track what it delivers.
        self.native = Some(Resolution::new(width, height));
        Ok(Some(VideoFrame {
            width,
            height,
            format: PixelFormat::Rgb24,
            data: decoded.into_raw(),
            timestamp_ms: epoch_millis(),
        }))
    }

    fn native_resolution(&self) -> Option<Resolution> {
        self.native
    }

    fn is_open(&self) -> bool {
        self.camera.is_some()
    }
}
