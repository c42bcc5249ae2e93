//! Configuration types and defaults

use crate::CamStampError;
use camstamp_capture::{FacingMode, Resolution};
use camstamp_overlay::{ImageFormat, OverlayPlan};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Global camstamp configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Preview loop tick rate, the stand-in for display refresh
    pub preview_fps: u32,
    /// How long the capture flash acknowledgment lasts
    pub flash_duration: Duration,
    /// Encoding used by cameras that do not override it
    pub default_encoding: ImageFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            preview_fps: 60,
            flash_duration: Duration::from_millis(150),
            default_encoding: ImageFormat::Png,
        }
    }
}

impl GlobalConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), CamStampError> {
        if self.preview_fps == 0 {
            return Err(CamStampError::Initialization {
                reason: "preview_fps must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Per-camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Which camera to open
    pub facing: FacingMode,
    /// Requested resolution; the device may deliver something else
    pub resolution_hint: Resolution,
    /// Decorations composited onto preview and snapshots
    pub overlay: OverlayPlan,
    /// Snapshot encoding
    pub encoding: ImageFormat,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing: FacingMode::Back,
            resolution_hint: Resolution::UHD_4K,
            overlay: OverlayPlan::default(),
            encoding: ImageFormat::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let global = GlobalConfig::default();
        assert_eq!(global.preview_fps, 60);
        assert_eq!(global.flash_duration, Duration::from_millis(150));
        assert!(global.validate().is_ok());

        let camera = CameraConfig::default();
        assert_eq!(camera.facing, FacingMode::Back);
        assert_eq!(camera.resolution_hint, Resolution::UHD_4K);
        assert_eq!(camera.encoding, ImageFormat::Png);
    }

    #[test]
    fn test_zero_fps_is_rejected() {
        let global = GlobalConfig {
            preview_fps: 0,
            ..Default::default()
        };
        assert!(matches!(
            global.validate(),
            Err(CamStampError::Initialization { .. })
        ));
    }
}
