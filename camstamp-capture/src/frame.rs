//! Frame and resolution types

use crate::error::{CaptureError, CaptureResult};
use serde::{Deserialize, Serialize};

/// Supported pixel formats for delivered frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGB, 3 bytes per pixel
    Rgb24,
    /// 8-bit RGBA, 4 bytes per pixel
    Rgba32,
}

impl PixelFormat {
    /// Bytes per pixel for this format
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }
}

/// Video resolution information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Resolution {
    /// Create a new resolution
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 4096x2160, the high-quality capture hint
    pub const UHD_4K: Self = Self::new(4096, 2160);
    /// 1920x1080
    pub const FULL_HD: Self = Self::new(1920, 1080);
    /// 1280x720
    pub const HD: Self = Self::new(1280, 720);
    /// 640x480
    pub const VGA: Self = Self::new(640, 480);

    /// Total pixel count
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Width to height ratio
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// A single decoded video frame as delivered by a capture backend
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format of `data`
    pub format: PixelFormat,
    /// Raw pixel data
    pub data: Vec<u8>,
    /// Capture timestamp in milliseconds since the unix epoch
    pub timestamp_ms: u64,
}

impl VideoFrame {
    /// The frame's native resolution
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// Expected byte length given dimensions and format
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /// Validate that the data length matches the advertised dimensions
    pub fn validate(&self) -> CaptureResult<()> {
        let expected = self.expected_len();
        if self.data.len() != expected {
            return Err(CaptureError::InvalidFrameData {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Current wall-clock time in milliseconds since the unix epoch
pub fn epoch_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_helpers() {
        assert_eq!(Resolution::UHD_4K.width, 4096);
        assert_eq!(Resolution::FULL_HD.pixel_count(), 1920 * 1080);
        let ratio = Resolution::VGA.aspect_ratio();
        assert!((ratio - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_validation() {
        let frame = VideoFrame {
            width: 2,
            height: 2,
            format: PixelFormat::Rgba32,
            data: vec![0; 16],
            timestamp_ms: 0,
        };
        assert!(frame.validate().is_ok());

        let short = VideoFrame {
            data: vec![0; 15],
            ..frame
        };
        match short.validate() {
            Err(CaptureError::InvalidFrameData { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("expected InvalidFrameData, got {:?}", other),
        }
    }
}
