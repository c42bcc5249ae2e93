//! RGBA drawing surface

use crate::error::{OverlayError, OverlayResult};
use camstamp_capture::{PixelFormat, VideoFrame};
use image::{Rgba, RgbaImage};
use tracing::trace;

/// A 2D drawing surface backed by an RGBA pixel buffer.
///
/// The live preview loop reuses one surface, resizing it to the current
/// native frame dimensions and clearing it before every render. The snapshot
/// pipeline sizes a fresh surface from the captured frame instead.
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Create a transparent surface of the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Resize to the given dimensions. Reallocates only when the dimensions
    /// actually change; the content after a reallocation is transparent.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.width() != width || self.image.height() != height {
            trace!(width, height, "Resizing overlay surface");
            self.image = RgbaImage::new(width, height);
        }
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Resize to the frame's native dimensions and copy its pixels in,
    /// expanding RGB data to opaque RGBA
    pub fn copy_frame(&mut self, frame: &VideoFrame) -> OverlayResult<()> {
        frame.validate().map_err(|e| OverlayError::InvalidFrame {
            reason: e.to_string(),
        })?;
        let rgba = match frame.format {
            PixelFormat::Rgba32 => frame.data.clone(),
            PixelFormat::Rgb24 => {
                let mut data = Vec::with_capacity(frame.data.len() / 3 * 4);
                for chunk in frame.data.chunks_exact(3) {
                    data.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
                }
                data
            }
        };
        self.image = RgbaImage::from_raw(frame.width, frame.height, rgba).ok_or(
            OverlayError::InvalidFrame {
                reason: "frame data does not fill its dimensions".to_string(),
            },
        )?;
        Ok(())
    }

    /// Source-over blend a single pixel. Out-of-bounds coordinates are
    /// ignored so callers can draw partially clipped glyphs.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = color[3] as u32;
        if alpha == 0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        if alpha == 255 {
            *pixel = Rgba(color);
            return;
        }
        let inverse = 255 - alpha;
        for channel in 0..3 {
            pixel.0[channel] =
                ((color[channel] as u32 * alpha + pixel.0[channel] as u32 * inverse) / 255) as u8;
        }
        pixel.0[3] = (alpha + pixel.0[3] as u32 * inverse / 255) as u8;
    }

    /// Read a pixel. Panics when out of bounds; intended for assertions.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Borrow the backing image
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the surface, returning the backing image
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
