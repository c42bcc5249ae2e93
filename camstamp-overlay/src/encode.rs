//! Surface encoding and the captured image artifact

use crate::error::{OverlayError, OverlayResult};
use crate::surface::Surface;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless PNG
    Png,
    /// Lossy JPEG at the given quality (0-100)
    Jpeg {
        /// Encoder quality
        quality: u8,
    },
}

impl ImageFormat {
    /// JPEG at quality 95
    pub const JPEG_HIGH_QUALITY: Self = Self::Jpeg { quality: 95 };

    /// MIME type for data-URL export
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        Self::Png
    }
}

/// An encoded still image produced by the snapshot pipeline.
///
/// Owned by the caller; the pipeline only produces it.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    /// Encoded image bytes
    pub data: Vec<u8>,
    /// Encoding of `data`
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Counter value the snapshot was taken with
    pub sequence: u64,
}

impl CapturedImage {
    /// MIME type of the encoded data
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// The image as a self-contained displayable data URL
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.data)
        )
    }
}

/// Encode a surface to the given image format
pub fn encode_surface(surface: &Surface, format: ImageFormat) -> OverlayResult<Vec<u8>> {
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        return Err(OverlayError::SurfaceNotReady);
    }
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut bytes)
                .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| OverlayError::Encoding {
                    reason: e.to_string(),
                })?;
        }
        ImageFormat::Jpeg { quality } => {
            // JPEG has no alpha channel.
            let rgb: Vec<u8> = surface
                .as_raw()
                .chunks_exact(4)
                .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut bytes, quality)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| OverlayError::Encoding {
                    reason: e.to_string(),
                })?;
        }
    }
    debug!(
        width,
        height,
        bytes = bytes.len(),
        mime = format.mime_type(),
        "Encoded surface"
    );
    Ok(bytes)
}
