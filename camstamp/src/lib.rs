//! # camstamp - Camera Capture with Burned-In Overlays
//!
//! camstamp opens a device camera, keeps a live overlay (timestamp,
//! watermark, grid, snapshot counter) synchronized with the stream's native
//! resolution, and on demand captures a full-resolution still with the exact
//! same overlay burned in.
//!
//! ## Key Features
//!
//! - **One renderer, two consumers**: live preview and snapshot capture
//!   share a single deterministic overlay renderer, so the preview is a
//!   faithful rendering of what capture will produce
//! - **Native resolution**: snapshots are taken at the resolution the device
//!   actually delivers, not the display size
//! - **Non-fatal failures**: permission denials and missing devices leave an
//!   inert camera that can be retried, never a crash
//! - **Pluggable backends**: the platform camera by default, a deterministic
//!   mock for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use camstamp::{CamStamp, FacingMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let camstamp = CamStamp::init()?;
//!
//!     // Open the rear camera with a watermarked counter overlay
//!     let mut camera = camstamp
//!         .camera()
//!         .facing(FacingMode::Back)
//!         .watermark("JOJO")
//!         .with_counter()
//!         .start()
//!         .await;
//!
//!     // Take a photo with the overlay burned in
//!     if let Some(photo) = camera.capture().await? {
//!         println!("captured {} ({} bytes)", photo.mime_type(), photo.data.len());
//!     }
//!
//!     camera.stop().await;
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use camstamp_capture::{
    CameraBackend, CameraDevice, CaptureError, CaptureSession, FacingMode, MockCameraBackend,
    MockControl, PixelFormat, Resolution, StreamHandle, VideoFrame,
};
pub use camstamp_overlay::{
    format_counter, CapturedImage, FrameCounter, GridSpec, ImageFormat, OverlayDirective,
    OverlayError, OverlayPlan, OverlayRenderer, Surface,
};

// Public API modules
pub mod camera;
pub mod config;
pub mod error;
pub mod event;

mod preview;
mod snapshot;

// Re-export main API types
pub use camera::{Camera, CameraBuilder};
pub use config::{CameraConfig, GlobalConfig};
pub use error::CamStampError;
pub use event::{Event, EventStream};

/// Main entry point for camstamp
#[derive(Debug, Clone)]
pub struct CamStamp {
    config: GlobalConfig,
}

impl CamStamp {
    /// Initialize camstamp with default settings
    ///
    /// # Example
    /// ```rust,no_run
    /// use camstamp::CamStamp;
    ///
    /// let camstamp = CamStamp::init()?;
    /// # Ok::<(), camstamp::CamStampError>(())
    /// ```
    pub fn init() -> Result<Self, CamStampError> {
        Self::init_with(GlobalConfig::default())
    }

    /// Initialize with custom global configuration
    pub fn init_with(config: GlobalConfig) -> Result<Self, CamStampError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a camera builder
    pub fn camera(&self) -> CameraBuilder {
        CameraBuilder::new(self.config.clone())
    }

    /// The global configuration
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }
}
