//! # camstamp overlay
//!
//! Overlay compositing for the camstamp pipeline: a drawing surface over an
//! RGBA pixel buffer, a deterministic bitmap text rasterizer, tagged overlay
//! directives resolved from injected time and counter state, the fixed-layout
//! renderer shared by live preview and snapshot capture, and image encoding.

#![warn(clippy::all)]

pub mod directive;
pub mod encode;
pub mod error;
pub mod font;
pub mod renderer;
pub mod surface;

// Re-export main types
pub use directive::{format_counter, FrameCounter, GridSpec, OverlayDirective, OverlayPlan};
pub use encode::{encode_surface, CapturedImage, ImageFormat};
pub use error::{OverlayError, OverlayResult};
pub use font::TextAlign;
pub use renderer::OverlayRenderer;
pub use surface::Surface;
