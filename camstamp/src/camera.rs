//! Camera session management and API

use crate::config::{CameraConfig, GlobalConfig};
use crate::event::{Event, EventStream};
use crate::preview::PreviewLoop;
use crate::{snapshot, CamStampError};
use camstamp_capture::{CameraBackend, CaptureSession, FacingMode, Resolution};
use camstamp_overlay::{
    CapturedImage, FrameCounter, GridSpec, ImageFormat, OverlayPlan, OverlayRenderer, Surface,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// State shared between the camera, the preview loop task, and the snapshot
/// pipeline. Locks are never held across an await point.
pub(crate) struct Shared {
    pub(crate) global: GlobalConfig,
    pub(crate) config: RwLock<CameraConfig>,
    pub(crate) session: Mutex<CaptureSession>,
    pub(crate) surface: Mutex<Surface>,
    pub(crate) counter: FrameCounter,
    pub(crate) renderer: OverlayRenderer,
    pub(crate) event_tx: mpsc::UnboundedSender<Event>,
}

/// Fluent builder for camera configuration and startup
pub struct CameraBuilder {
    global: GlobalConfig,
    config: CameraConfig,
    backend: Option<Box<dyn CameraBackend>>,
}

impl CameraBuilder {
    pub(crate) fn new(global: GlobalConfig) -> Self {
        let config = CameraConfig {
            encoding: global.default_encoding,
            ..CameraConfig::default()
        };
        Self {
            global,
            config,
            backend: None,
        }
    }

    /// Select the camera facing mode
    pub fn facing(mut self, facing: FacingMode) -> Self {
        self.config.facing = facing;
        self
    }

    /// Set the resolution hint passed to the device
    pub fn resolution_hint(mut self, hint: Resolution) -> Self {
        self.config.resolution_hint = hint;
        self
    }

    /// Enable or disable the timestamp overlay (enabled by default)
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.config.overlay.timestamp = enabled;
        self
    }

    /// Set the watermark text drawn bottom-left
    pub fn watermark(mut self, text: impl Into<String>) -> Self {
        self.config.overlay.watermark = Some(text.into());
        self
    }

    /// Append the zero-padded snapshot counter to the bottom-left text
    pub fn with_counter(mut self) -> Self {
        self.config.overlay.counter = true;
        self
    }

    /// Tile a grid watermark with the default 4x6 layout
    pub fn grid(self, text: impl Into<String>) -> Self {
        self.grid_spec(GridSpec::new(text))
    }

    /// Tile a grid watermark with an explicit layout
    pub fn grid_spec(mut self, spec: GridSpec) -> Self {
        self.config.overlay.grid = Some(spec);
        self
    }

    /// Set the snapshot encoding
    pub fn encoding(mut self, encoding: ImageFormat) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Use an explicit capture backend instead of the platform default
    pub fn backend(mut self, backend: Box<dyn CameraBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Start the camera: open the device and begin the live preview loop.
    ///
    /// Device failures are not fatal: the camera comes back inert (no live
    /// stream, capture is a no-op) with a [`Event::CameraError`] emitted, and
    /// [`Camera::start`] or [`Camera::switch_facing`] retries.
    pub async fn start(self) -> Camera {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session = match self.backend {
            Some(backend) => CaptureSession::with_backend(backend, self.config.resolution_hint),
            None => CaptureSession::new(self.config.resolution_hint),
        };
        let shared = Arc::new(Shared {
            global: self.global,
            config: RwLock::new(self.config),
            session: Mutex::new(session),
            surface: Mutex::new(Surface::new(0, 0)),
            counter: FrameCounter::new(),
            renderer: OverlayRenderer::new(),
            event_tx,
        });

        let mut camera = Camera {
            shared,
            preview: None,
            event_rx: Some(event_rx),
            last_capture: None,
        };
        if let Err(e) = camera.start().await {
            warn!("Camera start failed; capture disabled until retried: {}", e);
        }
        camera
    }
}

/// A running camera session: live overlay preview plus on-demand snapshots.
///
/// Stopping (or dropping) the camera cancels the preview loop and releases
/// the capture stream.
pub struct Camera {
    shared: Arc<Shared>,
    preview: Option<PreviewLoop>,
    event_rx: Option<mpsc::UnboundedReceiver<Event>>,
    last_capture: Option<CapturedImage>,
}

impl Camera {
    /// Open the capture stream with the configured facing mode and ensure
    /// the preview loop is running. Also the explicit retry after a failed
    /// start.
    pub async fn start(&mut self) -> Result<(), CamStampError> {
        let facing = self.shared.config.read().facing;
        let result = self.open_stream(facing);
        if self.preview.is_none() {
            self.preview = Some(PreviewLoop::start(self.shared.clone()));
        }
        result
    }

    /// Stop the preview loop and release the capture stream. Idempotent.
    pub async fn stop(&mut self) {
        if let Some(mut preview) = self.preview.take() {
            preview.stop();
        }
        self.shared.session.lock().close();
        let _ = self.shared.event_tx.send(Event::CameraStopped);
    }

    /// Close the current stream and open the opposite facing mode,
    /// preserving the resolution hint. Returns the facing mode now
    /// configured.
    pub async fn switch_facing(&mut self) -> Result<FacingMode, CamStampError> {
        let next = {
            let mut config = self.shared.config.write();
            config.facing = config.facing.toggled();
            config.facing
        };
        self.open_stream(next).map(|_| next)
    }

    /// Capture a full-resolution snapshot with the overlay burned in.
    ///
    /// Returns `Ok(None)` when no stream or frame is available; capture is
    /// a no-op until the camera is started successfully.
    pub async fn capture(&mut self) -> Result<Option<CapturedImage>, CamStampError> {
        let image = snapshot::capture_snapshot(&self.shared)?;
        if let Some(image) = &image {
            self.last_capture = Some(image.clone());
        }
        Ok(image)
    }

    /// Take the event stream. Events are buffered from startup; the stream
    /// can only be taken once, later calls get an already-ended stream.
    pub fn events(&mut self) -> EventStream {
        match self.event_rx.take() {
            Some(receiver) => EventStream::new(receiver),
            None => {
                let (_tx, receiver) = mpsc::unbounded_channel();
                EventStream::new(receiver)
            }
        }
    }

    /// Current snapshot counter value
    pub fn counter(&self) -> u64 {
        self.shared.counter.current()
    }

    /// Configured facing mode
    pub fn facing(&self) -> FacingMode {
        self.shared.config.read().facing
    }

    /// Whether a capture stream is currently live
    pub fn is_live(&self) -> bool {
        self.shared.session.lock().is_live()
    }

    /// Native resolution of the live stream, if any
    pub fn native_resolution(&self) -> Option<Resolution> {
        self.shared.session.lock().native_resolution()
    }

    /// Dimensions of the live overlay surface
    pub fn overlay_size(&self) -> (u32, u32) {
        let surface = self.shared.surface.lock();
        (surface.width(), surface.height())
    }

    /// A copy of the live overlay surface pixels (RGBA, row-major), for the
    /// UI to composite over its video view
    pub fn overlay_pixels(&self) -> Vec<u8> {
        self.shared.surface.lock().as_raw().to_vec()
    }

    /// The most recent captured image, kept until replaced or torn down
    pub fn last_capture(&self) -> Option<&CapturedImage> {
        self.last_capture.as_ref()
    }

    /// Replace the overlay plan used by subsequent renders
    pub fn set_overlay(&self, overlay: OverlayPlan) {
        self.shared.config.write().overlay = overlay;
    }

    fn open_stream(&self, facing: FacingMode) -> Result<(), CamStampError> {
        let mut session = self.shared.session.lock();
        let was_live = session.is_live();
        match session.open(facing) {
            Ok(_) => {
                let event = if was_live {
                    Event::FacingSwitched { facing }
                } else {
                    Event::CameraStarted {
                        facing,
                        resolution: session.native_resolution(),
                    }
                };
                let _ = self.shared.event_tx.send(event);
                Ok(())
            }
            Err(e) => {
                // Log and stay inert; the caller retries explicitly.
                warn!("Camera error: {}", e);
                let _ = self.shared.event_tx.send(Event::CameraError {
                    error: e.to_string(),
                    recoverable: e.is_recoverable(),
                });
                Err(e.into())
            }
        }
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        if let Some(mut preview) = self.preview.take() {
            preview.stop();
        }
        self.shared.session.lock().close();
        debug!("Camera torn down");
    }
}
