//! Event system for camera and capture events

use camstamp_capture::{FacingMode, Resolution};
use tokio::sync::mpsc;

/// Camera events that can occur during a session.
///
/// Transient UI state such as the capture flash is modeled as events: the
/// core emits [`Event::CaptureCompleted`] immediately and
/// [`Event::FlashEnded`] once the flash duration elapses, and the UI layer
/// reacts however it likes.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A camera stream was opened
    CameraStarted {
        /// Facing mode of the opened stream
        facing: FacingMode,
        /// Native resolution, when the backend already knows it
        resolution: Option<Resolution>,
    },
    /// The camera stream was stopped
    CameraStopped,
    /// The stream was switched to the other facing mode
    FacingSwitched {
        /// Facing mode now live
        facing: FacingMode,
    },
    /// A snapshot was captured and encoded
    CaptureCompleted {
        /// Counter value the snapshot was taken with
        sequence: u64,
        /// Captured image width
        width: u32,
        /// Captured image height
        height: u32,
    },
    /// The flash acknowledgment for a snapshot ended
    FlashEnded {
        /// Counter value of the snapshot the flash belonged to
        sequence: u64,
    },
    /// A camera operation failed; the camera stays inert until retried
    CameraError {
        /// Error that occurred
        error: String,
        /// Whether retrying the operation may succeed
        recoverable: bool,
    },
}

impl Event {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::CameraStarted { .. } => "camera_started",
            Event::CameraStopped => "camera_stopped",
            Event::FacingSwitched { .. } => "facing_switched",
            Event::CaptureCompleted { .. } => "capture_completed",
            Event::FlashEnded { .. } => "flash_ended",
            Event::CameraError { .. } => "camera_error",
        }
    }

    /// Check if this is an error event
    pub fn is_error_event(&self) -> bool {
        matches!(self, Event::CameraError { .. })
    }
}

/// Stream of camera events for async iteration
#[derive(Debug)]
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventStream {
    /// Create a new event stream over a receiver
    pub fn new(receiver: mpsc::UnboundedReceiver<Event>) -> Self {
        Self { receiver }
    }

    /// Get the next event from the stream
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Try to get the next event without blocking
    pub fn try_next(&mut self) -> Result<Option<Event>, mpsc::error::TryRecvError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(mpsc::error::TryRecvError::Disconnected)
            }
        }
    }

    /// Close the event stream
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
