//! Snapshot pipeline
//!
//! Copies the current frame into a freshly sized full-resolution surface,
//! burns in the same overlay the preview shows, encodes it, then advances
//! the counter and schedules the flash acknowledgment.

use crate::camera::Shared;
use crate::event::Event;
use crate::CamStampError;
use camstamp_overlay::{encode_surface, CapturedImage, Surface};
use chrono::Local;
use tracing::{debug, info};

/// Run one capture. Returns `Ok(None)` when no stream or frame is available.
pub(crate) fn capture_snapshot(shared: &Shared) -> Result<Option<CapturedImage>, CamStampError> {
    let frame = {
        let mut session = shared.session.lock();
        if !session.is_live() {
            debug!("Capture skipped: no live stream");
            return Ok(None);
        }
        match session.latest_frame()? {
            Some(frame) => frame,
            None => {
                debug!("Capture skipped: no frame available");
                return Ok(None);
            }
        }
    };

    // The counter value before increment is what gets burned in.
    let sequence = shared.counter.current();
    let (overlay, encoding) = {
        let config = shared.config.read();
        (config.overlay.clone(), config.encoding)
    };
    let directives = overlay.resolve(Local::now(), sequence);

    // Full native resolution, not the display size.
    let mut surface = Surface::new(0, 0);
    surface.copy_frame(&frame)?;
    shared.renderer.render(&mut surface, &directives);
    let data = encode_surface(&surface, encoding)?;

    let image = CapturedImage {
        width: surface.width(),
        height: surface.height(),
        data,
        format: encoding,
        sequence,
    };
    shared.counter.advance();
    info!(
        sequence,
        width = image.width,
        height = image.height,
        "Snapshot captured"
    );

    let _ = shared.event_tx.send(Event::CaptureCompleted {
        sequence,
        width: image.width,
        height: image.height,
    });
    // Flash acknowledgment; rapid captures just produce overlapping timers.
    let event_tx = shared.event_tx.clone();
    let flash = shared.global.flash_duration;
    tokio::spawn(async move {
        tokio::time::sleep(flash).await;
        let _ = event_tx.send(Event::FlashEnded { sequence });
    });

    Ok(Some(image))
}
