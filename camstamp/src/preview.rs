//! Live preview loop
//!
//! A repeating, refresh-synchronized redraw as a periodic tokio task: each
//! tick resizes the overlay surface to the current native frame dimensions,
//! clears it, and re-renders freshly resolved directives.

use crate::camera::Shared;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Owns the repeating preview render task.
///
/// States are {Idle, Running}: running once spawned, idle after [`stop`],
/// which cancels the scheduled continuation exactly once.
///
/// [`stop`]: PreviewLoop::stop
pub(crate) struct PreviewLoop {
    task: Option<JoinHandle<()>>,
}

impl PreviewLoop {
    /// Spawn the preview task at the configured tick rate
    pub(crate) fn start(shared: Arc<Shared>) -> Self {
        let fps = shared.global.preview_fps.max(1);
        let period = Duration::from_secs_f64(1.0 / fps as f64);
        debug!(fps, "Preview loop running");
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                render_tick(&shared);
            }
        });
        Self { task: Some(task) }
    }

    /// Cancel the repeating task. Idempotent.
    pub(crate) fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Preview loop cancelled");
        }
    }
}

impl Drop for PreviewLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One preview render. Tolerates a missing stream or frame by doing nothing;
/// the loop simply retries on the next tick.
fn render_tick(shared: &Shared) {
    let frame = {
        let mut session = shared.session.lock();
        match session.latest_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                warn!("Preview frame unavailable: {}", e);
                return;
            }
        }
    };
    let directives = shared
        .config
        .read()
        .overlay
        .resolve(Local::now(), shared.counter.current());

    let mut surface = shared.surface.lock();
    surface.resize(frame.width, frame.height);
    surface.clear();
    shared.renderer.render(&mut surface, &directives);
}
