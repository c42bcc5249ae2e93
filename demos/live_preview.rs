//! Live preview demo
//!
//! Starts the camera, lets the preview loop run for a couple of seconds and
//! reports the overlay surface state. On a machine without a camera the
//! session stays inert and the demo just says so.

use camstamp::{CamStamp, FacingMode};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let camstamp = CamStamp::init()?;
    let mut camera = camstamp
        .camera()
        .facing(FacingMode::Back)
        .watermark("JOJO")
        .with_counter()
        .start()
        .await;

    println!("📷 Camera live: {}", camera.is_live());
    let mut events = camera.events();
    while let Ok(Some(event)) = events.try_next() {
        println!("   event: {}", event.event_type());
    }

    tokio::time::sleep(Duration::from_secs(2)).await;
    let (width, height) = camera.overlay_size();
    println!("   overlay surface: {}x{}", width, height);
    if let Some(resolution) = camera.native_resolution() {
        println!("   native resolution: {}x{}", resolution.width, resolution.height);
    }

    camera.stop().await;
    Ok(())
}
