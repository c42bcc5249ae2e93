//! Snapshot demo
//!
//! Captures two watermarked photos from the mock backend and prints them as
//! data URLs, demonstrating the counter advancing between captures.

use camstamp::{CamStamp, FacingMode, GridSpec, ImageFormat, MockCameraBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let camstamp = CamStamp::init()?;
    let mut camera = camstamp
        .camera()
        .facing(FacingMode::Back)
        .watermark("JOJO")
        .with_counter()
        .grid_spec(GridSpec::new("JOJO"))
        .encoding(ImageFormat::JPEG_HIGH_QUALITY)
        .backend(Box::new(MockCameraBackend::new()))
        .start()
        .await;

    for _ in 0..2 {
        if let Some(photo) = camera.capture().await? {
            let url = photo.to_data_url();
            println!(
                "captured #{} {}x{} as {} -> {}...",
                photo.sequence,
                photo.width,
                photo.height,
                photo.mime_type(),
                &url[..url.len().min(64)]
            );
        }
    }

    camera.stop().await;
    Ok(())
}
