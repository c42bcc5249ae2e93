//! Integration tests for the camera session API
//!
//! All tests run against the mock backend through the public builder, so
//! they exercise the same paths a UI layer would.

use camstamp::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::assert_ok;

fn mock_parts() -> (CamStamp, Box<MockCameraBackend>, Arc<MockControl>) {
    let camstamp = CamStamp::init().unwrap();
    let control = Arc::new(MockControl::default());
    let backend = Box::new(MockCameraBackend::with_control(control.clone()));
    (camstamp, backend, control)
}

#[tokio::test]
async fn test_end_to_end_capture_sequence() {
    let (camstamp, backend, control) = mock_parts();
    let mut camera = camstamp
        .camera()
        .facing(FacingMode::Back)
        .watermark("JOJO")
        .with_counter()
        .encoding(ImageFormat::Png)
        .backend(backend)
        .start()
        .await;
    let mut events = camera.events();

    assert!(camera.is_live());
    assert_eq!(camera.facing(), FacingMode::Back);
    assert_eq!(camera.counter(), 1);
    assert_eq!(control.live_streams(), 1);

    let first = camera.capture().await.unwrap().expect("stream is live");
    assert_eq!(first.sequence, 1);
    assert_eq!((first.width, first.height), (640, 480));
    assert_eq!(camera.counter(), 2);

    // The bottom-left "JOJO0001" overlay is burned into the encoded image.
    let decoded = image::load_from_memory(&first.data).unwrap().to_rgba8();
    let mut white = 0;
    for y in 420..480 {
        for x in 0..200 {
            if decoded.get_pixel(x, y).0 == [255, 255, 255, 255] {
                white += 1;
            }
        }
    }
    assert!(white > 0, "expected burned-in counter text");

    let second = camera.capture().await.unwrap().unwrap();
    assert_eq!(second.sequence, 2);
    assert_eq!(camera.counter(), 3);
    assert_eq!(camera.last_capture().unwrap().sequence, 2);

    let started = events.try_next().unwrap().unwrap();
    assert_eq!(started.event_type(), "camera_started");
    assert_eq!(
        events.try_next().unwrap().unwrap(),
        Event::CaptureCompleted {
            sequence: 1,
            width: 640,
            height: 480,
        }
    );
    assert_eq!(
        events.try_next().unwrap().unwrap(),
        Event::CaptureCompleted {
            sequence: 2,
            width: 640,
            height: 480,
        }
    );
}

#[tokio::test]
async fn test_permission_denied_leaves_camera_inert() {
    let (camstamp, backend, control) = mock_parts();
    control.set_denying(true);

    let mut camera = camstamp.camera().backend(backend).start().await;
    let mut events = camera.events();

    assert!(!camera.is_live());
    assert!(camera.capture().await.unwrap().is_none());
    assert_eq!(camera.counter(), 1);

    let event = events.try_next().unwrap().unwrap();
    assert!(event.is_error_event());
    match event {
        Event::CameraError { recoverable, .. } => assert!(!recoverable),
        other => panic!("expected CameraError, got {:?}", other),
    }

    // Explicit retry once access is granted.
    control.set_denying(false);
    assert_ok!(camera.start().await);
    assert!(camera.is_live());
    assert!(camera.capture().await.unwrap().is_some());
}

#[tokio::test]
async fn test_switch_facing_leaks_no_streams() {
    let (camstamp, backend, control) = mock_parts();
    let mut camera = camstamp
        .camera()
        .facing(FacingMode::Back)
        .backend(backend)
        .start()
        .await;

    for _ in 0..5 {
        let facing = camera.switch_facing().await.unwrap();
        assert_eq!(camera.facing(), facing);
        assert_eq!(control.live_streams(), 1);
    }
    assert_eq!(camera.facing(), FacingMode::Front);
    assert_eq!(control.opens(), 6);

    camera.stop().await;
    assert_eq!(control.live_streams(), 0);
}

#[tokio::test]
async fn test_preview_loop_tracks_native_resolution() {
    let (camstamp, backend, control) = mock_parts();
    let mut camera = camstamp.camera().backend(backend).start().await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(camera.overlay_size(), (640, 480));
    let pixels = camera.overlay_pixels();
    assert_eq!(pixels.len(), 640 * 480 * 4);
    // The default timestamp overlay leaves ink on the surface.
    assert!(pixels.iter().skip(3).step_by(4).any(|&alpha| alpha > 0));

    // The stream renegotiates; the overlay surface follows on the next tick.
    control.set_native_resolution(Resolution::HD);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(camera.overlay_size(), (1280, 720));

    // After stop, the cancelled loop no longer follows.
    camera.stop().await;
    control.set_native_resolution(Resolution::VGA);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(camera.overlay_size(), (1280, 720));
}

#[tokio::test]
async fn test_flash_events_follow_captures() {
    let camstamp = CamStamp::init_with(GlobalConfig {
        flash_duration: Duration::from_millis(40),
        ..Default::default()
    })
    .unwrap();
    let mut camera = camstamp
        .camera()
        .backend(Box::new(MockCameraBackend::new()))
        .start()
        .await;
    let mut events = camera.events();

    // Two rapid captures produce overlapping flash timers, not a failure.
    camera.capture().await.unwrap().unwrap();
    camera.capture().await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;

    let mut completed = Vec::new();
    let mut flashes = Vec::new();
    while let Ok(Some(event)) = events.try_next() {
        match event {
            Event::CaptureCompleted { sequence, .. } => completed.push(sequence),
            Event::FlashEnded { sequence } => flashes.push(sequence),
            _ => {}
        }
    }
    assert_eq!(completed, vec![1, 2]);
    flashes.sort_unstable();
    assert_eq!(flashes, vec![1, 2]);
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let (camstamp, backend, control) = mock_parts();
    let mut camera = camstamp.camera().backend(backend).start().await;

    camera.stop().await;
    camera.stop().await;
    assert_eq!(control.live_streams(), 0);
    assert!(!camera.is_live());
    assert!(camera.capture().await.unwrap().is_none());
}

#[tokio::test]
async fn test_drop_releases_stream() {
    let (camstamp, backend, control) = mock_parts();
    let camera = camstamp.camera().backend(backend).start().await;
    assert_eq!(control.live_streams(), 1);
    drop(camera);
    assert_eq!(control.live_streams(), 0);
}

#[test]
fn test_camera_config_serializes_for_ui() {
    let config = CameraConfig::default();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["facing"], "back");
    assert_eq!(json["resolution_hint"]["width"], 4096);
    assert_eq!(json["encoding"]["kind"], "png");

    let roundtrip: CameraConfig = serde_json::from_value(json).unwrap();
    assert_eq!(roundtrip.facing, FacingMode::Back);
    assert_eq!(roundtrip.resolution_hint, Resolution::UHD_4K);
}
