//! Integration tests for overlay rendering and encoding

use camstamp_capture::{PixelFormat, VideoFrame};
use camstamp_overlay::*;

fn ink_bounds(surface: &Surface) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y)[3] > 0 {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((min_x, min_y, max_x, max_y)) => {
                        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                    }
                });
            }
        }
    }
    bounds
}

fn sample_directives() -> Vec<OverlayDirective> {
    vec![
        OverlayDirective::Grid {
            text: "DRAFT".to_string(),
            cols: 4,
            rows: 6,
        },
        OverlayDirective::Timestamp {
            text: "07/08/2026, 14:30:05".to_string(),
        },
        OverlayDirective::Counter {
            text: "JOJO0001".to_string(),
        },
    ]
}

#[test]
fn test_render_is_deterministic() {
    let renderer = OverlayRenderer::new();
    let directives = sample_directives();

    let mut first = Surface::new(320, 240);
    let mut second = Surface::new(320, 240);
    renderer.render(&mut first, &directives);
    renderer.render(&mut second, &directives);

    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn test_cleared_surface_renders_identically() {
    let renderer = OverlayRenderer::new();
    let directives = sample_directives();

    let mut surface = Surface::new(320, 240);
    renderer.render(&mut surface, &directives);
    let baseline = surface.as_raw().to_vec();

    // The live loop reuses the surface: clear, render again.
    surface.clear();
    renderer.render(&mut surface, &directives);
    assert_eq!(surface.as_raw(), baseline.as_slice());
}

#[test]
fn test_anchors_track_surface_resize() {
    let renderer = OverlayRenderer::new();
    let directives = vec![OverlayDirective::Timestamp {
        text: "12:00".to_string(),
    }];

    let mut surface = Surface::new(200, 100);
    renderer.render(&mut surface, &directives);
    let (_, _, max_x, max_y) = ink_bounds(&surface).expect("timestamp should draw");
    assert!(max_x <= 180 + 1);
    assert!(max_y <= 80 + 1);

    // Native video dimensions changed; the next render recomputes anchors
    // against the new surface.
    surface.resize(400, 300);
    surface.clear();
    renderer.render(&mut surface, &directives);
    let (min_x, min_y, max_x, max_y) = ink_bounds(&surface).expect("timestamp should draw");
    assert!(max_x > 300, "anchor did not track the new width: {}", max_x);
    assert!(max_x <= 380 + 2);
    assert!(min_y > 250, "anchor did not track the new height: {}", min_y);
    assert!(max_y <= 280 + 2);
    assert!(min_x >= 200, "text should stay right-aligned: {}", min_x);
}

#[test]
fn test_foreground_text_is_not_occluded_by_grid() {
    let renderer = OverlayRenderer::new();
    let counter_only = vec![OverlayDirective::Counter {
        text: "JOJO0001".to_string(),
    }];
    // Grid listed after the counter on purpose; layering must reorder it
    // behind the text.
    let with_grid = vec![
        OverlayDirective::Counter {
            text: "JOJO0001".to_string(),
        },
        OverlayDirective::Grid {
            text: "JOJO".to_string(),
            cols: 4,
            rows: 6,
        },
    ];

    let mut reference = Surface::new(320, 240);
    renderer.render(&mut reference, &counter_only);
    let mut combined = Surface::new(320, 240);
    renderer.render(&mut combined, &with_grid);

    let mut checked = 0;
    for y in 0..240 {
        for x in 0..320 {
            if reference.pixel(x, y) == [255, 255, 255, 255] {
                assert_eq!(
                    combined.pixel(x, y),
                    [255, 255, 255, 255],
                    "grid occluded counter text at ({}, {})",
                    x,
                    y
                );
                checked += 1;
            }
        }
    }
    assert!(checked > 0, "counter text should produce solid pixels");
}

#[test]
fn test_snapshot_burns_overlay_into_frame() {
    let frame = VideoFrame {
        width: 320,
        height: 180,
        format: PixelFormat::Rgba32,
        data: vec![64; 320 * 180 * 4],
        timestamp_ms: 0,
    };

    let mut surface = Surface::new(0, 0);
    surface.copy_frame(&frame).unwrap();
    assert_eq!((surface.width(), surface.height()), (320, 180));

    let renderer = OverlayRenderer::new();
    renderer.render(
        &mut surface,
        &[OverlayDirective::Counter {
            text: "JOJO0001".to_string(),
        }],
    );

    // Text pixels replace frame pixels in the bottom-left region.
    let mut white = 0;
    for y in 130..180 {
        for x in 0..160 {
            if surface.pixel(x, y) == [255, 255, 255, 255] {
                white += 1;
            }
        }
    }
    assert!(white > 0, "burned-in text should be visible over the frame");

    let bytes = encode_surface(&surface, ImageFormat::Png).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 180));
}

#[test]
fn test_jpeg_encoding() {
    let mut surface = Surface::new(64, 48);
    surface.copy_frame(&VideoFrame {
        width: 64,
        height: 48,
        format: PixelFormat::Rgb24,
        data: vec![128; 64 * 48 * 3],
        timestamp_ms: 0,
    })
    .unwrap();

    let bytes = encode_surface(&surface, ImageFormat::JPEG_HIGH_QUALITY).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 48));
}

#[test]
fn test_data_url_export() {
    let image = CapturedImage {
        data: vec![1, 2, 3],
        format: ImageFormat::Png,
        width: 1,
        height: 1,
        sequence: 1,
    };
    assert_eq!(image.mime_type(), "image/png");
    assert!(image.to_data_url().starts_with("data:image/png;base64,"));

    let jpeg = CapturedImage {
        format: ImageFormat::JPEG_HIGH_QUALITY,
        ..image
    };
    assert!(jpeg.to_data_url().starts_with("data:image/jpeg;base64,"));
}

#[test]
fn test_encoding_empty_surface_fails() {
    let surface = Surface::new(0, 0);
    let err = encode_surface(&surface, ImageFormat::Png).unwrap_err();
    assert!(matches!(err, OverlayError::SurfaceNotReady));
}
