//! The fixed-layout overlay renderer shared by live preview and snapshot

use crate::directive::OverlayDirective;
use crate::font::{self, TextAlign};
use crate::surface::Surface;

/// Paints overlay directives onto a surface with fixed layout rules.
///
/// Rendering is a pure function of the surface dimensions and the directive
/// list: the same inputs always produce the same pixels. Layout rules:
///
/// - Timestamp: right-aligned at `(width - 20, height - 20)`, baseline
///   bottom, font size `0.035 x width`, white fill, dark drop shadow.
/// - Watermark / counter: left-aligned at `(20, height - 20)`, same metrics.
/// - Grid: text centered in each cell of a `cols x rows` tiling,
///   low-opacity white, font scaled from the cell height.
///
/// Directives draw in layer order (grid, then timestamp, then
/// watermark/counter) regardless of their order in the input slice.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    font_scale: f32,
}

impl OverlayRenderer {
    /// Distance of the text anchors from the surface edges, in pixels
    pub const EDGE_MARGIN: i64 = 20;
    /// Anchored text font size as a fraction of surface width
    pub const DEFAULT_FONT_SCALE: f32 = 0.035;
    /// Grid cell font size as a fraction of cell height
    const GRID_FONT_SCALE: f32 = 0.2;
    /// Anchored text fill
    const TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
    /// Low-opacity grid fill
    const GRID_COLOR: [u8; 4] = [255, 255, 255, 40];

    /// Renderer with the default font scale
    pub fn new() -> Self {
        Self::with_font_scale(Self::DEFAULT_FONT_SCALE)
    }

    /// Renderer with a custom anchored-text font scale
    pub fn with_font_scale(font_scale: f32) -> Self {
        Self { font_scale }
    }

    /// Paint `directives` onto `surface`.
    ///
    /// The caller is responsible for the surface state: the live loop clears
    /// it first, the snapshot pipeline hands over a surface already holding
    /// the copied video frame.
    pub fn render(&self, surface: &mut Surface, directives: &[OverlayDirective]) {
        if surface.width() == 0 || surface.height() == 0 {
            return;
        }
        let mut ordered: Vec<&OverlayDirective> = directives.iter().collect();
        ordered.sort_by_key(|directive| directive.layer());
        for directive in ordered {
            match directive {
                OverlayDirective::Grid { text, cols, rows } => {
                    self.draw_grid(surface, text, *cols, *rows);
                }
                OverlayDirective::Timestamp { text } => {
                    self.draw_anchored(surface, text, TextAlign::Right);
                }
                OverlayDirective::Watermark { text } | OverlayDirective::Counter { text } => {
                    self.draw_anchored(surface, text, TextAlign::Left);
                }
            }
        }
    }

    fn draw_anchored(&self, surface: &mut Surface, text: &str, align: TextAlign) {
        let width = surface.width() as i64;
        let height = surface.height() as i64;
        let scale = font::scale_for_px(self.font_scale * width as f32);
        let anchor_x = match align {
            TextAlign::Right => width - Self::EDGE_MARGIN,
            _ => Self::EDGE_MARGIN,
        };
        font::draw_text_with_shadow(
            surface,
            text,
            anchor_x,
            height - Self::EDGE_MARGIN,
            align,
            Self::TEXT_COLOR,
            scale,
        );
    }

    fn draw_grid(&self, surface: &mut Surface, text: &str, cols: u32, rows: u32) {
        if cols == 0 || rows == 0 {
            return;
        }
        let cell_w = surface.width() as f32 / cols as f32;
        let cell_h = surface.height() as f32 / rows as f32;
        let scale = font::scale_for_px(Self::GRID_FONT_SCALE * cell_h);
        for row in 0..rows {
            for col in 0..cols {
                let center_x = ((col as f32 + 0.5) * cell_w) as i64;
                let center_y = ((row as f32 + 0.5) * cell_h) as i64;
                let baseline = center_y + (font::GLYPH_HEIGHT * scale) as i64 / 2;
                font::draw_text(
                    surface,
                    text,
                    center_x,
                    baseline,
                    TextAlign::Center,
                    Self::GRID_COLOR,
                    scale,
                );
            }
        }
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}
