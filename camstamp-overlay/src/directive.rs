//! Overlay directives, the overlay plan, and the snapshot counter

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed timestamp text format. A locale lookup would make rendering
/// nondeterministic across hosts.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A single decorative element to composite onto a frame.
///
/// Directives are immutable and carry final text only; anything derived from
/// wall-clock time or counter state is resolved by the caller immediately
/// before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayDirective {
    /// Current date-time, anchored bottom-right
    Timestamp {
        /// Pre-formatted timestamp text
        text: String,
    },
    /// Static watermark text, anchored bottom-left
    Watermark {
        /// Watermark text
        text: String,
    },
    /// Snapshot counter text (optionally prefixed), anchored bottom-left
    Counter {
        /// Pre-formatted counter text
        text: String,
    },
    /// Repeating text tiled across a cols x rows grid
    Grid {
        /// Text repeated in every cell
        text: String,
        /// Number of columns
        cols: u32,
        /// Number of rows
        rows: u32,
    },
}

impl OverlayDirective {
    /// Draw layer rank: grid is the background layer, timestamp draws above
    /// it, watermark/counter text is the foreground layer
    pub fn layer(&self) -> u8 {
        match self {
            OverlayDirective::Grid { .. } => 0,
            OverlayDirective::Timestamp { .. } => 1,
            OverlayDirective::Watermark { .. } | OverlayDirective::Counter { .. } => 2,
        }
    }

    /// Get the directive kind as a string
    pub fn kind(&self) -> &'static str {
        match self {
            OverlayDirective::Timestamp { .. } => "timestamp",
            OverlayDirective::Watermark { .. } => "watermark",
            OverlayDirective::Counter { .. } => "counter",
            OverlayDirective::Grid { .. } => "grid",
        }
    }
}

/// Grid watermark parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Text repeated in every cell
    pub text: String,
    /// Number of columns
    pub cols: u32,
    /// Number of rows
    pub rows: u32,
}

impl GridSpec {
    /// Grid with the default 4x6 tiling
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cols: 4,
            rows: 6,
        }
    }
}

/// Which decorations are composited onto frames.
///
/// A plan is static configuration; [`OverlayPlan::resolve`] turns it into
/// concrete directives for one render, given the current instant and counter
/// value. Live preview and snapshot capture resolve the same plan, which is
/// what keeps the two renders visually identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayPlan {
    /// Draw the current date-time bottom-right
    pub timestamp: bool,
    /// Watermark text drawn bottom-left
    pub watermark: Option<String>,
    /// Append the zero-padded snapshot counter to the bottom-left text
    pub counter: bool,
    /// Tiled grid watermark
    pub grid: Option<GridSpec>,
}

impl Default for OverlayPlan {
    fn default() -> Self {
        Self {
            timestamp: true,
            watermark: None,
            counter: false,
            grid: None,
        }
    }
}

impl OverlayPlan {
    /// Resolve the plan into directives for one render.
    ///
    /// The watermark and counter share the bottom-left anchor, so when both
    /// are enabled they resolve into a single `Counter` directive, e.g.
    /// watermark `"JOJO"` at counter 1 becomes `"JOJO0001"`.
    pub fn resolve(&self, now: DateTime<Local>, counter: u64) -> Vec<OverlayDirective> {
        let mut directives = Vec::new();
        if let Some(grid) = &self.grid {
            directives.push(OverlayDirective::Grid {
                text: grid.text.clone(),
                cols: grid.cols,
                rows: grid.rows,
            });
        }
        if self.timestamp {
            directives.push(OverlayDirective::Timestamp {
                text: now.format(TIMESTAMP_FORMAT).to_string(),
            });
        }
        match (&self.watermark, self.counter) {
            (Some(watermark), true) => directives.push(OverlayDirective::Counter {
                text: format!("{}{}", watermark, format_counter(counter)),
            }),
            (Some(watermark), false) => directives.push(OverlayDirective::Watermark {
                text: watermark.clone(),
            }),
            (None, true) => directives.push(OverlayDirective::Counter {
                text: format_counter(counter),
            }),
            (None, false) => {}
        }
        directives
    }
}

/// Monotonically increasing snapshot counter.
///
/// Starts at 1 and advances by exactly 1 after each successful snapshot.
/// Not persisted; a new session starts over at 1.
#[derive(Debug)]
pub struct FrameCounter(AtomicU64);

impl FrameCounter {
    /// New counter at 1
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    /// Current value
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Increment by 1, returning the value that was current
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    /// Current value as zero-padded display text
    pub fn formatted(&self) -> String {
        format_counter(self.current())
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-padded 4-digit counter text; wider values grow rather than wrap
pub fn format_counter(value: u64) -> String {
    format!("{:04}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_counter_formatting() {
        assert_eq!(format_counter(1), "0001");
        assert_eq!(format_counter(42), "0042");
        assert_eq!(format_counter(9999), "9999");
        assert_eq!(format_counter(10000), "10000");
    }

    #[test]
    fn test_counter_advances_by_one() {
        let counter = FrameCounter::new();
        assert_eq!(counter.current(), 1);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.advance(), 2);
        assert_eq!(counter.current(), 3);
        assert_eq!(counter.formatted(), "0003");
    }

    #[test]
    fn test_plan_combines_watermark_and_counter() {
        let plan = OverlayPlan {
            timestamp: true,
            watermark: Some("JOJO".to_string()),
            counter: true,
            grid: Some(GridSpec::new("DRAFT")),
        };
        let now = Local.with_ymd_and_hms(2026, 8, 7, 14, 30, 5).unwrap();
        let directives = plan.resolve(now, 1);

        assert_eq!(directives.len(), 3);
        assert_eq!(directives[0].kind(), "grid");
        assert_eq!(
            directives[1],
            OverlayDirective::Timestamp {
                text: "07/08/2026, 14:30:05".to_string(),
            }
        );
        assert_eq!(
            directives[2],
            OverlayDirective::Counter {
                text: "JOJO0001".to_string(),
            }
        );
        // Background to foreground.
        assert!(directives[0].layer() < directives[1].layer());
        assert!(directives[1].layer() < directives[2].layer());
    }

    #[test]
    fn test_plan_watermark_only() {
        let plan = OverlayPlan {
            timestamp: false,
            watermark: Some("JOJO".to_string()),
            counter: false,
            grid: None,
        };
        let now = Local.with_ymd_and_hms(2026, 8, 7, 0, 0, 0).unwrap();
        assert_eq!(
            plan.resolve(now, 7),
            vec![OverlayDirective::Watermark {
                text: "JOJO".to_string(),
            }]
        );
    }
}
