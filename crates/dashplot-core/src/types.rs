// File: crates/dashplot-core/src/types.rs
// Summary: Shared types and constants (sizes, offsets, paddings).

use serde::{Deserialize, Serialize};

/// Default logical chart width.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Default logical chart height.
pub const DEFAULT_HEIGHT: f64 = 300.0;
/// Pixels between the pointer and the tooltip corner, both axes.
pub const DEFAULT_TOOLTIP_OFFSET: f64 = 10.0;
/// Stroke width of the invisible donut hit regions.
pub const DEFAULT_HIT_STROKE_WIDTH: f64 = 12.0;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(48, 16, 16, 32)
    }
}
