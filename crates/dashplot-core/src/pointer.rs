// File: crates/dashplot-core/src/pointer.rs
// Summary: Pointer-to-value mapping: screen pointer -> sample index/fraction -> interpolated value.
// Notes:
// - There is no error path. Pointers outside the chart are clamped to the nearest edge.
// - Only an empty series has no answer (`None`).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{clamp, Point, Rect};
use crate::series::Categories;
use crate::viewport::Viewport;

/// Where a pointer falls on a line series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleHit {
    /// Left sample of the hovered segment, in `[0, n-2]` (0 for a single sample).
    pub index: usize,
    /// Interpolation weight between `index` and `index + 1`, in `[0, 1]`.
    pub fraction: f64,
    pub interpolated_value: f64,
    /// Pointer x in viewport units, clamped to `[0, width]`.
    pub plot_x: f64,
    /// Raw pointer coordinates, for anchoring the tooltip overlay.
    pub screen_x: f64,
    pub screen_y: f64,
}

impl SampleHit {
    /// Fractional position along the series, e.g. 2.5 halfway between samples 2 and 3.
    pub fn position(&self) -> f64 {
        self.index as f64 + self.fraction
    }

    /// Value of a parallel series (same categories) at the same position.
    pub fn value_of(&self, values: &[f64]) -> Option<f64> {
        interpolate_at(values, self.index, self.fraction)
    }

    /// Index of the category whose label the tooltip shows: left below t = 0.5, right otherwise.
    pub fn label_index(&self, n: usize) -> usize {
        let i = if self.fraction < 0.5 { self.index } else { self.index + 1 };
        i.min(n.saturating_sub(1))
    }

    pub fn label<'a>(&self, categories: &'a Categories) -> Option<&'a str> {
        categories.get(self.label_index(categories.len()))
    }

    /// Marker position on the interpolated curve, in plot space.
    pub fn plot_point(&self, viewport: &Viewport) -> Point {
        Point::new(self.plot_x, viewport.y_for(self.interpolated_value))
    }
}

/// Linear interpolation between `values[index]` and `values[index + 1]`.
/// The right neighbor falls back to `values[index]` at the end of the series.
pub fn interpolate_at(values: &[f64], index: usize, t: f64) -> Option<f64> {
    let a = *values.get(index)?;
    let b = values.get(index + 1).copied().unwrap_or(a);
    Some(a + (b - a) * t)
}

/// Map a pointer over `bbox` onto `values` drawn into `viewport`.
///
/// `x = (pointer_x - bbox.left) / bbox.width * viewport.width`, then with
/// `pos = x / width * (n-1)` the segment index is `floor(pos)` clamped to
/// `[0, n-2]` and `t = pos - index`.
pub fn map_pointer_to_sample(
    pointer_x: f64,
    pointer_y: f64,
    bbox: &Rect,
    values: &[f64],
    viewport: &Viewport,
) -> Option<SampleHit> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let vw = viewport.width();
    let raw = if bbox.width > 0.0 { (pointer_x - bbox.left) / bbox.width * vw } else { 0.0 };
    let x = if raw.is_finite() { clamp(raw, 0.0, vw) } else { 0.0 };

    let (index, fraction) = if n == 1 {
        (0, 0.0)
    } else {
        // index and fraction both come from one position so a midpoint stays exactly 0.5
        let pos = x / vw * (n - 1) as f64;
        let index = clamp(pos.floor(), 0.0, (n - 2) as f64) as usize;
        let t = clamp(pos - index as f64, 0.0, 1.0);
        (index, t)
    };
    let interpolated_value = interpolate_at(values, index, fraction)?;
    trace!(index, fraction, interpolated_value, "pointer mapped to sample");
    Some(SampleHit { index, fraction, interpolated_value, plot_x: x, screen_x: pointer_x, screen_y: pointer_y })
}

/// Category band under the pointer for a chart of `n` equal-width bands (bar charts).
pub fn band_index_at(pointer_x: f64, bbox: &Rect, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let frac = if bbox.width > 0.0 { (pointer_x - bbox.left) / bbox.width } else { 0.0 };
    let frac = if frac.is_finite() { clamp(frac, 0.0, 1.0) } else { 0.0 };
    Some(((frac * n as f64).floor() as usize).min(n - 1))
}

/// Change from `previous` to `current`, or "not applicable" when there is no base to compare to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PercentDelta {
    /// Percent change rounded to one decimal.
    Percent(f64),
    NotApplicable,
}

impl PercentDelta {
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentDelta::Percent(v) => Some(*v),
            PercentDelta::NotApplicable => None,
        }
    }

    pub fn is_increase(&self) -> bool {
        matches!(self, PercentDelta::Percent(v) if *v > 0.0)
    }
}

impl fmt::Display for PercentDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentDelta::Percent(v) => write!(f, "{v:+.1}%"),
            PercentDelta::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// `((current - previous) / previous) * 100`, rounded to one decimal.
pub fn percentage_delta(current: f64, previous: f64) -> PercentDelta {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return PercentDelta::NotApplicable;
    }
    let pct = (current - previous) / previous * 100.0;
    let rounded = (pct * 10.0).round() / 10.0;
    PercentDelta::Percent(if rounded == 0.0 { 0.0 } else { rounded })
}
