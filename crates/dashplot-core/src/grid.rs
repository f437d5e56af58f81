// File: crates/dashplot-core/src/grid.rs
// Summary: Grid line and y-axis tick helpers.

use crate::viewport::Viewport;

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Evenly spaced y-axis ticks from `y_min` to `y_max` as (value, plot-space y) pairs.
pub fn value_ticks(viewport: &Viewport, count: usize) -> Vec<(f64, f64)> {
    linspace(viewport.y_min(), viewport.y_max(), count)
        .into_iter()
        .map(|v| (v, viewport.y_for(v)))
        .collect()
}
