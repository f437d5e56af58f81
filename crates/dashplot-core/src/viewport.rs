// File: crates/dashplot-core/src/viewport.rs
// Summary: Logical chart viewport: size plus value domain, with index/value to plot-space transforms.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ChartError, ChartResult};

/// Logical coordinate rectangle a chart is drawn into, plus its value domain.
/// Contract: width/height > 0 and y_max > y_min (enforced by `new`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
    y_min: f64,
    y_max: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, y_min: f64, y_max: f64) -> ChartResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            warn!(width, height, "rejecting viewport with non-positive size");
            return Err(ChartError::InvalidViewport { width, height });
        }
        if !(y_min.is_finite() && y_max.is_finite()) || y_max <= y_min {
            warn!(y_min, y_max, "rejecting viewport with empty value domain");
            return Err(ChartError::EmptyDomain { y_min, y_max });
        }
        Ok(Self { width, height, y_min, y_max })
    }

    /// Viewport whose domain covers `values`, padded by `pad_ratio` of the span on both ends.
    /// A flat series gets a unit span so the domain is never empty.
    pub fn fit(width: f64, height: f64, values: &[f64], pad_ratio: f64) -> ChartResult<Self> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in values {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return Err(ChartError::InvalidData("cannot fit viewport to empty or non-finite values".into()));
        }
        if (hi - lo).abs() < 1e-9 { hi = lo + 1.0; }
        let pad = (hi - lo) * pad_ratio.max(0.0);
        Self::new(width, height, lo - pad, hi + pad)
    }

    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }
    pub fn y_min(&self) -> f64 { self.y_min }
    pub fn y_max(&self) -> f64 { self.y_max }

    /// Horizontal distance between consecutive samples of an `n`-element series.
    /// Zero when there is no second sample to step to.
    #[inline]
    pub fn step(&self, n: usize) -> f64 {
        if n < 2 { 0.0 } else { self.width / (n - 1) as f64 }
    }

    #[inline]
    pub fn x_at(&self, index: usize, n: usize) -> f64 {
        self.step(n) * index as f64
    }

    /// Map a value to plot-space y; higher values land closer to the top.
    #[inline]
    pub fn y_for(&self, value: f64) -> f64 {
        self.height - (value - self.y_min) / (self.y_max - self.y_min) * self.height
    }

    /// Inverse of `y_for`.
    #[inline]
    pub fn value_at(&self, y: f64) -> f64 {
        self.y_min + (self.height - y) / self.height * (self.y_max - self.y_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_flat_domain() {
        let err = Viewport::new(100.0, 50.0, 10.0, 10.0).unwrap_err();
        assert_eq!(err, ChartError::EmptyDomain { y_min: 10.0, y_max: 10.0 });
    }

    #[test]
    fn rejects_zero_size() {
        assert!(matches!(
            Viewport::new(0.0, 50.0, 0.0, 1.0),
            Err(ChartError::InvalidViewport { .. })
        ));
        assert!(Viewport::new(10.0, -1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn value_mapping_is_inverted() {
        let vp = Viewport::new(100.0, 200.0, 0.0, 100.0).unwrap();
        assert_relative_eq!(vp.y_for(0.0), 200.0);
        assert_relative_eq!(vp.y_for(100.0), 0.0);
        assert_relative_eq!(vp.y_for(25.0), 150.0);
        assert_relative_eq!(vp.value_at(vp.y_for(42.5)), 42.5, epsilon = 1e-9);
    }

    #[test]
    fn fit_pads_and_handles_flat_series() {
        let vp = Viewport::fit(100.0, 100.0, &[10.0, 20.0], 0.1).unwrap();
        assert_relative_eq!(vp.y_min(), 9.0);
        assert_relative_eq!(vp.y_max(), 21.0);

        let flat = Viewport::fit(100.0, 100.0, &[5.0, 5.0], 0.0).unwrap();
        assert_relative_eq!(flat.y_max() - flat.y_min(), 1.0);

        assert!(Viewport::fit(100.0, 100.0, &[], 0.0).is_err());
    }
}
