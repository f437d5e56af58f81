// File: crates/dashplot-core/src/curve.rs
// Summary: Curve builder. Samples -> plot-space points -> Catmull-Rom smoothed cubic paths.
//
// Smoothing is the uniform Catmull-Rom approximation: for each pair (p1, p2)
// the Bezier control points are p1 + (p2 - p0)/6 and p2 - (p3 - p1)/6, where
// p0/p3 are the neighbors (duplicated at the ends). It is not arc-length
// parameterized; the curve passes through every sample.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::geometry::{clamp, Point};
use crate::path::PathSegment;
use crate::viewport::Viewport;

/// Map `values` into plot space for a `width` x `height` chart with domain `[y_min, y_max]`.
///
/// Index `i` lands at `i * width/(n-1)`; a single sample sits at x = 0.
/// Fails when the domain is empty, the size is non-positive or a value is NaN/infinite.
pub fn build_points(values: &[f64], width: f64, height: f64, y_max: f64, y_min: f64) -> ChartResult<Vec<Point>> {
    let vp = Viewport::new(width, height, y_min, y_max)?;
    project(values, &vp)
}

/// Same as `build_points` for an already validated viewport.
pub fn project(values: &[f64], viewport: &Viewport) -> ChartResult<Vec<Point>> {
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        warn!(index, "rejecting non-finite sample");
        return Err(ChartError::InvalidData(format!("sample {index} is not finite: {}", values[index])));
    }
    let n = values.len();
    trace!(n, "projecting samples");
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &v)| Point::new(viewport.x_at(i, n), viewport.y_for(v)))
        .collect())
}

/// Smooth path through all points.
///
/// n = 0 draws nothing, n = 1 is a lone move-to, n = 2 a straight line,
/// otherwise a cubic chain.
pub fn smooth_path(points: &[Point]) -> PathSegment {
    match points {
        [] => PathSegment::new(),
        [p] => {
            let mut path = PathSegment::new();
            path.move_to(*p);
            path
        }
        [a, b] => {
            let mut path = PathSegment::new();
            path.move_to(*a).line_to(*b);
            path
        }
        _ => segment_path(points, 0, points.len() - 1),
    }
}

/// Cubic chain over the index range `[start, end]`, both clamped to `[0, n-1]`.
///
/// Control points use neighbors from the full slice, so a split series joins
/// without a kink at the boundary. Empty when `start >= end` after clamping.
pub fn segment_path(points: &[Point], start: usize, end: usize) -> PathSegment {
    let n = points.len();
    if n == 0 {
        return PathSegment::new();
    }
    let s = clamp(start, 0, n - 1);
    let e = clamp(end, 0, n - 1);
    if s >= e {
        return PathSegment::new();
    }

    let mut path = PathSegment::with_capacity(e - s + 1);
    path.move_to(points[s]);
    for i in s..e {
        let p0 = if i > 0 { points[i - 1] } else { points[i] };
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = if i + 2 < n { points[i + 2] } else { p2 };

        let c1 = Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let c2 = Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
        path.curve_to(c1, c2, p2);
    }
    path
}

/// Historical (solid) and projected (dashed) strokes of one series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSplit {
    pub solid: PathSegment,
    pub dashed: PathSegment,
}

/// Split a series at `boundary`: `[0, boundary]` solid, `[boundary, n-1]` dashed.
/// Both strokes share the boundary point.
pub fn forecast_split(points: &[Point], boundary: usize) -> ForecastSplit {
    let last = points.len().saturating_sub(1);
    ForecastSplit {
        solid: segment_path(points, 0, boundary),
        dashed: segment_path(points, boundary, last),
    }
}

/// Smoothed line closed down to `baseline_y`, for the fill under an area chart.
pub fn area_path(points: &[Point], baseline_y: f64) -> PathSegment {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return PathSegment::new();
    };
    let mut path = smooth_path(points);
    path.line_to(Point::new(last.x, baseline_y))
        .line_to(Point::new(first.x, baseline_y))
        .close();
    path
}

/// Everything a line/area chart needs for one series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    pub points: Vec<Point>,
    pub split: ForecastSplit,
    pub area: PathSegment,
}

impl LineGeometry {
    /// Without a forecast boundary the whole series is solid.
    pub fn build(values: &[f64], viewport: &Viewport, forecast_from: Option<usize>) -> ChartResult<Self> {
        let points = project(values, viewport)?;
        let split = match forecast_from {
            Some(b) => forecast_split(&points, b),
            None => ForecastSplit { solid: smooth_path(&points), dashed: PathSegment::new() },
        };
        let area = area_path(&points, viewport.height());
        trace!(points = points.len(), dashed = !split.dashed.is_empty(), "built line geometry");
        Ok(Self { points, split, area })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use approx::assert_relative_eq;

    #[test]
    fn points_are_spaced_evenly() {
        let pts = build_points(&[1.0, 2.0, 3.0, 4.0, 5.0], 100.0, 50.0, 5.0, 1.0).unwrap();
        assert_eq!(pts.len(), 5);
        for (i, p) in pts.iter().enumerate() {
            assert_relative_eq!(p.x, 25.0 * i as f64);
        }
        assert_relative_eq!(pts[0].y, 50.0);
        assert_relative_eq!(pts[4].y, 0.0);
    }

    #[test]
    fn single_point_sits_at_origin_x() {
        let pts = build_points(&[7.0], 100.0, 50.0, 10.0, 0.0).unwrap();
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].x, 0.0);
        assert_relative_eq!(pts[0].y, 15.0);
    }

    #[test]
    fn empty_series_and_bad_domain() {
        assert!(build_points(&[], 100.0, 50.0, 1.0, 0.0).unwrap().is_empty());
        assert!(build_points(&[1.0, 2.0], 100.0, 50.0, 3.0, 3.0).is_err());
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        assert!(matches!(
            build_points(&[1.0, f64::NAN, 3.0], 100.0, 50.0, 5.0, 0.0),
            Err(ChartError::InvalidData(_))
        ));
        let vp = Viewport::new(100.0, 50.0, 0.0, 5.0).unwrap();
        assert!(LineGeometry::build(&[1.0, f64::INFINITY], &vp, None).is_err());
        assert!(project(&[f64::NEG_INFINITY], &vp).is_err());
    }

    #[test]
    fn smooth_path_degenerate_lengths() {
        assert!(smooth_path(&[]).is_empty());

        let one = smooth_path(&[Point::new(0.0, 1.0)]);
        assert_eq!(one.commands(), &[PathCommand::MoveTo(Point::new(0.0, 1.0))]);

        let two = smooth_path(&[Point::new(0.0, 1.0), Point::new(5.0, 2.0)]);
        assert_eq!(two.to_svg_d(), "M 0 1 L 5 2");
    }

    #[test]
    fn control_points_follow_catmull_rom_rule() {
        let pts = [Point::new(0.0, 0.0), Point::new(6.0, 6.0), Point::new(12.0, 0.0)];
        let path = smooth_path(&pts);
        assert_eq!(path.len(), 3);
        // first pair: p0 duplicated -> c1 = p1 + (p2 - p1)/6
        match path.commands()[1] {
            PathCommand::CurveTo { c1, c2, to } => {
                assert_relative_eq!(c1.x, 1.0);
                assert_relative_eq!(c1.y, 1.0);
                assert_relative_eq!(c2.x, 4.0);
                assert_relative_eq!(c2.y, 6.0);
                assert_eq!(to, pts[1]);
            }
            other => panic!("expected curve, got {other:?}"),
        }
        // last pair: p3 duplicated -> c2 = p2 - (p2 - p1)/6
        match path.commands()[2] {
            PathCommand::CurveTo { c1, c2, to } => {
                assert_relative_eq!(c1.x, 8.0);
                assert_relative_eq!(c1.y, 6.0);
                assert_relative_eq!(c2.x, 11.0);
                assert_relative_eq!(c2.y, 1.0);
                assert_eq!(to, pts[2]);
            }
            other => panic!("expected curve, got {other:?}"),
        }
    }

    #[test]
    fn segment_clamps_and_rejects_inverted_ranges() {
        let pts: Vec<Point> = (0..5).map(|i| Point::new(i as f64, i as f64)).collect();
        assert!(segment_path(&pts, 3, 3).is_empty());
        assert!(segment_path(&pts, 4, 2).is_empty());
        assert!(segment_path(&pts, 9, 12).is_empty());

        let tail = segment_path(&pts, 2, 99);
        assert_eq!(tail.start(), Some(pts[2]));
        assert_eq!(tail.end(), Some(pts[4]));
        assert_eq!(tail.len(), 3);
    }

    #[test]
    fn forecast_halves_meet_at_boundary() {
        let pts: Vec<Point> = (0..7).map(|i| Point::new(i as f64 * 10.0, (i % 3) as f64)).collect();
        let split = forecast_split(&pts, 4);
        assert_eq!(split.solid.end(), Some(pts[4]));
        assert_eq!(split.dashed.start(), Some(pts[4]));
        assert_eq!(split.solid.len() + split.dashed.len(), 2 + 6);
    }

    #[test]
    fn area_closes_to_baseline() {
        let pts = [Point::new(0.0, 5.0), Point::new(10.0, 2.0), Point::new(20.0, 4.0)];
        let area = area_path(&pts, 30.0);
        let cmds = area.commands();
        assert_eq!(cmds[cmds.len() - 3], PathCommand::LineTo(Point::new(20.0, 30.0)));
        assert_eq!(cmds[cmds.len() - 2], PathCommand::LineTo(Point::new(0.0, 30.0)));
        assert_eq!(cmds[cmds.len() - 1], PathCommand::Close);
        assert!(area_path(&[], 30.0).is_empty());
    }
}
