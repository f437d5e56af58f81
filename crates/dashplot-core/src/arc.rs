// File: crates/dashplot-core/src/arc.rs
// Summary: Donut/pie arc geometry: proportional slices, wedge paths, hit regions and hit-testing.
// Notes:
// - Angles are degrees, 0 = top, growing clockwise.
// - Wedges run center -> arc -> center (a wedge-pie). The donut hole is a separate
//   disk drawn on top of the wedges, not an annulus cut into them.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::geometry::{polar_to_cartesian, Point};
use crate::palette::{Color, Palette};
use crate::path::PathSegment;

const FULL_TURN: f64 = 360.0;

/// One entry of a proportional breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub amount: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color,
    /// amount / total, in [0, 1]
    pub share: f64,
}

impl Slice {
    pub fn span(&self) -> f64 { self.end_angle - self.start_angle }

    /// Share of the total as a percentage.
    pub fn percent(&self) -> f64 { self.share * 100.0 }

    /// Angle halfway through the slice; where a label or callout would sit.
    pub fn mid_angle(&self) -> f64 { (self.start_angle + self.end_angle) * 0.5 }
}

/// Contiguous angular spans for `amounts`, accumulated in input order from 0.
///
/// Rejects negative/non-finite amounts, a zero total and a total that
/// overflows. Spans are not re-normalized, so the final end angle is 360 up to
/// floating-point drift.
pub fn slice_spans(amounts: &[f64]) -> ChartResult<Vec<(f64, f64)>> {
    if let Some((index, &amount)) = amounts.iter().enumerate().find(|(_, a)| !a.is_finite() || **a < 0.0) {
        warn!(index, amount, "rejecting slice amount");
        return Err(ChartError::InvalidAmount { index, amount });
    }
    let total: f64 = amounts.iter().sum();
    if !total.is_finite() {
        warn!("slice amounts overflow their total");
        return Err(ChartError::InvalidData("slice amounts sum to infinity".into()));
    }
    if total <= 0.0 {
        return Err(ChartError::ZeroTotal);
    }
    let mut angle = 0.0;
    Ok(amounts
        .iter()
        .map(|a| {
            let start = angle;
            angle += a / total * FULL_TURN;
            (start, angle)
        })
        .collect())
}

/// Build labelled slices; colors come from `palette` by position.
pub fn compute_slices<S: AsRef<str>>(entries: &[(S, f64)], palette: &Palette) -> ChartResult<Vec<Slice>> {
    let amounts: Vec<f64> = entries.iter().map(|(_, a)| *a).collect();
    let spans = slice_spans(&amounts)?;
    let total: f64 = amounts.iter().sum();
    let slices = entries
        .iter()
        .zip(spans)
        .enumerate()
        .map(|(i, ((label, amount), (start, end)))| {
            Ok(Slice {
                label: label.as_ref().to_string(),
                amount: *amount,
                start_angle: start,
                end_angle: end,
                color: palette.slice_color(i)?,
                share: amount / total,
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;
    debug!(count = slices.len(), total, "computed slices");
    Ok(slices)
}

/// `true` when the arc between the angles needs SVG's large-arc flag.
#[inline]
pub fn large_arc_flag(start_angle: f64, end_angle: f64) -> bool {
    end_angle - start_angle > 180.0
}

/// Wedge from `center` out to the arc `[start_angle, end_angle]` and back. Always clockwise.
///
/// A full turn is split into two half arcs since an SVG arc whose endpoints
/// coincide draws nothing.
pub fn arc_path(start_angle: f64, end_angle: f64, radius: f64, center: Point) -> PathSegment {
    let start = polar_to_cartesian(center, radius, start_angle);
    let end = polar_to_cartesian(center, radius, end_angle);
    let mut path = PathSegment::with_capacity(5);
    path.move_to(center).line_to(start);
    if end_angle - start_angle >= FULL_TURN - 1e-9 {
        let mid = polar_to_cartesian(center, radius, start_angle + 180.0);
        path.arc_to(radius, false, true, mid).arc_to(radius, false, true, end);
    } else {
        path.arc_to(radius, large_arc_flag(start_angle, end_angle), true, end);
    }
    path.close();
    path
}

/// Invisible copy of a wedge with a wide stroke, used only for pointer capture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub slice_index: usize,
    pub path: PathSegment,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wedge {
    pub slice_index: usize,
    pub path: PathSegment,
    pub color: Color,
}

/// Disk laid over the wedges to make the donut hole.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonutGeometry {
    pub center: Point,
    pub outer_radius: f64,
    pub wedges: Vec<Wedge>,
    pub hit_regions: Vec<HitRegion>,
    /// `None` for a plain pie.
    pub hole: Option<Circle>,
}

impl DonutGeometry {
    pub fn build(
        slices: &[Slice],
        center: Point,
        outer_radius: f64,
        inner_radius: f64,
        hit_stroke_width: f64,
    ) -> Self {
        let mut wedges = Vec::with_capacity(slices.len());
        let mut hit_regions = Vec::with_capacity(slices.len());
        for (i, s) in slices.iter().enumerate() {
            let path = arc_path(s.start_angle, s.end_angle, outer_radius, center);
            hit_regions.push(HitRegion { slice_index: i, path: path.clone(), stroke_width: hit_stroke_width });
            wedges.push(Wedge { slice_index: i, path, color: s.color });
        }
        let hole = (inner_radius > 0.0).then_some(Circle { center, radius: inner_radius.min(outer_radius) });
        Self { center, outer_radius, wedges, hit_regions, hole }
    }

    pub fn inner_radius(&self) -> f64 {
        self.hole.map_or(0.0, |c| c.radius)
    }

    /// Slice whose hit region contains a plot-space point, or `None` off the ring.
    pub fn slice_at(&self, slices: &[Slice], p: Point) -> Option<usize> {
        let stroke = self.hit_regions.iter().map(|h| h.stroke_width).fold(0.0, f64::max);
        slice_at(slices, self.center, self.inner_radius(), self.outer_radius, stroke, p)
    }
}

/// Hit test against the slice hit regions: each wedge widened by half of
/// `hit_stroke_width` on every edge, so thin slices stay hoverable. Regions are
/// checked in reverse draw order; where they overlap the later slice wins.
/// Points inside `inner_radius` never hit.
pub fn slice_at(
    slices: &[Slice],
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    hit_stroke_width: f64,
    p: Point,
) -> Option<usize> {
    let half = (hit_stroke_width * 0.5).max(0.0);
    let d = center.distance_to(p);
    if slices.is_empty() || d < inner_radius || d > outer_radius + half {
        return None;
    }
    let angle = pointer_angle(center, p);
    // angular reach of a half-stroke around a radial edge at distance d
    let tolerance = if half > 0.0 && d > 0.0 { (half / d).min(1.0).asin().to_degrees() } else { 0.0 };
    slices
        .iter()
        .rposition(|s| angular_gap(angle, s.start_angle, s.end_angle) <= tolerance)
        // accumulated drift can leave the last slice ending just short of 360
        .or(Some(slices.len() - 1))
}

/// Degrees between `angle` and the closed span `[start, end]`, going around the circle.
fn angular_gap(angle: f64, start: f64, end: f64) -> f64 {
    if angle >= start && angle <= end {
        return 0.0;
    }
    let dist = |a: f64, b: f64| {
        let d = (a - b).rem_euclid(FULL_TURN);
        d.min(FULL_TURN - d)
    };
    dist(angle, start).min(dist(angle, end))
}

/// Angle of `p` around `center` in [0, 360), 0 = top, clockwise.
pub fn pointer_angle(center: Point, p: Point) -> f64 {
    let deg = (p.y - center.y).atan2(p.x - center.x).to_degrees() + 90.0;
    deg.rem_euclid(FULL_TURN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use approx::assert_abs_diff_eq;

    fn entries() -> Vec<(&'static str, f64)> {
        vec![("Desktop", 50.0), ("Mobile", 30.0), ("Tablet", 20.0)]
    }

    #[test]
    fn spans_accumulate_in_order() {
        let s = compute_slices(&entries(), &Palette::light()).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].start_angle, 0.0);
        assert_abs_diff_eq!(s[0].end_angle, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s[1].end_angle, 288.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s[2].end_angle, 360.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s[1].percent(), 30.0, epsilon = 1e-9);
        assert_eq!(s[1].color, Palette::light().slices[1]);
    }

    #[test]
    fn rejects_zero_total_and_negative() {
        assert_eq!(slice_spans(&[0.0, 0.0]), Err(ChartError::ZeroTotal));
        assert_eq!(slice_spans(&[]), Err(ChartError::ZeroTotal));
        assert_eq!(
            slice_spans(&[1.0, -2.0]),
            Err(ChartError::InvalidAmount { index: 1, amount: -2.0 })
        );
    }

    #[test]
    fn large_arc_flag_threshold() {
        assert!(large_arc_flag(0.0, 200.0));
        assert!(!large_arc_flag(0.0, 90.0));
        assert!(!large_arc_flag(10.0, 190.0));
    }

    #[test]
    fn wedge_path_shape() {
        let c = Point::new(100.0, 100.0);
        let p = arc_path(0.0, 90.0, 50.0, c);
        assert_eq!(p.to_svg_d(), "M 100 100 L 100 50 A 50 50 0 0 1 150 100 Z");
        let big = arc_path(0.0, 200.0, 50.0, c);
        match big.commands()[2] {
            PathCommand::ArcTo { large_arc, sweep, .. } => {
                assert!(large_arc);
                assert!(sweep);
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn full_turn_uses_two_arcs() {
        let p = arc_path(0.0, 360.0, 10.0, Point::new(0.0, 0.0));
        let arcs = p.commands().iter().filter(|c| matches!(c, PathCommand::ArcTo { .. })).count();
        assert_eq!(arcs, 2);
    }

    #[test]
    fn hit_test_by_angle_and_ring() {
        let slices = compute_slices(&entries(), &Palette::light()).unwrap();
        let donut = DonutGeometry::build(&slices, Point::new(0.0, 0.0), 100.0, 60.0, 12.0);
        assert_eq!(donut.hit_regions.len(), 3);
        assert_eq!(donut.hit_regions[0].path, donut.wedges[0].path);
        assert_eq!(donut.hit_regions[0].stroke_width, 12.0);

        // right of center -> 90 deg -> first slice
        assert_eq!(donut.slice_at(&slices, Point::new(80.0, 0.0)), Some(0));
        // left of center -> 270 deg -> second slice (180..288)
        assert_eq!(donut.slice_at(&slices, Point::new(-80.0, 0.0)), Some(1));
        // inside the hole / outside the ring
        assert_eq!(donut.slice_at(&slices, Point::new(10.0, 0.0)), None);
        assert_eq!(donut.slice_at(&slices, Point::new(0.0, 150.0)), None);
    }

    #[test]
    fn thin_slice_is_hoverable_through_stroke() {
        let slices = compute_slices(&[("big", 1000.0), ("sliver", 1.0)], &Palette::light()).unwrap();
        let c = Point::new(0.0, 0.0);
        let donut = DonutGeometry::build(&slices, c, 100.0, 60.0, 12.0);
        let edge = slices[1].start_angle;
        assert!(slices[1].span() < 0.4);

        // half a degree into the big slice, about 0.7px from the sliver's edge
        let near = polar_to_cartesian(c, 80.0, edge - 0.5);
        assert_eq!(donut.slice_at(&slices, near), Some(1));
        // just past the outer rim, over the sliver
        let rim = polar_to_cartesian(c, 103.0, slices[1].mid_angle());
        assert_eq!(donut.slice_at(&slices, rim), Some(1));
        // far from any edge stays on the big slice
        assert_eq!(donut.slice_at(&slices, polar_to_cartesian(c, 80.0, 180.0)), Some(0));
        // without stroke the exact wedge is used
        assert_eq!(slice_at(&slices, c, 60.0, 100.0, 0.0, near), Some(0));
        assert_eq!(slice_at(&slices, c, 60.0, 100.0, 0.0, rim), None);
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert!(matches!(slice_spans(&[f64::MAX, f64::MAX]), Err(ChartError::InvalidData(_))));
    }

    #[test]
    fn pointer_angle_is_clockwise_from_top() {
        let c = Point::new(0.0, 0.0);
        assert_abs_diff_eq!(pointer_angle(c, Point::new(0.0, -1.0)), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pointer_angle(c, Point::new(1.0, 0.0)), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pointer_angle(c, Point::new(0.0, 1.0)), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pointer_angle(c, Point::new(-1.0, 0.0)), 270.0, epsilon = 1e-9);
    }
}
