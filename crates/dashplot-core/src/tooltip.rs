// File: crates/dashplot-core/src/tooltip.rs
// Summary: Tooltip payload and the pure pointer-event -> payload transformation.
// Notes:
// - The payload is anchored to raw screen coordinates plus a fixed offset; the host
//   draws it in an overlay layer, outside the chart's own coordinate transform.
// - Each event produces a fresh payload (last write wins); nothing here is retained.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::arc::{DonutGeometry, Slice};
use crate::bar::BarLayout;
use crate::geometry::{Point, Rect};
use crate::palette::Color;
use crate::pointer::{band_index_at, map_pointer_to_sample, percentage_delta, PercentDelta};
use crate::series::{Categories, SampleSeries};
use crate::types::DEFAULT_TOOLTIP_OFFSET;
use crate::viewport::Viewport;

/// Pointer events delivered by the host, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Enter { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Leave,
}

/// Pixel offset between the pointer and the tooltip's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TooltipOffset {
    pub dx: f64,
    pub dy: f64,
}

impl Default for TooltipOffset {
    fn default() -> Self {
        Self { dx: DEFAULT_TOOLTIP_OFFSET, dy: DEFAULT_TOOLTIP_OFFSET }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesReading {
    pub name: String,
    pub value: f64,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TooltipContent {
    Sample {
        label: Option<String>,
        index: usize,
        fraction: f64,
        /// Hover marker on the first series, in plot space.
        marker: Point,
        readings: Vec<SeriesReading>,
        /// First series against the second, when there are two.
        delta: Option<PercentDelta>,
    },
    Slice {
        index: usize,
        label: String,
        amount: f64,
        percent: f64,
        color: Color,
    },
    Bar {
        category: usize,
        label: Option<String>,
        readings: Vec<SeriesReading>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TooltipPayload {
    pub visible: bool,
    /// Last pointer position, screen space.
    pub pointer: Point,
    /// Where the overlay goes: pointer + offset.
    pub anchor: Point,
    pub content: Option<TooltipContent>,
}

impl TooltipPayload {
    pub fn hidden() -> Self { Self::default() }

    fn shown(x: f64, y: f64, offset: TooltipOffset, content: TooltipContent) -> Self {
        let pointer = Point::new(x, y);
        Self { visible: true, pointer, anchor: pointer.offset(offset.dx, offset.dy), content: Some(content) }
    }
}

/// What the pointer is hovering over.
#[derive(Clone, Copy, Debug)]
pub enum HoverTarget<'a> {
    Line {
        bbox: Rect,
        viewport: &'a Viewport,
        series: &'a [SampleSeries],
        categories: &'a Categories,
    },
    Donut {
        bbox: Rect,
        /// Logical size the donut geometry was built for.
        width: f64,
        height: f64,
        geometry: &'a DonutGeometry,
        slices: &'a [Slice],
    },
    Bar {
        bbox: Rect,
        layout: &'a BarLayout,
        series: &'a [SampleSeries],
        categories: &'a Categories,
    },
}

/// Map a screen point into a chart's logical `width` x `height` space.
pub fn screen_to_plot(p: Point, bbox: &Rect, width: f64, height: f64) -> Point {
    let fx = if bbox.width > 0.0 { (p.x - bbox.left) / bbox.width } else { 0.0 };
    let fy = if bbox.height > 0.0 { (p.y - bbox.top) / bbox.height } else { 0.0 };
    Point::new(fx * width, fy * height)
}

/// Compute the tooltip for one pointer event. Leave always hides.
pub fn update_tooltip(event: PointerEvent, target: &HoverTarget<'_>, offset: TooltipOffset) -> TooltipPayload {
    let (x, y) = match event {
        PointerEvent::Enter { x, y } | PointerEvent::Move { x, y } => (x, y),
        PointerEvent::Leave => return TooltipPayload::hidden(),
    };
    let content = match *target {
        HoverTarget::Line { bbox, viewport, series, categories } => line_content(x, y, &bbox, viewport, series, categories),
        HoverTarget::Donut { bbox, width, height, geometry, slices } => {
            let p = screen_to_plot(Point::new(x, y), &bbox, width, height);
            geometry.slice_at(slices, p).map(|i| {
                let s = &slices[i];
                TooltipContent::Slice { index: i, label: s.label.clone(), amount: s.amount, percent: s.percent(), color: s.color }
            })
        }
        HoverTarget::Bar { bbox, layout, series, categories } => {
            band_index_at(x, &bbox, layout.categories).map(|category| TooltipContent::Bar {
                category,
                label: categories.get(category).map(str::to_string),
                readings: layout
                    .bars_in(category)
                    .map(|b| SeriesReading {
                        name: series.get(b.series).map(|s| s.name().to_string()).unwrap_or_default(),
                        value: b.value,
                        color: Some(b.color),
                    })
                    .collect(),
            })
        }
    };
    trace!(?event, shown = content.is_some(), "tooltip updated");
    match content {
        Some(c) => TooltipPayload::shown(x, y, offset, c),
        None => TooltipPayload::hidden(),
    }
}

fn line_content(
    x: f64,
    y: f64,
    bbox: &Rect,
    viewport: &Viewport,
    series: &[SampleSeries],
    categories: &Categories,
) -> Option<TooltipContent> {
    let first = series.first()?;
    let hit = map_pointer_to_sample(x, y, bbox, first.values(), viewport)?;
    let readings: Vec<SeriesReading> = series
        .iter()
        .filter_map(|s| {
            hit.value_of(s.values()).map(|value| SeriesReading { name: s.name().to_string(), value, color: None })
        })
        .collect();
    let delta = match readings.as_slice() {
        [current, previous, ..] => Some(percentage_delta(current.value, previous.value)),
        _ => None,
    };
    Some(TooltipContent::Sample {
        label: hit.label(categories).map(str::to_string),
        index: hit.index,
        fraction: hit.fraction,
        marker: hit.plot_point(viewport),
        readings,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc::compute_slices;
    use crate::palette::Palette;

    fn line_fixture() -> (Viewport, Vec<SampleSeries>, Categories) {
        let vp = Viewport::new(100.0, 50.0, 0.0, 100.0).unwrap();
        let series = vec![
            SampleSeries::try_new("current", vec![44.0, 60.0, 30.0]).unwrap(),
            SampleSeries::try_new("previous", vec![50.0, 0.0, 30.0]).unwrap(),
        ];
        (vp, series, Categories::new(["Jan", "Feb", "Mar"]))
    }

    #[test]
    fn leave_hides() {
        let (vp, series, cats) = line_fixture();
        let target = HoverTarget::Line { bbox: Rect::from_ltwh(0.0, 0.0, 100.0, 50.0), viewport: &vp, series: &series, categories: &cats };
        let p = update_tooltip(PointerEvent::Leave, &target, TooltipOffset::default());
        assert!(!p.visible);
        assert!(p.content.is_none());
    }

    #[test]
    fn line_tooltip_reads_both_series_with_delta() {
        let (vp, series, cats) = line_fixture();
        let target = HoverTarget::Line { bbox: Rect::from_ltwh(0.0, 0.0, 100.0, 50.0), viewport: &vp, series: &series, categories: &cats };
        let p = update_tooltip(PointerEvent::Enter { x: 0.0, y: 20.0 }, &target, TooltipOffset { dx: 12.0, dy: 8.0 });
        assert!(p.visible);
        assert_eq!(p.pointer, Point::new(0.0, 20.0));
        assert_eq!(p.anchor, Point::new(12.0, 28.0));
        match p.content {
            Some(TooltipContent::Sample { label, index, readings, delta, .. }) => {
                assert_eq!(label.as_deref(), Some("Jan"));
                assert_eq!(index, 0);
                assert_eq!(readings.len(), 2);
                assert_eq!(delta, Some(PercentDelta::Percent(-12.0)));
            }
            other => panic!("unexpected content {other:?}"),
        }

        // on Feb the previous value is 0
        let p = update_tooltip(PointerEvent::Move { x: 50.0, y: 20.0 }, &target, TooltipOffset::default());
        match p.content {
            Some(TooltipContent::Sample { label, delta, .. }) => {
                assert_eq!(label.as_deref(), Some("Feb"));
                assert_eq!(delta, Some(PercentDelta::NotApplicable));
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn donut_tooltip_and_miss() {
        let slices = compute_slices(&[("Direct", 3.0), ("Referral", 1.0)], &Palette::light()).unwrap();
        let donut = DonutGeometry::build(&slices, Point::new(50.0, 50.0), 50.0, 30.0, 10.0);
        // displayed at 2x
        let target = HoverTarget::Donut {
            bbox: Rect::from_ltwh(0.0, 0.0, 200.0, 200.0),
            width: 100.0,
            height: 100.0,
            geometry: &donut,
            slices: &slices,
        };
        // left of center -> 270 deg -> Referral (270..360)
        let p = update_tooltip(PointerEvent::Move { x: 20.0, y: 100.0 }, &target, TooltipOffset::default());
        match p.content {
            Some(TooltipContent::Slice { index, label, percent, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(label, "Referral");
                assert!((percent - 25.0).abs() < 1e-9);
            }
            other => panic!("unexpected content {other:?}"),
        }
        // center of the hole
        let miss = update_tooltip(PointerEvent::Move { x: 100.0, y: 100.0 }, &target, TooltipOffset::default());
        assert!(!miss.visible);
    }

    #[test]
    fn bar_tooltip_lists_every_series() {
        let series = vec![
            SampleSeries::try_new("sales", vec![1.0, 2.0]).unwrap(),
            SampleSeries::try_new("returns", vec![0.5, 0.25]).unwrap(),
        ];
        let vp = Viewport::new(100.0, 50.0, 0.0, 2.0).unwrap();
        let layout = BarLayout::build(&series, &vp, &Palette::light(), 0.2).unwrap();
        let cats = Categories::new(["Q1", "Q2"]);
        let target = HoverTarget::Bar { bbox: Rect::from_ltwh(0.0, 0.0, 100.0, 50.0), layout: &layout, series: &series, categories: &cats };
        let p = update_tooltip(PointerEvent::Move { x: 75.0, y: 10.0 }, &target, TooltipOffset::default());
        match p.content {
            Some(TooltipContent::Bar { category, label, readings }) => {
                assert_eq!(category, 1);
                assert_eq!(label.as_deref(), Some("Q2"));
                assert_eq!(readings.iter().map(|r| r.value).collect::<Vec<_>>(), vec![2.0, 0.25]);
                assert_eq!(readings[1].name, "returns");
            }
            other => panic!("unexpected content {other:?}"),
        }
    }
}
