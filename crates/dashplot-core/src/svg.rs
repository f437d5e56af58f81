// File: crates/dashplot-core/src/svg.rs
// Summary: Standalone SVG documents for the line, donut and bar chart geometry.
// Notes:
// - Plot content sits in a group translated by the insets; axis labels live in the margins.
// - Tooltips are not drawn here. They belong to the host's overlay layer.

use crate::arc::DonutGeometry;
use crate::bar::BarLayout;
use crate::curve::LineGeometry;
use crate::error::ChartResult;
use crate::geometry::Point;
use crate::grid::value_ticks;
use crate::palette::{Color, Palette};
use crate::series::Categories;
use crate::types::Insets;
use crate::viewport::Viewport;

const GRID_LINES: usize = 5;
const DASH: &str = "6 4";

struct SvgDoc {
    out: String,
}

impl SvgDoc {
    fn new(width: f64, height: f64, background: Color) -> Self {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
        );
        out.push_str(&format!("  <rect width=\"100%\" height=\"100%\" fill=\"{background}\"/>\n"));
        Self { out }
    }

    fn line(&mut self, s: &str) {
        self.out.push_str("  ");
        self.out.push_str(s);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        self.out.push_str("</svg>\n");
        self.out
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn grid_and_labels(doc: &mut SvgDoc, viewport: &Viewport, palette: &Palette, insets: Insets) {
    let left = insets.left as f64;
    let top = insets.top as f64;
    for (value, y) in value_ticks(viewport, GRID_LINES) {
        let y = y + top;
        doc.line(&format!(
            "<line x1=\"{left}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"1\"/>",
            left + viewport.width(),
            palette.grid
        ));
        doc.line(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"11\" text-anchor=\"end\" fill=\"{}\">{value:.0}</text>",
            left - 6.0,
            y + 4.0,
            palette.axis_label
        ));
    }
}

fn category_labels(doc: &mut SvgDoc, xs: impl Iterator<Item = f64>, categories: &Categories, palette: &Palette, insets: Insets, height: f64) {
    let y = insets.top as f64 + height + 18.0;
    for (i, x) in xs.enumerate() {
        let Some(label) = categories.get(i) else { break };
        doc.line(&format!(
            "<text x=\"{:.2}\" y=\"{y:.2}\" font-size=\"11\" text-anchor=\"middle\" fill=\"{}\">{}</text>",
            x + insets.left as f64,
            palette.axis_label,
            escape(label)
        ));
    }
}

/// Line/area chart. Series are drawn in order; the first is on the bottom.
/// `marker` is an optional hover dot in plot space.
pub fn line_chart_svg(
    lines: &[LineGeometry],
    viewport: &Viewport,
    categories: &Categories,
    palette: &Palette,
    insets: Insets,
    marker: Option<Point>,
) -> ChartResult<String> {
    let w = viewport.width() + insets.hsum() as f64;
    let h = viewport.height() + insets.vsum() as f64;
    let mut doc = SvgDoc::new(w, h, palette.background);
    grid_and_labels(&mut doc, viewport, palette, insets);
    if let Some(first) = lines.first() {
        category_labels(&mut doc, first.points.iter().map(|p| p.x), categories, palette, insets, viewport.height());
    }

    doc.line(&format!("<g transform=\"translate({} {})\">", insets.left, insets.top));
    for (i, line) in lines.iter().enumerate() {
        let color = palette.series_color(i)?;
        if !line.area.is_empty() {
            doc.line(&format!("  <path d=\"{}\" fill=\"{color}\" fill-opacity=\"0.12\" stroke=\"none\"/>", line.area));
        }
        if !line.split.solid.is_empty() {
            doc.line(&format!(
                "  <path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\"/>",
                line.split.solid
            ));
        }
        if !line.split.dashed.is_empty() {
            doc.line(&format!(
                "  <path d=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"2\" stroke-dasharray=\"{DASH}\"/>",
                line.split.dashed
            ));
        }
    }
    if let Some(m) = marker {
        let color = palette.series_color(0)?;
        doc.line(&format!(
            "  <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\" stroke=\"{color}\" stroke-width=\"2\"/>",
            m.x, m.y, palette.background
        ));
    }
    doc.line("</g>");
    Ok(doc.finish())
}

/// Donut (or pie) chart: visible wedges, the hole disk on top, then the hit regions.
pub fn donut_svg(geometry: &DonutGeometry, palette: &Palette, width: f64, height: f64) -> String {
    let mut doc = SvgDoc::new(width, height, palette.background);
    for wedge in &geometry.wedges {
        doc.line(&format!(
            "<path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            wedge.path, wedge.color, palette.background
        ));
    }
    if let Some(hole) = geometry.hole {
        doc.line(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            hole.center.x, hole.center.y, hole.radius, palette.background
        ));
    }
    for hit in &geometry.hit_regions {
        doc.line(&format!(
            "<path d=\"{}\" fill=\"transparent\" stroke=\"transparent\" stroke-width=\"{}\" pointer-events=\"all\" data-slice=\"{}\"/>",
            hit.path, hit.stroke_width, hit.slice_index
        ));
    }
    doc.finish()
}

/// Grouped bar chart with an optional highlighted category band.
pub fn bar_chart_svg(
    layout: &BarLayout,
    viewport: &Viewport,
    categories: &Categories,
    palette: &Palette,
    insets: Insets,
    highlight: Option<usize>,
) -> String {
    let w = viewport.width() + insets.hsum() as f64;
    let h = viewport.height() + insets.vsum() as f64;
    let mut doc = SvgDoc::new(w, h, palette.background);
    grid_and_labels(&mut doc, viewport, palette, insets);
    let centers = (0..layout.categories).map(|i| layout.band_width * (i as f64 + 0.5));
    category_labels(&mut doc, centers, categories, palette, insets, viewport.height());

    doc.line(&format!("<g transform=\"translate({} {})\">", insets.left, insets.top));
    if let Some(i) = highlight.filter(|&i| i < layout.categories) {
        let band = layout.band(i, viewport.height());
        doc.line(&format!(
            "  <rect x=\"{:.2}\" y=\"0\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" fill-opacity=\"0.5\"/>",
            band.left, band.width, band.height, palette.grid
        ));
    }
    for bar in &layout.bars {
        doc.line(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"2\" fill=\"{}\"/>",
            bar.rect.left, bar.rect.top, bar.rect.width, bar.rect.height, bar.color
        ));
    }
    doc.line("</g>");
    doc.finish()
}
