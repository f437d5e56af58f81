// File: crates/dashplot-demo/src/main.rs
// Summary: Demo loads dashboard CSVs, builds line/donut/bar geometry, writes SVGs (PNGs with `raster`)
// and replays a pointer sweep through the tooltip logic.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dashplot_core::svg::{bar_chart_svg, donut_svg, line_chart_svg};
use dashplot_core::{
    compute_slices, telemetry, update_tooltip, BarLayout, Categories, ChartConfig, DonutGeometry, HoverTarget, Insets,
    LineGeometry, Point, PointerEvent, Rect, SampleSeries, TooltipContent, Viewport,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RevenueRow {
    month: String,
    current: f64,
    previous: f64,
}

#[derive(Debug, Deserialize)]
struct TrafficRow {
    source: String,
    visits: f64,
}

#[derive(Debug, Deserialize)]
struct SalesRow {
    month: String,
    online: f64,
    store: f64,
}

fn main() -> Result<()> {
    let _ = telemetry::init_default_tracing();

    let data_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "crates/dashplot-demo/data".to_string()));
    let cfg = match std::env::args().nth(2) {
        Some(p) => load_config(Path::new(&p))?,
        None => ChartConfig::default(),
    };
    let palette = cfg.palette();
    info!(data = %data_dir.display(), theme = %palette.name, "dashplot demo");

    let insets = Insets::default();
    let plot_w = cfg.width - insets.hsum() as f64;
    let plot_h = cfg.height - insets.vsum() as f64;

    // 1) Revenue line with last year's series and a forecast tail
    let revenue: Vec<RevenueRow> = load_csv(&data_dir.join("revenue.csv"))?;
    if revenue.is_empty() {
        anyhow::bail!("revenue.csv has no rows");
    }
    let months = Categories::new(revenue.iter().map(|r| month_label(&r.month)));
    let current = SampleSeries::try_new("This year", revenue.iter().map(|r| r.current).collect())?;
    let previous = SampleSeries::try_new("Last year", revenue.iter().map(|r| r.previous).collect())?;
    let all: Vec<f64> = current.values().iter().chain(previous.values()).copied().collect();
    let vp = Viewport::fit(plot_w, plot_h, &all, cfg.y_padding_ratio)?;
    let lines = [
        LineGeometry::build(current.values(), &vp, cfg.forecast_from)?,
        LineGeometry::build(previous.values(), &vp, None)?,
    ];
    let series = [current, previous];

    // Pointer sweep across the plot area, as if the chart were shown at its logical size.
    let bbox = Rect::from_ltwh(insets.left as f64, insets.top as f64, plot_w, plot_h);
    let target = HoverTarget::Line { bbox, viewport: &vp, series: &series, categories: &months };
    let mut marker = None;
    let steps = 8;
    for step in 0..=steps {
        let x = bbox.left + bbox.width * step as f64 / steps as f64;
        let payload = update_tooltip(PointerEvent::Move { x, y: bbox.top + bbox.height * 0.5 }, &target, cfg.tooltip_offset);
        if let Some(TooltipContent::Sample { label, readings, delta, marker: m, .. }) = payload.content {
            let value = readings.first().map_or(f64::NAN, |r| r.value);
            let delta = delta.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
            println!("  x={x:7.2} -> {:<4} value={value:7.2} vs last year {delta}", label.unwrap_or_default());
            marker = Some(m);
        }
    }
    let left = update_tooltip(PointerEvent::Leave, &target, cfg.tooltip_offset);
    info!(visible = left.visible, "pointer left the revenue chart");

    let svg = line_chart_svg(&lines, &vp, &months, &palette, insets, marker)?;
    write_out("revenue.svg", &svg)?;

    // 2) Traffic sources donut
    let traffic: Vec<TrafficRow> = load_csv(&data_dir.join("traffic.csv"))?;
    let entries: Vec<(String, f64)> = traffic.into_iter().map(|r| (r.source, r.visits)).collect();
    let slices = compute_slices(&entries, &palette)?;
    let size = cfg.height;
    let outer = size * 0.5 - 4.0;
    let center = Point::new(size * 0.5, size * 0.5);
    let donut = DonutGeometry::build(&slices, center, outer, outer * cfg.inner_radius_ratio, cfg.hit_stroke_width);
    for s in &slices {
        println!("  {:<10} {:6.1}%  {:6.1}..{:6.1} deg", s.label, s.percent(), s.start_angle, s.end_angle);
    }
    let donut_target = HoverTarget::Donut {
        bbox: Rect::from_ltwh(0.0, 0.0, size, size),
        width: size,
        height: size,
        geometry: &donut,
        slices: &slices,
    };
    let hover = Point::new(center.x + outer * 0.8, center.y);
    let payload = update_tooltip(PointerEvent::Enter { x: hover.x, y: hover.y }, &donut_target, cfg.tooltip_offset);
    if let Some(TooltipContent::Slice { label, percent, .. }) = payload.content {
        println!("  hover at 3 o'clock -> {label} ({percent:.1}%)");
    }
    write_out("traffic.svg", &donut_svg(&donut, &palette, size, size))?;

    // 3) Monthly sales, grouped bars
    let sales: Vec<SalesRow> = load_csv(&data_dir.join("sales.csv"))?;
    let sale_months = Categories::new(sales.iter().map(|r| month_label(&r.month)));
    let sales_series = [
        SampleSeries::try_new("Online", sales.iter().map(|r| r.online).collect())?,
        SampleSeries::try_new("Store", sales.iter().map(|r| r.store).collect())?,
    ];
    let sales_max = sales_series.iter().map(|s| s.min_max().1).fold(0.0, f64::max);
    let bar_vp = Viewport::new(plot_w, plot_h, 0.0, sales_max * (1.0 + cfg.y_padding_ratio))?;
    let layout = BarLayout::build(&sales_series, &bar_vp, &palette, cfg.bar_gap_ratio)?;
    let bar_bbox = Rect::from_ltwh(insets.left as f64, insets.top as f64, plot_w, plot_h);
    let bar_target = HoverTarget::Bar { bbox: bar_bbox, layout: &layout, series: &sales_series, categories: &sale_months };
    let payload = update_tooltip(
        PointerEvent::Move { x: bar_bbox.left + bar_bbox.width * 0.3, y: bar_bbox.top + 10.0 },
        &bar_target,
        cfg.tooltip_offset,
    );
    let highlight = match payload.content {
        Some(TooltipContent::Bar { category, label, readings }) => {
            let parts: Vec<String> = readings.iter().map(|r| format!("{}={}", r.name, r.value)).collect();
            println!("  hover -> {} {}", label.unwrap_or_default(), parts.join(", "));
            Some(category)
        }
        _ => None,
    };
    write_out("sales.svg", &bar_chart_svg(&layout, &bar_vp, &sale_months, &palette, insets, highlight))?;

    #[cfg(feature = "raster")]
    {
        use dashplot_render_skia::{raster::render_to_png, Scene};
        render_to_png(&Scene::Line { lines: &lines, viewport: &vp, insets }, &palette, out_path("revenue.png"))?;
        render_to_png(&Scene::Donut { geometry: &donut, width: size, height: size }, &palette, out_path("traffic.png"))?;
        render_to_png(
            &Scene::Bar { layout: &layout, viewport: &bar_vp, insets, highlight },
            &palette,
            out_path("sales.png"),
        )?;
        println!("Wrote PNGs to target/out");
    }
    if !dashplot_render_skia::raster_enabled() {
        info!("built without `raster`; PNG output skipped");
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<ChartConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg = ChartConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

/// Deserialize every row of a headed CSV file. Rows that fail to parse are skipped with a warning.
fn load_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        match rec {
            Ok(row) => out.push(row),
            Err(e) => warn!(file = %path.display(), row = i + 1, error = %e, "skipping row"),
        }
    }
    println!("Loaded {} rows from {}", out.len(), path.display());
    Ok(out)
}

/// "2024-03" or "2024-03-15" -> "Mar". Anything else is used verbatim.
fn month_label(raw: &str) -> String {
    let full = if raw.len() == 7 { format!("{raw}-01") } else { raw.to_string() };
    NaiveDate::parse_from_str(&full, "%Y-%m-%d")
        .map(|d| d.format("%b").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// target/out/<name>
fn out_path(name: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    out.push(name);
    out
}

fn write_out(name: &str, contents: &str) -> Result<()> {
    let path = out_path(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
