// File: crates/dashplot-render-skia/src/lib.rs
// Summary: Skia raster backend for dashplot scenes (line, donut, bar) producing PNG bytes.
// Notes:
// - Scene descriptions are always available; actual rasterization needs the `raster` feature.
// - Labels are not drawn here, to avoid font variance across platforms.

use dashplot_core::{BarLayout, DonutGeometry, Insets, LineGeometry, Viewport};

/// One chart ready to be rasterized.
#[derive(Clone, Debug)]
pub enum Scene<'a> {
    Line {
        lines: &'a [LineGeometry],
        viewport: &'a Viewport,
        insets: Insets,
    },
    Donut {
        geometry: &'a DonutGeometry,
        width: f64,
        height: f64,
    },
    Bar {
        layout: &'a BarLayout,
        viewport: &'a Viewport,
        insets: Insets,
        highlight: Option<usize>,
    },
}

impl Scene<'_> {
    /// Output size in whole pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        let (w, h) = match self {
            Scene::Line { viewport, insets, .. } | Scene::Bar { viewport, insets, .. } => (
                viewport.width() + insets.hsum() as f64,
                viewport.height() + insets.vsum() as f64,
            ),
            Scene::Donut { width, height, .. } => (*width, *height),
        };
        (w.ceil().max(1.0) as i32, h.ceil().max(1.0) as i32)
    }
}

/// Whether this build can rasterize.
pub const fn raster_enabled() -> bool {
    cfg!(feature = "raster")
}

#[cfg(feature = "raster")]
pub mod raster {
    use super::Scene;
    use anyhow::Result;
    use dashplot_core::{Color, Palette, PathCommand, PathSegment};
    use skia_safe as skia;
    use tracing::debug;

    const DASH: [f32; 2] = [6.0, 4.0];

    pub fn to_skia_color(c: Color) -> skia::Color {
        skia::Color::from_argb(c.a, c.r, c.g, c.b)
    }

    fn pt(p: dashplot_core::Point, dx: f32, dy: f32) -> skia::Point {
        skia::Point::new(p.x as f32 + dx, p.y as f32 + dy)
    }

    /// Convert a path descriptor into a Skia path, translated by (dx, dy).
    pub fn to_skia_path(segment: &PathSegment, dx: f32, dy: f32) -> skia::Path {
        let mut path = skia::Path::new();
        for c in segment.commands() {
            match *c {
                PathCommand::MoveTo(p) => { path.move_to(pt(p, dx, dy)); }
                PathCommand::LineTo(p) => { path.line_to(pt(p, dx, dy)); }
                PathCommand::CurveTo { c1, c2, to } => {
                    path.cubic_to(pt(c1, dx, dy), pt(c2, dx, dy), pt(to, dx, dy));
                }
                PathCommand::ArcTo { radius, large_arc, sweep, to } => {
                    let size = if large_arc { skia::path::ArcSize::Large } else { skia::path::ArcSize::Small };
                    let dir = if sweep { skia::PathDirection::CW } else { skia::PathDirection::CCW };
                    path.arc_to_rotated((radius as f32, radius as f32), 0.0, size, dir, pt(to, dx, dy));
                }
                PathCommand::Close => { path.close(); }
            }
        }
        path
    }

    fn stroke(color: Color, width: f32) -> skia::Paint {
        let mut p = skia::Paint::default();
        p.set_anti_alias(true);
        p.set_style(skia::paint::Style::Stroke);
        p.set_stroke_width(width);
        p.set_color(to_skia_color(color));
        p
    }

    fn fill(color: Color) -> skia::Paint {
        let mut p = skia::Paint::default();
        p.set_anti_alias(true);
        p.set_style(skia::paint::Style::Fill);
        p.set_color(to_skia_color(color));
        p
    }

    /// Render the scene to PNG bytes using a CPU raster surface.
    pub fn render_png(scene: &Scene<'_>, palette: &Palette) -> Result<Vec<u8>> {
        let (w, h) = scene.pixel_size();
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(to_skia_color(palette.background));

        match scene {
            Scene::Line { lines, viewport, insets } => {
                let (dx, dy) = (insets.left as f32, insets.top as f32);
                draw_grid(canvas, viewport, palette, dx, dy);
                for (i, line) in lines.iter().enumerate() {
                    let color = palette.series_color(i)?;
                    canvas.draw_path(&to_skia_path(&line.area, dx, dy), &fill(color.with_alpha(30)));
                    canvas.draw_path(&to_skia_path(&line.split.solid, dx, dy), &stroke(color, 2.0));
                    let mut dashed = stroke(color, 2.0);
                    dashed.set_path_effect(skia::PathEffect::dash(&DASH, 0.0));
                    canvas.draw_path(&to_skia_path(&line.split.dashed, dx, dy), &dashed);
                }
            }
            Scene::Donut { geometry, .. } => {
                for wedge in &geometry.wedges {
                    let path = to_skia_path(&wedge.path, 0.0, 0.0);
                    canvas.draw_path(&path, &fill(wedge.color));
                    canvas.draw_path(&path, &stroke(palette.background, 1.0));
                }
                if let Some(hole) = geometry.hole {
                    canvas.draw_circle(pt(hole.center, 0.0, 0.0), hole.radius as f32, &fill(palette.background));
                }
            }
            Scene::Bar { layout, viewport, insets, highlight } => {
                let (dx, dy) = (insets.left as f32, insets.top as f32);
                draw_grid(canvas, viewport, palette, dx, dy);
                if let Some(i) = highlight.filter(|&i| i < layout.categories) {
                    let band = layout.band(i, viewport.height());
                    canvas.draw_rect(rect(band, dx, dy), &fill(palette.grid.with_alpha(128)));
                }
                for bar in &layout.bars {
                    canvas.draw_rect(rect(bar.rect, dx, dy), &fill(bar.color));
                }
            }
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(width = w, height = h, bytes = data.as_bytes().len(), "rasterized scene");
        Ok(data.as_bytes().to_vec())
    }

    /// Render and write the PNG, creating parent directories as needed.
    pub fn render_to_png(scene: &Scene<'_>, palette: &Palette, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = render_png(scene, palette)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn rect(r: dashplot_core::Rect, dx: f32, dy: f32) -> skia::Rect {
        skia::Rect::from_xywh(r.left as f32 + dx, r.top as f32 + dy, r.width as f32, r.height as f32)
    }

    fn draw_grid(canvas: &skia::Canvas, viewport: &dashplot_core::Viewport, palette: &Palette, dx: f32, dy: f32) {
        let paint = stroke(palette.grid, 1.0);
        let right = dx + viewport.width() as f32;
        for (_, y) in dashplot_core::grid::value_ticks(viewport, 5) {
            let y = y as f32 + dy;
            canvas.draw_line((dx, y), (right, y), &paint);
        }
    }
}
