// File: crates/dashplot-render-skia/tests/raster_smoke.rs
// Purpose: Rasterize each scene kind and validate the decoded PNG.

#![cfg(feature = "raster")]

use dashplot_core::{compute_slices, BarLayout, DonutGeometry, Insets, LineGeometry, Palette, Point, SampleSeries, Viewport};
use dashplot_render_skia::raster::{render_png, render_to_png};
use dashplot_render_skia::Scene;

fn decode(bytes: &[u8]) -> image::RgbaImage {
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    image::load_from_memory(bytes).expect("decode png").to_rgba8()
}

#[test]
fn line_scene_matches_viewport_plus_insets() {
    let vp = Viewport::new(200.0, 100.0, 0.0, 10.0).unwrap();
    let lines = [LineGeometry::build(&[1.0, 5.0, 3.0, 9.0, 4.0], &vp, Some(3)).unwrap()];
    let insets = Insets::new(10, 10, 5, 5);
    let palette = Palette::light();
    let img = decode(&render_png(&Scene::Line { lines: &lines, viewport: &vp, insets }, &palette).expect("render"));
    assert_eq!((img.width(), img.height()), (220, 110));
    // top-left corner is background
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn donut_hole_is_background() {
    let palette = Palette::dark();
    let slices = compute_slices(&[("a", 2.0), ("b", 1.0)], &palette).unwrap();
    let g = DonutGeometry::build(&slices, Point::new(50.0, 50.0), 50.0, 30.0, 12.0);
    let img = decode(&render_png(&Scene::Donut { geometry: &g, width: 100.0, height: 100.0 }, &palette).expect("render"));
    let bg = palette.background;
    assert_eq!(img.get_pixel(50, 50).0, [bg.r, bg.g, bg.b, 255]);
}

#[test]
fn bar_scene_writes_file() {
    let series = vec![SampleSeries::try_new("sales", vec![3.0, 1.0, 2.0]).unwrap()];
    let vp = Viewport::new(90.0, 60.0, 0.0, 3.0).unwrap();
    let layout = BarLayout::build(&series, &vp, &Palette::light(), 0.2).unwrap();
    let out = std::path::PathBuf::from("target/test_out/bars.png");
    let scene = Scene::Bar { layout: &layout, viewport: &vp, insets: Insets::default(), highlight: Some(0) };
    render_to_png(&scene, &Palette::light(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}
