// File: crates/dashplot-core/src/lib.rs
// Summary: Core library entry point; exports chart geometry, pointer mapping and SVG output.

pub mod arc;
pub mod bar;
pub mod config;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod palette;
pub mod path;
pub mod pointer;
pub mod series;
pub mod svg;
pub mod telemetry;
pub mod tooltip;
pub mod types;
pub mod viewport;

pub use arc::{arc_path, compute_slices, large_arc_flag, slice_spans, DonutGeometry, HitRegion, Slice};
pub use bar::{Bar, BarLayout};
pub use config::ChartConfig;
pub use curve::{area_path, build_points, forecast_split, project, segment_path, smooth_path, ForecastSplit, LineGeometry};
pub use error::{ChartError, ChartResult};
pub use geometry::{Point, Rect};
pub use palette::{Color, Palette};
pub use path::{PathCommand, PathSegment};
pub use pointer::{map_pointer_to_sample, percentage_delta, PercentDelta, SampleHit};
pub use series::{Categories, SampleSeries};
pub use tooltip::{update_tooltip, HoverTarget, PointerEvent, TooltipContent, TooltipOffset, TooltipPayload};
pub use types::Insets;
pub use viewport::Viewport;
