// File: crates/dashplot-core/src/bar.rs
// Summary: Grouped bar chart layout (one band per category, one bar per series).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::geometry::{clamp, Rect};
use crate::palette::{Color, Palette};
use crate::series::SampleSeries;
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub category: usize,
    pub series: usize,
    pub value: f64,
    /// Plot-space rectangle, grown from the baseline toward the value.
    pub rect: Rect,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub bars: Vec<Bar>,
    pub categories: usize,
    pub band_width: f64,
    pub bar_width: f64,
    /// Plot-space y of the value bars grow from.
    pub baseline_y: f64,
}

impl BarLayout {
    /// Lay out `series` side by side in equal category bands.
    ///
    /// `gap_ratio` is the share of each band left empty around its bars, in `[0, 1)`.
    /// Bars grow from 0, or from the nearest domain edge when 0 is outside the domain.
    pub fn build(series: &[SampleSeries], viewport: &Viewport, palette: &Palette, gap_ratio: f64) -> ChartResult<Self> {
        let Some(first) = series.first() else {
            return Err(ChartError::InvalidData("bar chart needs at least one series".into()));
        };
        let categories = first.len();
        if categories == 0 {
            return Err(ChartError::InvalidData(format!("series '{}' has no samples", first.name())));
        }
        if let Some(s) = series.iter().find(|s| s.len() != categories) {
            return Err(ChartError::InvalidData(format!(
                "series '{}' has {} samples, expected {}",
                s.name(),
                s.len(),
                categories
            )));
        }
        if !(0.0..1.0).contains(&gap_ratio) {
            return Err(ChartError::Config(format!("bar gap ratio {gap_ratio} outside [0, 1)")));
        }

        let band_width = viewport.width() / categories as f64;
        let inner = band_width * (1.0 - gap_ratio);
        let bar_width = inner / series.len() as f64;
        let base_value = clamp(0.0, viewport.y_min(), viewport.y_max());
        let baseline_y = viewport.y_for(base_value);

        let mut bars = Vec::with_capacity(categories * series.len());
        for (j, s) in series.iter().enumerate() {
            let color = palette.series_color(j)?;
            for (i, &value) in s.values().iter().enumerate() {
                let x = band_width * i as f64 + (band_width - inner) / 2.0 + bar_width * j as f64;
                let y = viewport.y_for(clamp(value, viewport.y_min(), viewport.y_max()));
                let rect = Rect::from_ltwh(x, y.min(baseline_y), bar_width, (y - baseline_y).abs());
                bars.push(Bar { category: i, series: j, value, rect, color });
            }
        }
        debug!(categories, series = series.len(), "laid out bars");
        Ok(Self { bars, categories, band_width, bar_width, baseline_y })
    }

    /// Bars of one category, in series order.
    pub fn bars_in(&self, category: usize) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(move |b| b.category == category)
    }

    /// Band of one category in plot space, spanning the full viewport height.
    pub fn band(&self, category: usize, height: f64) -> Rect {
        Rect::from_ltwh(self.band_width * category as f64, 0.0, self.band_width, height)
    }
}
