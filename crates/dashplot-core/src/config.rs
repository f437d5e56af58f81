// File: crates/dashplot-core/src/config.rs
// Summary: Chart configuration (sizes, forecast split, tooltip/hit-region tuning, palette name).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::palette::{self, Palette};
use crate::tooltip::TooltipOffset;
use crate::types::{DEFAULT_HEIGHT, DEFAULT_HIT_STROKE_WIDTH, DEFAULT_WIDTH};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    /// First index drawn dashed (projected data). `None` draws the whole series solid.
    pub forecast_from: Option<usize>,
    pub tooltip_offset: TooltipOffset,
    pub hit_stroke_width: f64,
    /// Donut hole radius as a share of the outer radius; 0 draws a plain pie.
    pub inner_radius_ratio: f64,
    pub bar_gap_ratio: f64,
    /// Share of the data span added above and below when fitting the value domain.
    pub y_padding_ratio: f64,
    /// Palette preset name.
    pub theme: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            forecast_from: None,
            tooltip_offset: TooltipOffset::default(),
            hit_stroke_width: DEFAULT_HIT_STROKE_WIDTH,
            inner_radius_ratio: 0.6,
            bar_gap_ratio: 0.3,
            y_padding_ratio: 0.05,
            theme: "light".into(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(s: &str) -> ChartResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ChartError::Config(e.to_string()))?;
        cfg.validate()?;
        debug!(theme = %cfg.theme, width = cfg.width, height = cfg.height, "loaded chart config");
        Ok(cfg)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChartError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ChartError::InvalidViewport { width: self.width, height: self.height });
        }
        if !(0.0..1.0).contains(&self.inner_radius_ratio) {
            return Err(ChartError::Config(format!("inner_radius_ratio {} outside [0, 1)", self.inner_radius_ratio)));
        }
        if !(0.0..1.0).contains(&self.bar_gap_ratio) {
            return Err(ChartError::Config(format!("bar_gap_ratio {} outside [0, 1)", self.bar_gap_ratio)));
        }
        if !(self.hit_stroke_width >= 0.0) || !(self.y_padding_ratio >= 0.0) {
            return Err(ChartError::Config("hit_stroke_width and y_padding_ratio must be non-negative".into()));
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        palette::find(&self.theme)
    }
}
