// File: crates/dashplot-core/src/error.rs
// Summary: Error type shared by all geometry entry points.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Precondition violations. Geometry never emits NaN/Infinity into paths;
/// inputs that would produce them are rejected with one of these instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("empty value domain: y_min={y_min} must be below y_max={y_max}")]
    EmptyDomain { y_min: f64, y_max: f64 },

    #[error("slice amounts sum to zero")]
    ZeroTotal,

    #[error("invalid slice amount at index {index}: {amount}")]
    InvalidAmount { index: usize, amount: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("palette has no colors")]
    EmptyPalette,

    #[error("invalid config: {0}")]
    Config(String),
}
