// File: crates/dashplot-core/src/series.rs
// Summary: Sample series model (ordered values, one per category) and category labels.
// Notes:
// - A series is immutable once built; new data replaces the whole series.
// - Geometry functions take `&[f64]` so hosts can pass `series.values()` or raw slices.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Ordered numeric samples feeding one chart series.
/// Deserializing goes through `try_new`, so the same checks apply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct SampleSeries {
    name: String,
    values: Vec<f64>,
}

impl SampleSeries {
    /// Build a series enforcing: at least one sample, every sample finite.
    pub fn try_new(name: impl Into<String>, values: Vec<f64>) -> ChartResult<Self> {
        let name = name.into();
        if values.is_empty() {
            return Err(ChartError::InvalidData(format!("series '{name}' has no samples")));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "series '{name}' has a non-finite sample at index {i}"
            )));
        }
        Ok(Self { name, values })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn values(&self) -> &[f64] { &self.values }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub fn min_max(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

#[derive(Deserialize)]
struct RawSeries {
    name: String,
    values: Vec<f64>,
}

impl TryFrom<RawSeries> for SampleSeries {
    type Error = ChartError;

    fn try_from(raw: RawSeries) -> ChartResult<Self> {
        Self::try_new(raw.name, raw.values)
    }
}

/// X-axis category labels shared by the series of one chart (e.g. month names).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Categories(pub Vec<String>);

impl Categories {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_nan() {
        assert!(SampleSeries::try_new("rev", vec![]).is_err());
        let err = SampleSeries::try_new("rev", vec![1.0, f64::NAN]).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn deserialize_validates_samples() {
        assert!(serde_json::from_str::<SampleSeries>(r#"{"name":"rev","values":[]}"#).is_err());
        let s: SampleSeries = serde_json::from_str(r#"{"name":"rev","values":[1.5,2.0]}"#).unwrap();
        assert_eq!(s.values(), &[1.5, 2.0]);
    }

    #[test]
    fn min_max_over_samples() {
        let s = SampleSeries::try_new("rev", vec![51.0, 50.0, 57.0, 68.0]).unwrap();
        assert_eq!(s.min_max(), (50.0, 68.0));
        assert_eq!(s.name(), "rev");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn category_lookup() {
        let c = Categories::new(["Jan", "Feb"]);
        assert_eq!(c.get(1), Some("Feb"));
        assert_eq!(c.get(2), None);
    }
}
