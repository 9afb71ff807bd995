mod location;
mod summary;

pub use location::{LocationAnalyzer, LocationStats};
pub use summary::SummaryAnalyzer;

use crate::sample::Sample;
use serde::{Deserialize, Serialize};

/// Best/worst samples by signal plus per-field means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub sample_count: usize,
    pub best: Sample,
    pub worst: Sample,
    pub averages: Averages,
}

/// Means over the non-null values of each field.
///
/// `None` means the field had no values at all, which is different from a
/// mean of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub signal: Option<f64>,
    pub latency_ms: Option<f64>,
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
}

impl Averages {
    pub fn from_samples(samples: &[Sample]) -> Self {
        Self {
            signal: mean(samples.iter().filter_map(|s| s.signal.map(f64::from))),
            latency_ms: mean(samples.iter().filter_map(|s| s.latency_ms)),
            download_mbps: mean(samples.iter().filter_map(|s| s.download_mbps)),
            upload_mbps: mean(samples.iter().filter_map(|s| s.upload_mbps)),
        }
    }
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, samples: &[Sample]) -> crate::Result<Self::Output>;
}

/// Summarize a sample log. Fails on an empty log or a log without any signal reading.
pub fn summarize(samples: &[Sample]) -> crate::Result<Summary> {
    SummaryAnalyzer.analyze(samples)
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
