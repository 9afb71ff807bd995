use super::{Analyzer, mean};
use crate::sample::Sample;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Aggregates for all samples sharing one location label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationStats {
    pub location: String,
    pub sample_count: usize,
    pub mean_signal: Option<f64>,
    pub min_signal: Option<i32>,
    pub max_signal: Option<i32>,
    pub mean_latency_ms: Option<f64>,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
}

/// Breaks a log down per location tag, in order of first appearance.
pub struct LocationAnalyzer;

impl Analyzer for LocationAnalyzer {
    type Output = Vec<LocationStats>;

    fn analyze(&self, samples: &[Sample]) -> Result<Self::Output> {
        tracing::debug!("Grouping {} samples by location", samples.len());

        if samples.is_empty() {
            return Err(Error::EmptyLog);
        }

        let mut order: Vec<&str> = Vec::new();
        for sample in samples {
            if !order.contains(&sample.location.as_str()) {
                order.push(&sample.location);
            }
        }

        let stats: Vec<LocationStats> = order
            .into_iter()
            .map(|location| {
                let group: Vec<&Sample> =
                    samples.iter().filter(|s| s.location == location).collect();
                let signals: Vec<i32> = group.iter().filter_map(|s| s.signal).collect();

                LocationStats {
                    location: location.to_string(),
                    sample_count: group.len(),
                    mean_signal: mean(signals.iter().map(|&v| f64::from(v))),
                    min_signal: signals.iter().copied().min(),
                    max_signal: signals.iter().copied().max(),
                    mean_latency_ms: mean(group.iter().filter_map(|s| s.latency_ms)),
                    first_seen: group[0].timestamp,
                    last_seen: group[group.len() - 1].timestamp,
                }
            })
            .collect();

        tracing::info!("Location breakdown complete: {} locations", stats.len());
        Ok(stats)
    }
}
