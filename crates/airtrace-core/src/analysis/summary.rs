use super::{Analyzer, Averages, Summary};
use crate::sample::Sample;
use crate::{Error, Result};

pub struct SummaryAnalyzer;

impl Analyzer for SummaryAnalyzer {
    type Output = Summary;

    fn analyze(&self, samples: &[Sample]) -> Result<Self::Output> {
        tracing::debug!("Summarizing {} samples", samples.len());

        if samples.is_empty() {
            return Err(Error::EmptyLog);
        }

        let mut best: Option<(&Sample, i32)> = None;
        let mut worst: Option<(&Sample, i32)> = None;

        // Strict comparisons keep the earliest sample on ties.
        for sample in samples {
            let Some(signal) = sample.signal else {
                continue;
            };
            if best.is_none_or(|(_, b)| signal > b) {
                best = Some((sample, signal));
            }
            if worst.is_none_or(|(_, w)| signal < w) {
                worst = Some((sample, signal));
            }
        }

        let (Some((best, _)), Some((worst, _))) = (best, worst) else {
            tracing::warn!("No signal readings among {} samples", samples.len());
            return Err(Error::NoSignalData);
        };

        let averages = Averages::from_samples(samples);

        tracing::info!(
            "Summary complete: {} samples, best signal {:?}, worst signal {:?}",
            samples.len(),
            best.signal,
            worst.signal
        );

        Ok(Summary {
            sample_count: samples.len(),
            best: best.clone(),
            worst: worst.clone(),
            averages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::LinkInfo;
    use chrono::NaiveDate;

    fn sample(second: u32, signal: Option<i32>, latency: Option<f64>) -> Sample {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(11, 0, second)
            .unwrap();
        let link = LinkInfo {
            ssid: "Home".to_string(),
            bssid: format!("00:00:00:00:00:{:02}", second),
            signal,
            frequency: "2.4 GHz".to_string(),
        };
        Sample::from_readings(ts, "Lounge", link, latency)
    }

    #[test]
    fn test_empty_log_fails() {
        let result = SummaryAnalyzer.analyze(&[]);
        assert!(matches!(result, Err(Error::EmptyLog)));
    }

    #[test]
    fn test_all_null_signal_fails() {
        let log = vec![sample(0, None, Some(10.0)), sample(3, None, None)];
        let result = SummaryAnalyzer.analyze(&log);
        assert!(matches!(result, Err(Error::NoSignalData)));
    }

    #[test]
    fn test_unique_extremes() {
        let log = vec![
            sample(0, Some(-55), None),
            sample(3, Some(-30), None),
            sample(6, Some(-80), None),
            sample(9, None, None),
        ];

        let summary = SummaryAnalyzer.analyze(&log).unwrap();
        assert_eq!(summary.best, log[1]);
        assert_eq!(summary.worst, log[2]);
        assert_eq!(summary.sample_count, 4);
    }

    #[test]
    fn test_ties_resolve_to_earliest_sample() {
        let log = vec![
            sample(0, Some(-50), None),
            sample(3, Some(-40), None),
            sample(6, Some(-40), None),
            sample(9, Some(-50), None),
        ];

        let summary = SummaryAnalyzer.analyze(&log).unwrap();
        assert_eq!(summary.best.timestamp, log[1].timestamp);
        assert_eq!(summary.worst.timestamp, log[0].timestamp);
    }

    #[test]
    fn test_two_samples_with_null_latency() {
        let log = vec![sample(0, Some(-30), Some(10.0)), sample(3, Some(-60), None)];

        let summary = SummaryAnalyzer.analyze(&log).unwrap();
        assert_eq!(summary.best.signal, Some(-30));
        assert_eq!(summary.worst.signal, Some(-60));
        assert_eq!(summary.averages.latency_ms, Some(10.0));
        assert_eq!(summary.averages.signal, Some(-45.0));
    }

    #[test]
    fn test_averages_skip_nulls() {
        let log = vec![
            sample(0, Some(-40), Some(10.0)),
            sample(3, Some(-40), None),
            sample(6, Some(-40), Some(30.0)),
        ];

        let averages = Averages::from_samples(&log);
        assert_eq!(averages.latency_ms, Some(20.0));
    }

    #[test]
    fn test_field_without_values_is_undefined_not_zero() {
        let log = vec![sample(0, Some(-40), Some(0.0))];

        let averages = Averages::from_samples(&log);
        assert_eq!(averages.latency_ms, Some(0.0));
        assert_eq!(averages.download_mbps, None);
        assert_eq!(averages.upload_mbps, None);
    }
}
