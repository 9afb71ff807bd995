use crate::sample::Sample;

/// Append-only log of the samples taken during a session.
///
/// Insertion order is temporal order is display order. There is no way to
/// update or remove a recorded sample.
#[derive(Debug, Default, Clone)]
pub struct SampleRecorder {
    samples: Vec<Sample>,
}

impl SampleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample to the end of the log.
    pub fn append(&mut self, sample: Sample) {
        tracing::debug!(
            "Recording sample #{} at {} ({})",
            self.samples.len() + 1,
            sample.timestamp,
            sample.location
        );
        self.samples.push(sample);
    }

    /// Read-only view of everything recorded so far.
    pub fn snapshot(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::LinkInfo;
    use chrono::NaiveDate;

    fn sample_at(second: u32, location: &str) -> Sample {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, second)
            .unwrap();
        Sample::from_readings(ts, location, LinkInfo::unknown(), None)
    }

    #[test]
    fn test_append_preserves_order() {
        let mut recorder = SampleRecorder::new();
        recorder.append(sample_at(0, "first"));
        recorder.append(sample_at(3, "second"));
        recorder.append(sample_at(6, "third"));

        let locations: Vec<_> = recorder
            .snapshot()
            .iter()
            .map(|s| s.location.as_str())
            .collect();
        assert_eq!(locations, vec!["first", "second", "third"]);
        assert_eq!(recorder.last().unwrap().location, "third");
    }

    #[test]
    fn test_append_accepts_all_null_sample() {
        let mut recorder = SampleRecorder::new();
        assert!(recorder.is_empty());

        recorder.append(sample_at(0, "Unknown"));
        assert_eq!(recorder.len(), 1);
    }
}
