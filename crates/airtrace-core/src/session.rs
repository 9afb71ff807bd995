use crate::recorder::SampleRecorder;
use crate::sample::{Sample, UNKNOWN};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Tracking,
}

/// A tracking session: lifecycle state plus its sample log.
///
/// The hosting layer owns the session and hands it to the
/// [`crate::TrackingController`] on every operation. The log survives
/// start/stop cycles and is only lost with the session itself.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) state: SessionState,
    pub(crate) recorder: SampleRecorder,
    pub(crate) location_label: String,
    pub(crate) next_tick_at: Option<NaiveDateTime>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            recorder: SampleRecorder::new(),
            location_label: UNKNOWN.to_string(),
            next_tick_at: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == SessionState::Tracking
    }

    /// Label applied to samples taken from now on.
    pub fn location_label(&self) -> &str {
        &self.location_label
    }

    /// Change the label for future samples. Already recorded samples keep theirs.
    pub fn set_location(&mut self, label: impl Into<String>) {
        let label = label.into();
        self.location_label = if label.trim().is_empty() {
            UNKNOWN.to_string()
        } else {
            label
        };
        tracing::debug!("Location label set to '{}'", self.location_label);
    }

    /// When the next tick is due, if tracking.
    pub fn next_tick_at(&self) -> Option<NaiveDateTime> {
        self.next_tick_at
    }

    /// Remaining wait until the next tick is due. Zero when overdue, `None` when idle.
    pub fn time_until_next_tick(&self, now: NaiveDateTime) -> Option<Duration> {
        let due = self.next_tick_at?;
        Some((due - now).to_std().unwrap_or(Duration::ZERO))
    }

    pub fn snapshot(&self) -> &[Sample] {
        self.recorder.snapshot()
    }

    pub fn recorder(&self) -> &SampleRecorder {
        &self.recorder
    }

    pub fn len(&self) -> usize {
        self.recorder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorder.is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.is_empty());
        assert_eq!(session.location_label(), UNKNOWN);
        assert!(session.next_tick_at().is_none());
    }

    #[test]
    fn test_blank_location_falls_back_to_unknown() {
        let mut session = Session::new();
        session.set_location("Kitchen");
        assert_eq!(session.location_label(), "Kitchen");

        session.set_location("   ");
        assert_eq!(session.location_label(), UNKNOWN);
    }

    #[test]
    fn test_time_until_next_tick_saturates_at_zero() {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 10)
            .unwrap();
        let mut session = Session::new();
        assert_eq!(session.time_until_next_tick(now), None);

        session.next_tick_at = Some(now + chrono::Duration::seconds(3));
        assert_eq!(
            session.time_until_next_tick(now),
            Some(Duration::from_secs(3))
        );

        session.next_tick_at = Some(now - chrono::Duration::seconds(5));
        assert_eq!(session.time_until_next_tick(now), Some(Duration::ZERO));
    }
}
