//! Session lifecycle and the per-tick sampling action.
//!
//! The controller owns no thread and never sleeps. The host calls [`TrackingController::tick`],
//! waits for the returned gap, and calls it again; stopping takes effect before the next tick.

use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::probe::{LatencyProbe, LinkInfoProvider, ProbeFailure, ThroughputProbe};
use crate::sample::{LinkInfo, Sample, Throughput};
use crate::session::{Session, SessionState};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::time::Duration;

/// Result of one [`TrackingController::tick`] invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The session is not tracking; nothing was recorded.
    Idle,
    /// One sample was appended. Re-invoke after at least `wait`.
    Sampled {
        sample: Sample,
        wait: Duration,
        warnings: Vec<ProbeFailure>,
    },
}

impl TickOutcome {
    pub fn sample(&self) -> Option<&Sample> {
        match self {
            TickOutcome::Idle => None,
            TickOutcome::Sampled { sample, .. } => Some(sample),
        }
    }
}

/// Result of an explicit, user-triggered throughput measurement.
///
/// It is not recorded in the session log; `measured_at` lets the caller line
/// it up with recorded samples if it wants to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputCheck {
    pub measured_at: NaiveDateTime,
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
    pub warning: Option<ProbeFailure>,
}

pub struct TrackingController<L, P, T, C = SystemClock> {
    link: L,
    latency: P,
    throughput: T,
    clock: C,
    config: TrackerConfig,
}

impl<L, P, T> TrackingController<L, P, T, SystemClock>
where
    L: LinkInfoProvider,
    P: LatencyProbe,
    T: ThroughputProbe,
{
    pub fn new(link: L, latency: P, throughput: T, config: TrackerConfig) -> Self {
        Self {
            link,
            latency,
            throughput,
            clock: SystemClock,
            config,
        }
    }
}

impl<L, P, T, C> TrackingController<L, P, T, C>
where
    L: LinkInfoProvider,
    P: LatencyProbe,
    T: ThroughputProbe,
    C: Clock,
{
    /// Replace the clock, mostly for tests.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> TrackingController<L, P, T, C2> {
        TrackingController {
            link: self.link,
            latency: self.latency,
            throughput: self.throughput,
            clock,
            config: self.config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Idle -> Tracking. Returns `false` (and changes nothing) if already tracking.
    pub fn start(&self, session: &mut Session, location: &str) -> bool {
        if session.is_tracking() {
            tracing::debug!("start ignored: session already tracking");
            return false;
        }

        if location.trim().is_empty() {
            session.set_location(self.config.default_location.clone());
        } else {
            session.set_location(location);
        }
        session.state = SessionState::Tracking;
        session.next_tick_at = Some(self.clock.now());

        tracing::info!(
            "Tracking started at '{}' (every {}s)",
            session.location_label(),
            self.config.interval.as_secs_f64()
        );
        true
    }

    /// Tracking -> Idle. Returns `false` if already idle. The log is kept.
    pub fn stop(&self, session: &mut Session) -> bool {
        if !session.is_tracking() {
            tracing::debug!("stop ignored: session already idle");
            return false;
        }

        session.state = SessionState::Idle;
        session.next_tick_at = None;

        tracing::info!("Tracking stopped with {} samples", session.len());
        true
    }

    /// Take one sample if the session is tracking. Appends at most one sample.
    pub fn tick(&self, session: &mut Session) -> TickOutcome {
        if !session.is_tracking() {
            return TickOutcome::Idle;
        }

        let (sample, warnings) = self.take_reading(session.location_label());
        session.recorder.append(sample.clone());

        // The gap starts after the probes return, so slow probes stretch the period.
        session.next_tick_at = Some(self.clock.now() + to_chrono(self.config.interval));

        TickOutcome::Sampled {
            sample,
            wait: self.config.interval,
            warnings,
        }
    }

    /// Query link info and latency once, without recording anything.
    pub fn take_reading(&self, location: &str) -> (Sample, Vec<ProbeFailure>) {
        let timestamp = self.clock.now();
        let mut warnings = Vec::new();

        let link = match self.link.query() {
            Ok(link) => link,
            Err(failure) => {
                tracing::warn!("{}", failure);
                warnings.push(failure);
                LinkInfo::unknown()
            }
        };

        let latency_ms = match self.latency.ping(&self.config.latency_host) {
            Ok(ms) => Some(ms),
            Err(failure) => {
                tracing::warn!("{}", failure);
                warnings.push(failure);
                None
            }
        };

        (
            Sample::from_readings(timestamp, location, link, latency_ms),
            warnings,
        )
    }

    /// Run the throughput probe synchronously. Nothing is appended to any log.
    pub fn run_throughput_check(&self) -> ThroughputCheck {
        let measured_at = self.clock.now();
        tracing::info!("Running throughput check");

        let (throughput, warning) = match self.throughput.measure() {
            Ok(throughput) => (throughput, None),
            Err(failure) => {
                tracing::warn!("{}", failure);
                (Throughput::unavailable(), Some(failure))
            }
        };

        ThroughputCheck {
            measured_at,
            download_mbps: throughput.download_mbps,
            upload_mbps: throughput.upload_mbps,
            warning,
        }
    }
}

fn to_chrono(interval: Duration) -> chrono::Duration {
    chrono::Duration::from_std(interval).unwrap_or_else(|_| chrono::Duration::zero())
}
