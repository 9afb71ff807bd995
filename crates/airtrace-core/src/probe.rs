//! Contracts for the external data sources the controller samples.
//!
//! Implementations report failure through [`ProbeFailure`]; the
//! [`crate::TrackingController`] turns every failure into Unknown/null fields
//! and a warning, so a failing probe never interrupts tracking.

use crate::sample::{LinkInfo, Throughput};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbeKind {
    LinkInfo,
    Latency,
    Throughput,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeKind::LinkInfo => "link info",
            ProbeKind::Latency => "latency",
            ProbeKind::Throughput => "throughput",
        };
        f.write_str(name)
    }
}

/// A probe could not produce a reading this time.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{probe} unavailable: {message}")]
pub struct ProbeFailure {
    pub probe: ProbeKind,
    pub message: String,
}

impl ProbeFailure {
    pub fn new(probe: ProbeKind, message: impl Into<String>) -> Self {
        Self {
            probe,
            message: message.into(),
        }
    }
}

/// Current wireless link metadata from the OS.
pub trait LinkInfoProvider {
    fn query(&self) -> Result<LinkInfo, ProbeFailure>;
}

/// Round-trip time to a reference host, in milliseconds.
pub trait LatencyProbe {
    fn ping(&self, host: &str) -> Result<f64, ProbeFailure>;
}

/// On-demand download/upload measurement.
pub trait ThroughputProbe {
    fn measure(&self) -> Result<Throughput, ProbeFailure>;
}

impl<T: LinkInfoProvider + ?Sized> LinkInfoProvider for Box<T> {
    fn query(&self) -> Result<LinkInfo, ProbeFailure> {
        (**self).query()
    }
}

impl<T: LatencyProbe + ?Sized> LatencyProbe for Box<T> {
    fn ping(&self, host: &str) -> Result<f64, ProbeFailure> {
        (**self).ping(host)
    }
}

impl<T: ThroughputProbe + ?Sized> ThroughputProbe for Box<T> {
    fn measure(&self) -> Result<Throughput, ProbeFailure> {
        (**self).measure()
    }
}
