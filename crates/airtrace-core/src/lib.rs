pub mod analysis;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod probe;
pub mod recorder;
pub mod report;
pub mod sample;
pub mod session;

pub use analysis::{Summary, summarize};
pub use clock::{Clock, SystemClock};
pub use config::{Settings, TrackerConfig};
pub use controller::{ThroughputCheck, TickOutcome, TrackingController};
pub use error::{Error, Result};
pub use probe::{LatencyProbe, LinkInfoProvider, ProbeFailure, ProbeKind, ThroughputProbe};
pub use recorder::SampleRecorder;
pub use report::export;
pub use sample::{LinkInfo, Sample, Throughput, UNKNOWN};
pub use session::{Session, SessionState};
