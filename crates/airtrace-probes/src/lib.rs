//! Concrete probes that read link state, latency and throughput from the host OS.

mod command;
mod error;
mod finder;
pub mod link;
mod ping;
mod speedtest;

pub use error::{Error, Result};
pub use finder::ToolFinder;
pub use link::{AirportLinkProvider, NetshLinkProvider, NmcliLinkProvider, SystemLinkProvider};
pub use ping::{SystemPing, parse_ping_output};
pub use speedtest::{SpeedtestCli, parse_speedtest_output};
