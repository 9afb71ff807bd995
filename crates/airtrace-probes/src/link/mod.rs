//! Wireless link metadata from the platform's own tooling.
//!
//! Signal units differ per backend: `nmcli` and `netsh` report a percentage,
//! `airport` reports RSSI in dBm. Values are passed through unconverted.

mod airport;
mod netsh;
mod nmcli;

pub use airport::AirportLinkProvider;
pub use netsh::NetshLinkProvider;
pub use nmcli::NmcliLinkProvider;

use airtrace_core::{LinkInfo, LinkInfoProvider, ProbeFailure};
use std::collections::HashMap;

/// The link provider for the platform this binary was built for.
pub enum SystemLinkProvider {
    Nmcli(NmcliLinkProvider),
    Netsh(NetshLinkProvider),
    Airport(AirportLinkProvider),
    Unsupported,
}

impl SystemLinkProvider {
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") {
            SystemLinkProvider::Nmcli(NmcliLinkProvider::new())
        } else if cfg!(target_os = "windows") {
            SystemLinkProvider::Netsh(NetshLinkProvider::new())
        } else if cfg!(target_os = "macos") {
            SystemLinkProvider::Airport(AirportLinkProvider::new())
        } else {
            SystemLinkProvider::Unsupported
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            SystemLinkProvider::Nmcli(_) => "nmcli",
            SystemLinkProvider::Netsh(_) => "netsh",
            SystemLinkProvider::Airport(_) => "airport",
            SystemLinkProvider::Unsupported => "none",
        }
    }
}

impl LinkInfoProvider for SystemLinkProvider {
    fn query(&self) -> Result<LinkInfo, ProbeFailure> {
        match self {
            SystemLinkProvider::Nmcli(p) => p.query(),
            SystemLinkProvider::Netsh(p) => p.query(),
            SystemLinkProvider::Airport(p) => p.query(),
            SystemLinkProvider::Unsupported => Err(ProbeFailure::new(
                airtrace_core::ProbeKind::LinkInfo,
                "no link-info backend for this platform",
            )),
        }
    }
}

/// Band descriptor for a centre frequency in MHz.
pub(crate) fn band_from_mhz(mhz: u32) -> String {
    match mhz {
        2400..=2500 => "2.4 GHz".to_string(),
        4900..=5924 => "5 GHz".to_string(),
        5925..=7125 => "6 GHz".to_string(),
        _ => format!("{} MHz", mhz),
    }
}

/// Band descriptor for a channel number, when no frequency is reported.
pub(crate) fn band_from_channel(channel: u32) -> String {
    match channel {
        1..=14 => "2.4 GHz".to_string(),
        32..=177 => "5 GHz".to_string(),
        _ => format!("channel {}", channel),
    }
}

/// Parse `key : value` lines, keyed by the lower-cased key.
///
/// Only the first colon separates key from value, so MAC addresses survive.
pub(crate) fn parse_key_values(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_from_mhz() {
        assert_eq!(band_from_mhz(2437), "2.4 GHz");
        assert_eq!(band_from_mhz(5180), "5 GHz");
        assert_eq!(band_from_mhz(5955), "6 GHz");
        assert_eq!(band_from_mhz(60480), "60480 MHz");
    }

    #[test]
    fn test_band_from_channel() {
        assert_eq!(band_from_channel(6), "2.4 GHz");
        assert_eq!(band_from_channel(149), "5 GHz");
        assert_eq!(band_from_channel(0), "channel 0");
    }

    #[test]
    fn test_parse_key_values_keeps_mac() {
        let values = parse_key_values("    BSSID   : aa:bb:cc:dd:ee:ff\n  Signal : 80%\n");
        assert_eq!(values.get("bssid").unwrap(), "aa:bb:cc:dd:ee:ff");
        assert_eq!(values.get("signal").unwrap(), "80%");
    }
}
