use super::{band_from_channel, parse_key_values};
use crate::command::run_tool;
use crate::finder::ToolFinder;
use crate::{Error, Result};
use airtrace_core::{LinkInfo, LinkInfoProvider, ProbeFailure, ProbeKind, UNKNOWN};
use std::path::PathBuf;

const AIRPORT_PATH: &str = "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

/// Apple `airport -I` backend (macOS). Signal is RSSI in dBm.
pub struct AirportLinkProvider {
    finder: ToolFinder,
}

impl AirportLinkProvider {
    pub fn new() -> Self {
        Self {
            finder: ToolFinder::new("airport").with_fallbacks(vec![PathBuf::from(AIRPORT_PATH)]),
        }
    }

    pub fn read(&self) -> Result<LinkInfo> {
        let airport = self.finder.find()?;
        let output = run_tool(&airport, &["-I".to_string()])?;
        parse_airport_output(&output)
    }
}

impl Default for AirportLinkProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkInfoProvider for AirportLinkProvider {
    fn query(&self) -> std::result::Result<LinkInfo, ProbeFailure> {
        self.read().map_err(|e| e.into_failure(ProbeKind::LinkInfo))
    }
}

pub fn parse_airport_output(output: &str) -> Result<LinkInfo> {
    if output.contains("AirPort: Off") {
        return Err(Error::NotConnected);
    }

    let values = parse_key_values(output);
    let signal = values
        .get("agrctlrssi")
        .and_then(|s| s.parse::<i32>().ok());

    if signal.is_none() && !values.contains_key("ssid") {
        return Err(Error::Unparseable {
            tool: "airport".to_string(),
            reason: "neither SSID nor RSSI present".to_string(),
        });
    }
    if values.get("state").is_some_and(|s| s == "init") {
        return Err(Error::NotConnected);
    }

    // "149,80" is primary channel then width.
    let frequency = values
        .get("channel")
        .and_then(|c| c.split(',').next())
        .and_then(|c| c.trim().parse::<u32>().ok())
        .map(band_from_channel)
        .unwrap_or_else(|| UNKNOWN.to_string());

    Ok(LinkInfo {
        ssid: values.get("ssid").cloned().unwrap_or_default(),
        bssid: values.get("bssid").cloned().unwrap_or_default(),
        signal,
        frequency,
    }
    .normalized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_airport_info() {
        let output = "     agrCtlRSSI: -52
     agrExtRSSI: 0
    agrCtlNoise: -90
          state: running
        op mode: station
     lastTxRate: 585
        maxRate: 1300
          BSSID: f0:9f:c2:aa:bb:cc
           SSID: Studio
            MCS: 7
        channel: 149,80
";

        let link = parse_airport_output(output).unwrap();
        assert_eq!(link.ssid, "Studio");
        assert_eq!(link.bssid, "f0:9f:c2:aa:bb:cc");
        assert_eq!(link.signal, Some(-52));
        assert_eq!(link.frequency, "5 GHz");
    }

    #[test]
    fn test_airport_off() {
        assert!(matches!(
            parse_airport_output("AirPort: Off\n"),
            Err(Error::NotConnected)
        ));
    }
}
