use super::{band_from_channel, parse_key_values};
use crate::command::run_tool;
use crate::finder::ToolFinder;
use crate::{Error, Result};
use airtrace_core::{LinkInfo, LinkInfoProvider, ProbeFailure, ProbeKind, UNKNOWN};

/// `netsh wlan` backend (Windows). Signal is a percentage.
pub struct NetshLinkProvider {
    finder: ToolFinder,
}

impl NetshLinkProvider {
    pub fn new() -> Self {
        Self {
            finder: ToolFinder::new("netsh"),
        }
    }

    pub fn read(&self) -> Result<LinkInfo> {
        let netsh = self.finder.find()?;
        let args: Vec<String> = ["wlan", "show", "interfaces"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = run_tool(&netsh, &args)?;
        parse_netsh_output(&output)
    }
}

impl Default for NetshLinkProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkInfoProvider for NetshLinkProvider {
    fn query(&self) -> std::result::Result<LinkInfo, ProbeFailure> {
        self.read().map_err(|e| e.into_failure(ProbeKind::LinkInfo))
    }
}

/// Parse `netsh wlan show interfaces` output for the first interface.
pub fn parse_netsh_output(output: &str) -> Result<LinkInfo> {
    let values = parse_key_values(output);

    if values.is_empty() {
        return Err(Error::Unparseable {
            tool: "netsh".to_string(),
            reason: "no interface details found".to_string(),
        });
    }

    if let Some(state) = values.get("state")
        && !state.eq_ignore_ascii_case("connected")
    {
        return Err(Error::NotConnected);
    }

    let ssid = values.get("ssid").cloned().unwrap_or_default();
    // Newer builds label the field "AP BSSID".
    let bssid = values
        .get("bssid")
        .or_else(|| values.get("ap bssid"))
        .cloned()
        .unwrap_or_default();
    let signal = values
        .get("signal")
        .and_then(|s| s.trim_end_matches('%').trim().parse::<i32>().ok());
    let frequency = values.get("band").cloned().unwrap_or_else(|| {
        values
            .get("channel")
            .and_then(|c| c.parse::<u32>().ok())
            .map(band_from_channel)
            .unwrap_or_else(|| UNKNOWN.to_string())
    });

    Ok(LinkInfo {
        ssid,
        bssid,
        signal,
        frequency,
    }
    .normalized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_connected_interface() {
        let output = r#"
There is 1 interface on the system:

    Name                   : Wi-Fi
    Description            : Intel(R) Wi-Fi 6 AX201 160MHz
    State                  : connected
    SSID                   : CoffeeShop
    BSSID                  : 3c:84:6a:12:34:56
    Network type           : Infrastructure
    Radio type             : 802.11ax
    Channel                : 44
    Receive rate (Mbps)    : 573.5
    Signal                 : 88%
"#;

        let link = parse_netsh_output(output).unwrap();
        assert_eq!(link.ssid, "CoffeeShop");
        assert_eq!(link.bssid, "3c:84:6a:12:34:56");
        assert_eq!(link.signal, Some(88));
        assert_eq!(link.frequency, "5 GHz");
    }

    #[test]
    fn test_prefers_reported_band_and_ap_bssid() {
        let output = "    State : connected
    SSID : Lab
    AP BSSID : 00:11:22:33:44:55
    Band : 6 GHz
    Signal : 41%
";

        let link = parse_netsh_output(output).unwrap();
        assert_eq!(link.bssid, "00:11:22:33:44:55");
        assert_eq!(link.frequency, "6 GHz");
        assert_eq!(link.signal, Some(41));
    }

    #[test]
    fn test_disconnected_interface() {
        let output = "    Name : Wi-Fi\n    State : disconnected\n";
        assert!(matches!(
            parse_netsh_output(output),
            Err(Error::NotConnected)
        ));
    }
}
