use super::band_from_mhz;
use crate::command::run_tool;
use crate::finder::ToolFinder;
use crate::{Error, Result};
use airtrace_core::{LinkInfo, LinkInfoProvider, ProbeFailure, ProbeKind};

const FIELDS: &str = "ACTIVE,SSID,BSSID,SIGNAL,FREQ";

/// NetworkManager backend (Linux). Signal is a percentage.
pub struct NmcliLinkProvider {
    finder: ToolFinder,
}

impl NmcliLinkProvider {
    pub fn new() -> Self {
        Self {
            finder: ToolFinder::new("nmcli"),
        }
    }

    pub fn read(&self) -> Result<LinkInfo> {
        let nmcli = self.finder.find()?;
        let args: Vec<String> = ["-t", "-f", FIELDS, "device", "wifi", "list"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let output = run_tool(&nmcli, &args)?;
        parse_nmcli_output(&output)
    }
}

impl Default for NmcliLinkProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkInfoProvider for NmcliLinkProvider {
    fn query(&self) -> std::result::Result<LinkInfo, ProbeFailure> {
        self.read().map_err(|e| e.into_failure(ProbeKind::LinkInfo))
    }
}

/// Parse terse `nmcli -t -f ACTIVE,SSID,BSSID,SIGNAL,FREQ device wifi list` output,
/// returning the active access point.
pub fn parse_nmcli_output(output: &str) -> Result<LinkInfo> {
    for line in output.lines() {
        let fields = split_terse(line);
        if fields.len() < 5 {
            continue;
        }
        if fields[0] != "yes" {
            continue;
        }

        let signal = fields[3].trim().parse::<i32>().ok();
        let frequency = fields[4]
            .split_whitespace()
            .next()
            .and_then(|mhz| mhz.parse::<u32>().ok())
            .map(band_from_mhz)
            .unwrap_or_default();

        return Ok(LinkInfo {
            ssid: fields[1].clone(),
            bssid: fields[2].clone(),
            signal,
            frequency,
        }
        .normalized());
    }

    if output.trim().is_empty() || output.lines().all(|l| split_terse(l).len() >= 5) {
        return Err(Error::NotConnected);
    }

    Err(Error::Unparseable {
        tool: "nmcli".to_string(),
        reason: "unexpected field layout".to_string(),
    })
}

/// Split a terse nmcli line on `:`, honouring `\:` and `\\` escapes.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: &str = "\
no:Neighbour:11\\:22\\:33\\:44\\:55\\:66:35:2412 MHz
yes:Home Net:AA\\:BB\\:CC\\:DD\\:EE\\:FF:72:5180 MHz
no::77\\:88\\:99\\:AA\\:BB\\:CC:20:2437 MHz
";

    #[test]
    fn test_parses_active_access_point() {
        let link = parse_nmcli_output(OUTPUT).unwrap();
        assert_eq!(link.ssid, "Home Net");
        assert_eq!(link.bssid, "AA:BB:CC:DD:EE:FF");
        assert_eq!(link.signal, Some(72));
        assert_eq!(link.frequency, "5 GHz");
    }

    #[test]
    fn test_no_active_line_means_not_connected() {
        let output = "no:Neighbour:11\\:22\\:33\\:44\\:55\\:66:35:2412 MHz\n";
        assert!(matches!(
            parse_nmcli_output(output),
            Err(Error::NotConnected)
        ));
        assert!(matches!(parse_nmcli_output(""), Err(Error::NotConnected)));
    }

    #[test]
    fn test_garbage_is_unparseable() {
        assert!(matches!(
            parse_nmcli_output("Error: NetworkManager is not running."),
            Err(Error::Unparseable { .. })
        ));
    }

    #[test]
    fn test_split_terse_handles_escapes() {
        assert_eq!(
            split_terse("yes:a\\:b:c\\\\d"),
            vec!["yes".to_string(), "a:b".to_string(), "c\\d".to_string()]
        );
    }
}
