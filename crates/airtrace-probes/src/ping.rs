use crate::command::run_tool;
use crate::finder::ToolFinder;
use crate::{Error, Result};
use airtrace_core::{LatencyProbe, ProbeFailure, ProbeKind};
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

lazy_static! {
    // Matches "time=12.3 ms", "time=12 ms", "time<1ms" and "time=0,45 ms".
    static ref RTT_PATTERN: Regex =
        Regex::new(r"(?i)time\s*[=<]\s*([0-9]+(?:[.,][0-9]+)?)\s*ms").unwrap();
}

/// Latency probe backed by the operating system's `ping`.
pub struct SystemPing {
    finder: ToolFinder,
    timeout: Duration,
}

impl SystemPing {
    pub fn new(timeout: Duration) -> Self {
        Self {
            finder: ToolFinder::new("ping"),
            timeout,
        }
    }

    /// Send a single echo request and return the round-trip time in ms.
    pub fn measure(&self, host: &str) -> Result<f64> {
        let ping = self.finder.find()?;
        let output = run_tool(&ping, &self.build_args(host))?;
        parse_ping_output(&output)
    }

    /// Arguments for one echo request with a reply timeout.
    fn build_args(&self, host: &str) -> Vec<String> {
        let secs = self.timeout.as_secs().max(1);

        let mut args = if cfg!(target_os = "windows") {
            vec![
                "-n".to_string(),
                "1".to_string(),
                "-w".to_string(),
                (secs * 1000).to_string(),
            ]
        } else if cfg!(target_os = "macos") {
            vec![
                "-c".to_string(),
                "1".to_string(),
                "-t".to_string(),
                secs.to_string(),
            ]
        } else {
            vec![
                "-c".to_string(),
                "1".to_string(),
                "-W".to_string(),
                secs.to_string(),
            ]
        };
        args.push(host.to_string());
        args
    }
}

impl Default for SystemPing {
    fn default() -> Self {
        Self::new(Duration::from_secs(airtrace_core::config::DEFAULT_PING_TIMEOUT_SECS))
    }
}

impl LatencyProbe for SystemPing {
    fn ping(&self, host: &str) -> std::result::Result<f64, ProbeFailure> {
        self.measure(host).map_err(|e| e.into_failure(ProbeKind::Latency))
    }
}

/// Extract the round-trip time of the first reply from `ping` output.
pub fn parse_ping_output(output: &str) -> Result<f64> {
    let captures = RTT_PATTERN
        .captures(output)
        .ok_or_else(|| Error::Unparseable {
            tool: "ping".to_string(),
            reason: "no reply time in output".to_string(),
        })?;

    captures[1]
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| Error::Unparseable {
            tool: "ping".to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_linux_output() {
        let output = "PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=12.3 ms

--- 8.8.8.8 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
rtt min/avg/max/mdev = 12.345/12.345/12.345/0.000 ms
";
        assert_eq!(parse_ping_output(output).unwrap(), 12.3);
    }

    #[test]
    fn test_parse_windows_output() {
        let output = "Pinging 8.8.8.8 with 32 bytes of data:
Reply from 8.8.8.8: bytes=32 time=17ms TTL=117
";
        assert_eq!(parse_ping_output(output).unwrap(), 17.0);

        let fast = "Reply from 192.168.1.1: bytes=32 time<1ms TTL=64\n";
        assert_eq!(parse_ping_output(fast).unwrap(), 1.0);
    }

    #[test]
    fn test_parse_decimal_comma() {
        let output = "64 bytes from 1.1.1.1: icmp_seq=1 ttl=57 time=0,45 ms\n";
        assert_eq!(parse_ping_output(output).unwrap(), 0.45);
    }

    #[test]
    fn test_timeout_output_is_unparseable() {
        let output = "PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.

--- 10.255.255.1 ping statistics ---
1 packets transmitted, 0 received, 100% packet loss, time 0ms
";
        assert!(matches!(
            parse_ping_output(output),
            Err(Error::Unparseable { .. })
        ));
    }

    #[test]
    fn test_build_args_ends_with_host() {
        let ping = SystemPing::new(Duration::from_secs(2));
        let args = ping.build_args("8.8.8.8");

        assert_eq!(args.last().unwrap(), "8.8.8.8");
        assert!(args.contains(&"1".to_string()));
    }
}
