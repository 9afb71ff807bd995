use crate::command::run_tool;
use crate::finder::ToolFinder;
use crate::{Error, Result};
use airtrace_core::{ProbeFailure, ProbeKind, Throughput, ThroughputProbe};
use serde::Deserialize;

/// The parts of `speedtest-cli --json` output we use. Rates are bits per second.
#[derive(Debug, Deserialize)]
struct SpeedtestResult {
    download: f64,
    upload: f64,
}

/// Throughput probe backed by `speedtest-cli`.
pub struct SpeedtestCli {
    finder: ToolFinder,
    secure: bool,
}

impl SpeedtestCli {
    pub fn new() -> Self {
        Self {
            finder: ToolFinder::new("speedtest-cli"),
            secure: true,
        }
    }

    pub fn run(&self) -> Result<Throughput> {
        let speedtest = self.finder.find()?;
        let mut args = vec!["--json".to_string()];
        if self.secure {
            args.push("--secure".to_string());
        }

        tracing::info!("Running speedtest-cli, this can take a while");
        let output = run_tool(&speedtest, &args)?;
        parse_speedtest_output(&output)
    }
}

impl Default for SpeedtestCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ThroughputProbe for SpeedtestCli {
    fn measure(&self) -> std::result::Result<Throughput, ProbeFailure> {
        self.run().map_err(|e| e.into_failure(ProbeKind::Throughput))
    }
}

/// Convert `speedtest-cli --json` output to Mbps.
pub fn parse_speedtest_output(output: &str) -> Result<Throughput> {
    let result: SpeedtestResult =
        serde_json::from_str(output.trim()).map_err(|e| Error::Unparseable {
            tool: "speedtest-cli".to_string(),
            reason: e.to_string(),
        })?;

    Ok(Throughput {
        download_mbps: to_mbps(result.download),
        upload_mbps: to_mbps(result.upload),
    })
}

fn to_mbps(bits_per_sec: f64) -> Option<f64> {
    if bits_per_sec.is_finite() && bits_per_sec >= 0.0 {
        Some(bits_per_sec / 1_000_000.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_speedtest_json() {
        let output = r#"{"download": 93250000.0, "upload": 11500000.0, "ping": 14.2,
            "server": {"name": "Example"}, "timestamp": "2024-05-04T14:00:00Z"}"#;

        let throughput = parse_speedtest_output(output).unwrap();
        assert_eq!(throughput.download_mbps, Some(93.25));
        assert_eq!(throughput.upload_mbps, Some(11.5));
    }

    #[test]
    fn test_parse_speedtest_rejects_non_json() {
        let output = "ERROR: Unable to connect to servers to test latency.";
        assert!(matches!(
            parse_speedtest_output(output),
            Err(Error::Unparseable { .. })
        ));
    }
}
