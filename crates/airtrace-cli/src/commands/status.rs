use crate::OutputFormat;
use airtrace_core::{ProbeFailure, Sample, Settings};
use anyhow::Result;
use serde::Serialize;

/// A single reading that is shown but not recorded.
#[derive(Debug, Serialize)]
struct StatusReading<'a> {
    sample: &'a Sample,
    warnings: &'a [ProbeFailure],
}

pub fn execute(location: Option<String>, settings: &Settings, format: OutputFormat) -> Result<()> {
    let controller = super::system_controller(settings.tracker_config(), settings);
    let location = location.unwrap_or_else(|| settings.default_location.clone());

    let (sample, warnings) = controller.take_reading(&location);

    match format {
        OutputFormat::Json => {
            let reading = StatusReading {
                sample: &sample,
                warnings: &warnings,
            };
            println!("{}", serde_json::to_string_pretty(&reading)?);
        }
        OutputFormat::Table => {
            println!("Field,Value");
            println!("SSID,{}", sample.ssid);
            println!("BSSID,{}", sample.bssid);
            println!("Signal,{}", sample.signal.map(|s| s.to_string()).unwrap_or_default());
            println!("Frequency,{}", sample.frequency);
            println!(
                "Latency (ms),{}",
                sample.latency_ms.map(|ms| ms.to_string()).unwrap_or_default()
            );
        }
        OutputFormat::Pretty => {
            use console::style;

            println!("{}", super::track::format_tick(&sample));
            for warning in &warnings {
                println!("  {} {}", style("warning:").yellow(), warning);
            }
        }
    }

    Ok(())
}
