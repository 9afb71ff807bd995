use super::{COLUMNS, TIME_FORMAT, escape_field};
use crate::Result;
use crate::sample::Sample;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct ReportWriter;

impl ReportWriter {
    /// Render the report as a CSV string with a header row.
    pub fn to_string(samples: &[Sample]) -> String {
        tracing::debug!("Rendering report with {} rows", samples.len());

        let mut output = String::new();
        output.push_str(&COLUMNS.join(","));
        output.push('\n');

        for sample in samples {
            let cells = [
                sample.timestamp.format(TIME_FORMAT).to_string(),
                escape_field(&sample.location),
                escape_field(&sample.ssid),
                escape_field(&sample.bssid),
                optional(sample.signal),
                optional(sample.latency_ms),
                optional(sample.download_mbps),
                optional(sample.upload_mbps),
            ];
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }

    pub fn to_bytes(samples: &[Sample]) -> Vec<u8> {
        Self::to_string(samples).into_bytes()
    }

    /// Write the report to a file, replacing it if it exists.
    pub fn to_file(samples: &[Sample], path: &Path) -> Result<()> {
        tracing::debug!("Writing report to: {}", path.display());

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&Self::to_bytes(samples))?;
        writer.flush()?;

        tracing::info!(
            "Successfully wrote report with {} samples to {}",
            samples.len(),
            path.display()
        );

        Ok(())
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
