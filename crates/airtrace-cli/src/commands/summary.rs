use crate::OutputFormat;
use airtrace_core::analysis::{Analyzer, Averages, LocationAnalyzer, LocationStats};
use airtrace_core::report::ReportReader;
use airtrace_core::{Error, Sample, Summary, summarize};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Everything shown at the end of a survey.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyReport {
    pub sample_count: usize,
    /// `None` when no sample had a signal reading; best/worst are then shown as N/A.
    pub summary: Option<Summary>,
    pub averages: Averages,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<LocationStats>>,
}

/// Build the report for a sample log. Returns `None` for an empty log.
pub fn build_report(samples: &[Sample], by_location: bool) -> Result<Option<SurveyReport>> {
    let summary = match summarize(samples) {
        Ok(summary) => Some(summary),
        Err(Error::EmptyLog) => return Ok(None),
        Err(Error::NoSignalData) => None,
        Err(e) => return Err(e.into()),
    };

    let locations = if by_location {
        Some(LocationAnalyzer.analyze(samples)?)
    } else {
        None
    };

    Ok(Some(SurveyReport {
        sample_count: samples.len(),
        averages: summary
            .as_ref()
            .map(|s| s.averages)
            .unwrap_or_else(|| Averages::from_samples(samples)),
        summary,
        locations,
    }))
}

/// Summarize a previously exported report file.
pub fn summarize_file(file: &Path, by_location: bool) -> Result<Option<SurveyReport>> {
    tracing::debug!("Reading report file: {}", file.display());
    let samples = ReportReader::from_file(file)?;
    build_report(&samples, by_location)
}

pub fn execute(file: &Path, by_location: bool, format: OutputFormat) -> Result<()> {
    tracing::info!("Summarizing report: {}", file.display());

    let report = summarize_file(file, by_location)?;
    print!("{}", render(report.as_ref(), format)?);
    Ok(())
}

/// Render a report in the requested format.
pub fn render(report: Option<&SurveyReport>, format: OutputFormat) -> Result<String> {
    match (report, format) {
        (_, OutputFormat::Json) => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
        (None, _) => Ok("No samples recorded\n".to_string()),
        (Some(report), OutputFormat::Table) => Ok(format_table(report)),
        (Some(report), OutputFormat::Pretty) => Ok(format_pretty(report)),
    }
}

fn format_pretty(report: &SurveyReport) -> String {
    use console::style;

    let mut output = String::new();
    output.push_str(&format!("\n{}\n", style("Survey Summary").bold().cyan()));
    output.push_str(&format!("{}\n", style("==============").cyan()));
    output.push_str(&format!("\n  Samples:          {}\n", report.sample_count));

    match &report.summary {
        Some(summary) => {
            output.push_str(&format!("  Best:             {}\n", describe(&summary.best)));
            output.push_str(&format!("  Worst:            {}\n", describe(&summary.worst)));
        }
        None => {
            output.push_str("  Best:             N/A\n");
            output.push_str("  Worst:            N/A\n");
            output.push_str(&format!(
                "  {}\n",
                style("No signal readings were captured").yellow()
            ));
        }
    }

    let averages = &report.averages;
    output.push_str(&format!("\n{}\n", style("Averages:").bold()));
    output.push_str(&format!("  Signal:           {}\n", mean_or_na(averages.signal, "")));
    output.push_str(&format!(
        "  Latency:          {}\n",
        mean_or_na(averages.latency_ms, " ms")
    ));
    output.push_str(&format!(
        "  Download:         {}\n",
        mean_or_na(averages.download_mbps, " Mbps")
    ));
    output.push_str(&format!(
        "  Upload:           {}\n",
        mean_or_na(averages.upload_mbps, " Mbps")
    ));

    if let Some(locations) = &report.locations {
        output.push_str(&format!("\n{}\n", style("By Location:").bold()));
        for stats in locations {
            output.push_str(&format!(
                "  {:<20} {:>4} samples  signal {:<10} latency {}\n",
                stats.location,
                stats.sample_count,
                mean_or_na(stats.mean_signal, ""),
                mean_or_na(stats.mean_latency_ms, " ms"),
            ));
        }
    }

    output.push('\n');
    output
}

fn format_table(report: &SurveyReport) -> String {
    let mut output = String::new();
    output.push_str("Metric,Value\n");
    output.push_str(&format!("Samples,{}\n", report.sample_count));

    let (best, worst) = match &report.summary {
        Some(summary) => (
            summary.best.signal.map(|s| s.to_string()),
            summary.worst.signal.map(|s| s.to_string()),
        ),
        None => (None, None),
    };
    output.push_str(&format!("Best Signal,{}\n", best.as_deref().unwrap_or("N/A")));
    output.push_str(&format!("Worst Signal,{}\n", worst.as_deref().unwrap_or("N/A")));

    let averages = &report.averages;
    output.push_str(&format!("Mean Signal,{}\n", mean_or_na(averages.signal, "")));
    output.push_str(&format!("Mean Latency (ms),{}\n", mean_or_na(averages.latency_ms, "")));
    output.push_str(&format!(
        "Mean Download (Mbps),{}\n",
        mean_or_na(averages.download_mbps, "")
    ));
    output.push_str(&format!(
        "Mean Upload (Mbps),{}\n",
        mean_or_na(averages.upload_mbps, "")
    ));
    output
}

fn describe(sample: &Sample) -> String {
    format!(
        "{} at {} ({}, {}, {})",
        sample
            .signal
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        sample.location,
        sample.ssid,
        sample.bssid,
        sample.timestamp.format("%H:%M:%S")
    )
}

fn mean_or_na(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.2}{}", v, unit),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtrace_core::LinkInfo;
    use chrono::NaiveDate;

    fn sample(second: u32, signal: Option<i32>, latency: Option<f64>) -> Sample {
        let ts = NaiveDate::from_ymd_opt(2024, 8, 2)
            .unwrap()
            .and_hms_opt(16, 0, second)
            .unwrap();
        let link = LinkInfo {
            signal,
            ..LinkInfo::unknown()
        };
        Sample::from_readings(ts, "Porch", link, latency)
    }

    #[test]
    fn test_empty_log_has_no_report() {
        assert!(build_report(&[], true).unwrap().is_none());
        assert_eq!(render(None, OutputFormat::Pretty).unwrap(), "No samples recorded\n");
    }

    #[test]
    fn test_no_signal_data_reports_na_with_averages() {
        let log = vec![sample(0, None, Some(10.0)), sample(3, None, Some(30.0))];

        let report = build_report(&log, false).unwrap().unwrap();
        assert!(report.summary.is_none());
        assert_eq!(report.averages.latency_ms, Some(20.0));

        let table = render(Some(&report), OutputFormat::Table).unwrap();
        assert!(table.contains("Best Signal,N/A"));
        assert!(table.contains("Mean Latency (ms),20.00"));
    }

    #[test]
    fn test_table_output() {
        let log = vec![sample(0, Some(-30), Some(10.0)), sample(3, Some(-60), None)];

        let report = build_report(&log, true).unwrap().unwrap();
        let table = render(Some(&report), OutputFormat::Table).unwrap();

        assert!(table.contains("Samples,2"));
        assert!(table.contains("Best Signal,-30"));
        assert!(table.contains("Worst Signal,-60"));
        assert!(table.contains("Mean Latency (ms),10.00"));
        assert!(table.contains("Mean Download (Mbps),N/A"));
        assert_eq!(report.locations.unwrap().len(), 1);
    }
}
