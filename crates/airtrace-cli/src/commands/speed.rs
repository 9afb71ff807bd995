use crate::OutputFormat;
use airtrace_core::{
    Clock, LatencyProbe, LinkInfoProvider, Settings, ThroughputCheck, ThroughputProbe,
    TrackingController,
};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run an on-demand throughput check. The result is shown, not recorded.
pub fn run_check<L, P, T, C>(controller: &TrackingController<L, P, T, C>) -> ThroughputCheck
where
    L: LinkInfoProvider,
    P: LatencyProbe,
    T: ThroughputProbe,
    C: Clock,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message("Measuring download and upload throughput...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let check = controller.run_throughput_check();

    spinner.finish_and_clear();
    check
}

pub fn execute(settings: &Settings, format: OutputFormat) -> Result<()> {
    let controller = super::system_controller(settings.tracker_config(), settings);
    let check = run_check(&controller);
    print!("{}", render(&check, format)?);
    Ok(())
}

pub fn render(check: &ThroughputCheck, format: OutputFormat) -> Result<String> {
    let download = rate(check.download_mbps);
    let upload = rate(check.upload_mbps);

    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(check)?),
        OutputFormat::Table => format!(
            "Metric,Value\nMeasured At,{}\nDownload (Mbps),{}\nUpload (Mbps),{}\n",
            check.measured_at.format("%Y-%m-%d %H:%M:%S"),
            download,
            upload
        ),
        OutputFormat::Pretty => {
            use console::style;

            let mut output = format!("\n{}\n", style("Throughput Check").bold().cyan());
            output.push_str(&format!(
                "  Measured At: {}\n",
                check.measured_at.format("%H:%M:%S")
            ));
            output.push_str(&format!("  Download:    {} Mbps\n", download));
            output.push_str(&format!("  Upload:      {} Mbps\n", upload));
            if let Some(warning) = &check.warning {
                output.push_str(&format!("  {} {}\n", style("warning:").yellow(), warning));
            }
            output.push('\n');
            output
        }
    })
}

fn rate(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use airtrace_core::{ProbeFailure, ProbeKind};
    use chrono::NaiveDate;

    fn check(
        download: Option<f64>,
        upload: Option<f64>,
        warning: Option<ProbeFailure>,
    ) -> ThroughputCheck {
        ThroughputCheck {
            measured_at: NaiveDate::from_ymd_opt(2024, 9, 9)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap(),
            download_mbps: download,
            upload_mbps: upload,
            warning,
        }
    }

    #[test]
    fn test_table_render() {
        let output = render(&check(Some(93.254), Some(11.5), None), OutputFormat::Table).unwrap();
        assert!(output.contains("Measured At,2024-09-09 07:30:00"));
        assert!(output.contains("Download (Mbps),93.25"));
        assert!(output.contains("Upload (Mbps),11.50"));
    }

    #[test]
    fn test_failed_check_renders_na_and_warning() {
        let failure =
            ProbeFailure::new(ProbeKind::Throughput, "speedtest-cli not found on this system");
        let output = render(&check(None, None, Some(failure)), OutputFormat::Pretty).unwrap();
        assert!(output.contains("N/A Mbps"));
        assert!(output.contains("speedtest-cli not found"));
    }
}
