use crate::OutputFormat;
use airtrace_core::Settings;
use anyhow::{Result, bail};
use std::path::Path;

/// Print the effective settings.
pub fn show(settings: &Settings, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(settings)?),
        OutputFormat::Table => {
            println!("Setting,Value");
            println!("interval_secs,{}", settings.interval_secs);
            println!("latency_host,{}", settings.latency_host);
            println!("default_location,{}", settings.default_location);
            println!("ping_timeout_secs,{}", settings.ping_timeout_secs);
            println!("report_file,{}", settings.report_file.display());
        }
        OutputFormat::Pretty => {
            use console::style;

            let source = if path.exists() {
                path.display().to_string()
            } else {
                "built-in defaults".to_string()
            };
            println!("\n{}", style("airtrace settings").bold().cyan());
            println!("  Source:           {}", source);
            println!("  Interval:         {}s", settings.interval_secs);
            println!("  Latency host:     {}", settings.latency_host);
            println!("  Default location: {}", settings.default_location);
            println!("  Ping timeout:     {}s", settings.ping_timeout_secs);
            println!("  Report file:      {}", settings.report_file.display());
            println!();
        }
    }
    Ok(())
}

pub fn path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

/// Write a settings file with the default values.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Settings file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Settings::default().save(path)?;
    println!("Settings written to: {}", path.display());
    Ok(())
}
