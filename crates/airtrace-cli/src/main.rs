use airtrace_cli::OutputFormat;
use airtrace_cli::commands;
use airtrace_cli::commands::track::TrackOptions;
use airtrace_core::Settings;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airtrace")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Sample Wi-Fi signal and latency around a site and summarize the results",
    long_about = "airtrace polls the wireless adapter and a reference host on a fixed cadence, \
                  tags every sample with the location you are standing at, and reports the best \
                  and worst spots once you stop. Samples are exported as CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Settings file (defaults to <config dir>/airtrace/config.json)
    #[arg(long, global = true, env = "AIRTRACE_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record samples until Ctrl+C, then print a summary and export CSV
    Track {
        /// Location label for the samples
        #[arg(short, long, env = "AIRTRACE_LOCATION")]
        location: Option<String>,

        /// Seconds to wait between samples
        #[arg(short, long, env = "AIRTRACE_INTERVAL")]
        interval: Option<u64>,

        /// Host to measure latency against
        #[arg(long, env = "AIRTRACE_HOST")]
        host: Option<String>,

        /// Stop after this many samples
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Stop after this many seconds
        #[arg(short, long, value_name = "SECONDS")]
        duration: Option<u64>,

        /// Where to write the CSV report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write a CSV report
        #[arg(long)]
        no_export: bool,
    },

    /// Measure download/upload throughput once (not recorded)
    Speed,

    /// Show the current link and latency without recording
    Status {
        /// Location label to show with the reading
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Summarize an exported CSV report
    Summary {
        /// Path to the report file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Include a per-location breakdown
        #[arg(long)]
        by_location: bool,
    },

    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective settings
    Show,
    /// Print the settings file location
    Path,
    /// Write a settings file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = cli.config;
    let config_path = || resolve_config_path(config.clone());

    match cli.command {
        Commands::Track {
            location,
            interval,
            host,
            count,
            duration,
            output,
            no_export,
        } => {
            let settings = Settings::load(&config_path()?)?;
            let options = TrackOptions {
                location,
                interval_secs: interval,
                host,
                count,
                duration_secs: duration,
                output,
                export: !no_export,
            };
            commands::track::execute(options, &settings, cli.format)
        }
        Commands::Speed => {
            let settings = Settings::load(&config_path()?)?;
            commands::speed::execute(&settings, cli.format)
        }
        Commands::Status { location } => {
            let settings = Settings::load(&config_path()?)?;
            commands::status::execute(location, &settings, cli.format)
        }
        Commands::Summary { file, by_location } => {
            commands::summary::execute(&file, by_location, cli.format)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let path = config_path()?;
                let settings = Settings::load(&path)?;
                commands::config::show(&settings, &path, cli.format)
            }
            ConfigAction::Path => commands::config::path(&config_path()?),
            ConfigAction::Init { force } => commands::config::init(&config_path()?, force),
        },
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

/// The `--config` path, or the per-user default.
fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => Ok(path),
        None => Ok(Settings::default_path()?),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("airtrace=debug,airtrace_cli=debug,airtrace_core=debug,airtrace_probes=debug")
    } else {
        EnvFilter::new("airtrace=info,airtrace_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
