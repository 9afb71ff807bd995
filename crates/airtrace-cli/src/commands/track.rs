//! `airtrace track`: host loop that owns the session and drives the controller.
//!
//! Ticks are re-invoked after the gap the controller asks for. Typing a new
//! label and pressing Enter relabels subsequent samples; Ctrl+C, `--count`
//! or `--duration` end the session.

use super::summary::{build_report, render};
use crate::OutputFormat;
use airtrace_core::report::ReportWriter;
use airtrace_core::{
    Clock, LatencyProbe, LinkInfoProvider, ProbeFailure, Sample, Session, Settings,
    ThroughputProbe, TickOutcome, TrackerConfig, TrackingController,
};
use anyhow::Result;
use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct TrackOptions {
    pub location: Option<String>,
    pub interval_secs: Option<u64>,
    pub host: Option<String>,
    pub count: Option<usize>,
    pub duration_secs: Option<u64>,
    pub output: Option<PathBuf>,
    pub export: bool,
}

/// When the host loop stops on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Limits {
    pub max_samples: Option<usize>,
    pub max_duration: Option<Duration>,
}

impl Limits {
    fn reached(&self, samples: usize, elapsed: Duration) -> bool {
        self.max_samples.is_some_and(|max| samples >= max)
            || self.max_duration.is_some_and(|max| elapsed >= max)
    }
}

/// Merge command-line options over the loaded settings.
pub fn tracker_config(options: &TrackOptions, settings: &Settings) -> Result<TrackerConfig> {
    let mut config = settings.tracker_config();

    if let Some(secs) = options.interval_secs {
        if secs == 0 {
            anyhow::bail!("--interval must be at least 1 second");
        }
        config.interval = Duration::from_secs(secs);
    }
    if let Some(host) = &options.host {
        config.latency_host = host.clone();
    }
    if let Some(location) = &options.location {
        config.default_location = location.clone();
    }

    Ok(config)
}

pub fn execute(options: TrackOptions, settings: &Settings, format: OutputFormat) -> Result<()> {
    let config = tracker_config(&options, settings)?;
    let location = config.default_location.clone();
    let controller = super::system_controller(config, settings);

    let limits = Limits {
        max_samples: options.count,
        max_duration: options.duration_secs.map(Duration::from_secs),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut session = Session::new();

    let recorded = runtime.block_on(async {
        println!(
            "📡 Tracking at '{}' every {}s. Type a new location + Enter to relabel, Ctrl+C to stop.",
            location,
            controller.config().interval.as_secs()
        );
        let shutdown = shutdown_signal();
        let labels = spawn_label_reader();
        drive(
            &controller,
            &mut session,
            &location,
            limits,
            labels,
            shutdown,
            print_tick,
        )
        .await
    });
    // The stdin reader may still be blocked on a read.
    runtime.shutdown_background();
    tracing::debug!("Session ended after {} samples", recorded);

    let report = build_report(session.snapshot(), true)?;
    print!("{}", render(report.as_ref(), format)?);

    if options.export && !session.is_empty() {
        let path = options
            .output
            .unwrap_or_else(|| settings.report_file.clone());
        ReportWriter::to_file(session.snapshot(), &path)?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Run the tick loop until a limit is hit or `shutdown` resolves.
///
/// Returns the number of samples appended by this run.
pub async fn drive<L, P, T, C, S, F>(
    controller: &TrackingController<L, P, T, C>,
    session: &mut Session,
    location: &str,
    limits: Limits,
    mut labels: mpsc::UnboundedReceiver<String>,
    shutdown: S,
    mut on_tick: F,
) -> usize
where
    L: LinkInfoProvider,
    P: LatencyProbe,
    T: ThroughputProbe,
    C: Clock,
    S: Future<Output = ()>,
    F: FnMut(&Sample, &[ProbeFailure]),
{
    tokio::pin!(shutdown);

    let before = session.len();
    let started = Instant::now();
    let mut labels_open = true;

    controller.start(session, location);

    while session.is_tracking() {
        if limits.reached(session.len() - before, started.elapsed()) {
            break;
        }

        let wait = match controller.tick(session) {
            TickOutcome::Idle => break,
            TickOutcome::Sampled {
                sample,
                wait,
                warnings,
            } => {
                on_tick(&sample, &warnings);
                wait
            }
        };

        if limits.reached(session.len() - before, started.elapsed()) {
            break;
        }

        let sleep = tokio::time::sleep(wait);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                _ = &mut shutdown => {
                    tracing::info!("Received Ctrl+C, stopping...");
                    controller.stop(session);
                    break;
                }
                label = labels.recv(), if labels_open => match label {
                    Some(label) => {
                        session.set_location(label.trim());
                        println!("📍 Location set to '{}'", session.location_label());
                    }
                    None => labels_open = false,
                },
            }
        }
    }

    controller.stop(session);
    session.len() - before
}

/// Forward each line typed on stdin as a new location label.
fn spawn_label_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    rx
}

#[cfg(unix)]
type Interrupt = tokio::signal::unix::Signal;

#[cfg(windows)]
type Interrupt = tokio::signal::windows::CtrlC;

#[cfg(unix)]
fn listen_for_interrupt() -> std::io::Result<Interrupt> {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
}

#[cfg(windows)]
fn listen_for_interrupt() -> std::io::Result<Interrupt> {
    tokio::signal::windows::ctrl_c()
}

/// Resolves on Ctrl+C. The handler is registered on call, not on first poll,
/// so an interrupt during the first tick's probes is still caught.
fn shutdown_signal() -> impl Future<Output = ()> {
    let interrupt = listen_for_interrupt()
        .inspect_err(|e| tracing::warn!("Could not listen for Ctrl+C: {}", e))
        .ok();

    async move {
        match interrupt {
            Some(mut interrupt) => {
                interrupt.recv().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

fn print_tick(sample: &Sample, warnings: &[ProbeFailure]) {
    use console::style;

    println!("{}", format_tick(sample));
    for warning in warnings {
        println!("  {} {}", style("warning:").yellow(), warning);
    }
}

/// One status line per recorded sample.
pub fn format_tick(sample: &Sample) -> String {
    let signal = sample
        .signal
        .map(|s| s.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let latency = sample
        .latency_ms
        .map(|ms| format!("{:.1} ms", ms))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "[{}] {} | {} ({}) | signal {} | {} | latency {}",
        sample.timestamp.format("%H:%M:%S"),
        sample.location,
        sample.ssid,
        sample.bssid,
        signal,
        sample.frequency,
        latency
    )
}
