pub mod completion;
pub mod config;
pub mod speed;
pub mod status;
pub mod summary;
pub mod track;

use airtrace_core::{Settings, TrackerConfig, TrackingController};
use airtrace_probes::{SpeedtestCli, SystemLinkProvider, SystemPing};
use std::time::Duration;

/// Controller wired to the probes of the running platform.
pub type SystemController = TrackingController<SystemLinkProvider, SystemPing, SpeedtestCli>;

pub fn system_controller(config: TrackerConfig, settings: &Settings) -> SystemController {
    let link = SystemLinkProvider::detect();
    tracing::debug!("Using {} link-info backend", link.backend());

    TrackingController::new(
        link,
        SystemPing::new(Duration::from_secs(settings.ping_timeout_secs)),
        SpeedtestCli::new(),
        config,
    )
}
