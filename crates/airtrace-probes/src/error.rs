use airtrace_core::{ProbeFailure, ProbeKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} not found on this system")]
    ToolNotFound(String),

    #[error("{tool} exited with {status}: {stderr}")]
    CommandFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Could not parse {tool} output: {reason}")]
    Unparseable { tool: String, reason: String },

    #[error("No active wireless connection")]
    NotConnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convert into the failure type the tracking controller understands.
    pub fn into_failure(self, probe: ProbeKind) -> ProbeFailure {
        ProbeFailure::new(probe, self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
