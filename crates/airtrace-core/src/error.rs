use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No samples have been recorded")]
    EmptyLog,

    #[error("No sample in the log carries a signal reading")]
    NoSignalData,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed report at line {line}: {message}")]
    Report { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
