//! Error types shared by the tracker and its integration layer.

use thiserror::Error;

/// Errors that can occur while configuring the tracker or reading detections.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid detection: {0}")]
    InvalidDetection(String),

    #[error("Malformed frame record on line {line}: {source}")]
    MalformedFrame {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed box on line {line}: {reason}")]
    MalformedBox { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
