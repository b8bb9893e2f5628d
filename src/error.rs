//! Error types for the face signal pipeline.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON frame or notification could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML configuration document could not be encoded or decoded
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A landmark required by the pose gate is not present in the frame
    #[error("Landmark {index} missing (frame has {available} points)")]
    MissingLandmark {
        /// Index that was requested
        index: usize,
        /// Number of landmarks the frame actually carries
        available: usize,
    },

    /// A replayed frame record could not be parsed
    #[error("Invalid frame on line {line}: {message}")]
    InvalidFrame {
        /// 1-based line number in the replay input
        line: usize,
        /// Parser message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
