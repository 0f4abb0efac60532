//! Error types for the fourbot crate

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board dimensions {width}x{height} (both must be positive)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid board contents: {message}")]
    InvalidContents { message: String },

    #[error("game already over")]
    GameOver,

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
