use thiserror::Error;

use crate::conf::ConfigError;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Input {input} is empty, nothing to analyze")]
    EmptyInput { input: String },

    #[error("Failed to read {input}: {source}")]
    Io {
        input: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Stopped by Ctrl-C or the session cancel flag. `line` is set when a
    /// parse pass was cut off at that line boundary.
    #[error("Cancelled{}", .line.map(|l| format!(" before line {}", l)).unwrap_or_default())]
    Cancelled { line: Option<usize> },

    #[error("Failed to listen for Ctrl-C: {0}")]
    Signal(#[source] std::io::Error),

    #[error("Parse worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
