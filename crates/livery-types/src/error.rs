//! Error types for livery.

use std::io;

/// Errors produced by the livery crates.
#[derive(Debug, thiserror::Error)]
pub enum LiveryError {
    #[error("settings error: {0}")]
    Settings(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("style error: {0}")]
    Style(String),

    #[error("theme error: {0}")]
    Theme(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LiveryError>;
