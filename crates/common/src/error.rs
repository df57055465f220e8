//! Error types shared across Gesture Gallery crates.

use std::path::PathBuf;

/// Top-level error type for Gesture Gallery operations.
///
/// Per-frame recognition never produces one of these: a frame always yields a
/// report. Errors come from loading configuration and landmark sessions.
#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Landmark data error: {message}")]
    Landmarks { message: String },

    #[error("Gesture catalog error: {message}")]
    Catalog { message: String },

    #[error("Gallery error: {message}")]
    Gallery { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using GestureError.
pub type GestureResult<T> = Result<T, GestureError>;

impl GestureError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn landmarks(msg: impl Into<String>) -> Self {
        Self::Landmarks {
            message: msg.into(),
        }
    }

    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog {
            message: msg.into(),
        }
    }

    pub fn gallery(msg: impl Into<String>) -> Self {
        Self::Gallery {
            message: msg.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}
