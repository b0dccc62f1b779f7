//! Error types for the player core.
//!
//! `PlayerError` covers API misuse and conversion faults only. Load and
//! playback failures never surface as errors: they travel through the
//! session's event channels (`on_downloaded` / `on_completed`).

use serde::{Deserialize, Serialize};

/// Error type for player configuration and conversion operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerError {
    /// Progress value outside [0, 1] or not finite
    #[error("Invalid progress value: {value}")]
    InvalidProgress { value: f32 },

    /// Progress range with an out-of-bounds endpoint
    #[error("Invalid progress range: [{from}, {to}]")]
    InvalidRange { from: f32, to: f32 },

    /// Playback speed that the engine cannot interpret
    #[error("Invalid playback speed: {speed}")]
    InvalidSpeed { speed: f32 },

    /// Malformed remote source URL
    #[error("Invalid animation URL: {reason}")]
    InvalidUrl { reason: String },

    /// IO error
    #[error("IO error: {reason}")]
    IoError { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic player error
    #[error("Player error: {message}")]
    Generic { message: String },
}

impl PlayerError {
    /// Create a new generic error
    pub fn new(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidProgress { .. } | Self::InvalidRange { .. } | Self::InvalidSpeed { .. } => {
                "validation"
            }
            Self::InvalidUrl { .. } => "source",
            Self::IoError { .. } => "io",
            Self::SerializationError { .. } => "serialization",
            Self::Generic { .. } => "generic",
        }
    }
}

impl From<std::io::Error> for PlayerError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PlayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<url::ParseError> for PlayerError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl {
            reason: err.to_string(),
        }
    }
}
