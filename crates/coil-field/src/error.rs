//! Error types for parameter handling and session configuration

use thiserror::Error;

use crate::params::Param;

#[derive(Debug, Error)]
pub enum FieldError {
    /// A control value outside the physical domain (or not a number)
    #[error("invalid {param}: {value} ({reason})")]
    InvalidParameter {
        param: Param,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown parameter: {0}. Use: spacing, turns, radius, or current")]
    UnknownParameter(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FieldError>;
