//! Session configuration (grid window, initial parameters, summation)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::field::Summation;
use crate::grid::GridSpec;
use crate::params::CoilParams;

/// Everything fixed for the lifetime of a session. Missing JSON fields
/// fall back to the reference instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub grid: GridSpec,
    /// Starting parameters; reset always returns to `CoilParams::default()`
    pub params: CoilParams,
    pub summation: Summation,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.params.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
