//! Simulation settings
//!
//! Only run-level knobs live here. Physics constants and the completion
//! delay are fixed in `consts`; anything else about a level comes from its plan.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for per-entity variation (collectible phases)
    pub seed: u64,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let settings = serde_json::from_str(json)?;
        log::info!("Loaded settings: {settings:?}");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }
}
