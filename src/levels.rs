//! Level packs: an ordered list of plans in JSON form
//!
//! The wire shape is a JSON array of plans, each plan an array of row
//! strings. Fetching the text is the caller's job.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::sim::{LevelBuilder, LevelMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelPack {
    plans: Vec<Vec<String>>,
}

impl LevelPack {
    pub fn new(plans: Vec<Vec<String>>) -> Self {
        Self { plans }
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let pack: LevelPack = serde_json::from_str(json)?;
        log::info!("Loaded level pack with {} levels", pack.len());
        Ok(pack)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn plan(&self, index: usize) -> Option<&[String]> {
        self.plans.get(index).map(Vec::as_slice)
    }

    /// Parse level `index` with `builder`
    pub fn build(&self, index: usize, builder: &mut LevelBuilder) -> Result<LevelMap, GameError> {
        let plan = self.plan(index).ok_or(GameError::LevelIndex {
            index,
            len: self.len(),
        })?;
        builder.parse(plan)
    }
}
