//! Error taxonomy for the simulation core
//!
//! Every error is raised at the call site and propagated with `?`; nothing in
//! the core recovers from them. A malformed plan or entity constructor is a
//! programmer error, not a runtime condition.

use thiserror::Error;

/// Errors raised by geometry checks, level construction and level-pack parsing
#[derive(Debug, Error)]
pub enum GameError {
    /// A vector argument has a non-finite component (NaN or infinity)
    #[error("{field} must be a finite vector")]
    InvalidVector { field: &'static str },

    /// A body was given a size that is not strictly positive on both axes
    #[error("body size must be positive on both axes, got ({x}, {y})")]
    InvalidSize { x: f32, y: f32 },

    /// Tick step that is NaN or infinite
    #[error("tick step must be finite, got {0}")]
    InvalidStep(f32),

    /// A required argument was absent or unusable
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Level index outside the loaded pack
    #[error("level {index} out of range (pack has {len} levels)")]
    LevelIndex { index: usize, len: usize },

    /// Level pack or settings JSON could not be (de)serialized
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
