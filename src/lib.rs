//! Platform Sim - a minimal 2D platform-game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, level state, plan parsing, entity behavior)
//! - `levels`: JSON level packs
//! - `settings`: Run-level settings
//! - `error`: Error taxonomy

pub mod error;
pub mod levels;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use levels::LevelPack;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sim::Vector;

    /// Longest step a single tick may simulate (seconds)
    pub const MAX_STEP: f32 = 0.1;
    /// Seconds a level keeps running after it is won or lost
    pub const DEFAULT_COMPLETION_DELAY: f32 = 1.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: Vector = Vector::new(1.0, 1.0);
    pub const HORIZONTAL_PROJECTILE_SPEED: Vector = Vector::new(2.0, 0.0);
    pub const VERTICAL_PROJECTILE_SPEED: Vector = Vector::new(0.0, 2.0);
    pub const RESETTING_PROJECTILE_SPEED: Vector = Vector::new(0.0, 3.0);

    /// Collectible defaults
    pub const COLLECTIBLE_SIZE: Vector = Vector::new(0.6, 0.6);
    /// Offset from the cell corner to the bobbing anchor
    pub const COLLECTIBLE_OFFSET: Vector = Vector::new(0.2, 0.1);
    /// Angular speed of the bob (radians/sec)
    pub const COLLECTIBLE_SPRING_SPEED: f32 = 8.0;
    pub const COLLECTIBLE_SPRING_DIST: f32 = 0.07;

    /// Player defaults
    pub const PLAYER_SIZE: Vector = Vector::new(0.8, 1.5);
    /// Raises the player so a 1.5-tall body stands on the cell below
    pub const PLAYER_OFFSET: Vector = Vector::new(0.0, -0.5);
}
