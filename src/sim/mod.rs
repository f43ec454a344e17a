//! Deterministic simulation module
//!
//! Everything that moves, collides or decides a level's outcome lives here:
//! - Single-threaded, one step at a time
//! - Seeded RNG only
//! - Entities updated in list order
//! - No rendering, input or IO

pub mod actors;
pub mod body;
pub mod builder;
pub mod level;
pub mod tick;
pub mod vector;

pub use body::{ActorKind, Behavior, Body, EntityId, Rebound, Spring};
pub use builder::{EntityConstructor, LevelBuilder, SymbolTable};
pub use level::{Grid, LevelMap, Obstacle, Status, Touched};
pub use tick::{TickOutcome, tick};
pub use vector::Vector;
