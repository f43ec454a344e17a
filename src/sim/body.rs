//! Positioned, sized, moving entities and their axis-aligned boxes
//!
//! A `Body` is the shared record for every dynamic entity. Per-kind motion and
//! collision response live in `actors`; this module only knows geometry and
//! identity.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::actors;
use super::level::LevelMap;
use super::vector::Vector;
use crate::error::GameError;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a body. Clones share it; separately constructed bodies never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Entity kind tag used for collision-response dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Generic,
    Player,
    Projectile,
    Collectible,
}

/// What a projectile does when its next position would hit an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Rebound {
    /// Reverse both speed components
    Reverse,
    /// Snap back to the spawn position, keeping the speed
    Reset { spawn: Vector },
}

/// Oscillation state of a collectible
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spring {
    /// Fixed point the collectible bobs around
    pub anchor: Vector,
    /// Current phase (radians)
    pub phase: f32,
    /// Angular speed (radians/sec)
    pub speed: f32,
    /// Vertical amplitude
    pub dist: f32,
}

/// Per-kind behavior carried by a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Behavior {
    /// No motion, no response
    Inert,
    /// Moved by the driver, never acts on its own
    Player,
    Projectile(Rebound),
    Collectible(Spring),
}

impl Behavior {
    pub fn kind(&self) -> ActorKind {
        match self {
            Behavior::Inert => ActorKind::Generic,
            Behavior::Player => ActorKind::Player,
            Behavior::Projectile(_) => ActorKind::Projectile,
            Behavior::Collectible(_) => ActorKind::Collectible,
        }
    }
}

/// A dynamic entity with an axis-aligned bounding box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    id: EntityId,
    pub pos: Vector,
    size: Vector,
    pub speed: Vector,
    pub behavior: Behavior,
}

impl Body {
    /// Create a body, validating all vectors are finite and the size is positive
    pub fn new(
        pos: Vector,
        size: Vector,
        speed: Vector,
        behavior: Behavior,
    ) -> Result<Self, GameError> {
        let pos = pos.checked("position")?;
        let size = size.checked("size")?;
        let speed = speed.checked("speed")?;
        if size.x() <= 0.0 || size.y() <= 0.0 {
            return Err(GameError::InvalidSize {
                x: size.x(),
                y: size.y(),
            });
        }

        Ok(Self {
            id: EntityId::next(),
            pos,
            size,
            speed,
            behavior,
        })
    }

    /// Unit-sized, motionless generic body
    pub fn generic(pos: Vector) -> Result<Self, GameError> {
        Self::new(pos, Vector::new(1.0, 1.0), Vector::ZERO, Behavior::Inert)
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ActorKind {
        self.behavior.kind()
    }

    #[inline]
    pub fn size(&self) -> Vector {
        self.size
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x() + self.size.x()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y() + self.size.y()
    }

    /// Strict box overlap on both axes. A body never intersects itself, and
    /// boxes that only share an edge do not count.
    pub fn intersects(&self, other: &Body) -> bool {
        if self.id == other.id {
            return false;
        }

        self.right() > other.left()
            && self.left() < other.right()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// The value this body takes after `dt` seconds in `level`
    pub fn acted(&self, dt: f32, level: &LevelMap) -> Result<Body, GameError> {
        actors::act(self, dt, level)
    }

    pub(crate) fn with_pos(&self, pos: Vector) -> Body {
        Body { pos, ..self.clone() }
    }

    pub(crate) fn with_speed(&self, speed: Vector) -> Body {
        Body {
            speed,
            ..self.clone()
        }
    }

    pub(crate) fn with_behavior(&self, behavior: Behavior) -> Body {
        Body {
            behavior,
            ..self.clone()
        }
    }
}
