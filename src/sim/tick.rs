//! One simulation step
//!
//! Serializes a tick the way the frame driver expects: move every entity,
//! then check the player against the grid and the other entities, then apply
//! the resulting transitions. Rendering and input stay with the caller.

use super::body::{ActorKind, EntityId};
use super::level::{LevelMap, Obstacle};
use crate::consts::MAX_STEP;
use crate::error::GameError;

/// What the player ran into during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Grid obstacle under the player's box
    pub obstacle: Option<Obstacle>,
    /// First entity overlapping the player
    pub actor: Option<(ActorKind, EntityId)>,
}

/// Advance `level` by `dt` seconds (clamped to `MAX_STEP`)
///
/// Once the level has an outcome, entities keep moving and the completion
/// delay counts down, but no further touches are resolved. Within one tick
/// the grid obstacle is resolved before the touched entity, so the entity's
/// outcome is the one that sticks.
pub fn tick(level: &mut LevelMap, dt: f32) -> Result<TickOutcome, GameError> {
    if !dt.is_finite() {
        return Err(GameError::InvalidStep(dt));
    }
    let dt = dt.clamp(0.0, MAX_STEP);
    log::trace!("tick dt={dt}");

    level.act_entities(dt)?;

    if level.status().is_some() {
        level.advance_completion(dt);
        return Ok(TickOutcome::default());
    }

    let Some(player) = level.player().cloned() else {
        return Ok(TickOutcome::default());
    };

    let obstacle = level.obstacle_at(player.pos, player.size())?;
    if let Some(obstacle) = obstacle {
        level.resolve_touch(obstacle.into(), None);
    }

    let actor = level.entity_at(&player).map(|e| (e.kind(), e.id()));
    if let Some((kind, id)) = actor {
        level.resolve_touch(kind.into(), Some(id));
    }

    Ok(TickOutcome { obstacle, actor })
}
