//! Entity variants: constructors plus the per-kind update/response table
//!
//! Each variant is a `Body` carrying a `Behavior`. Motion is a functional
//! update: `act` returns the body's next value and never mutates in place.

use std::f32::consts::TAU;

use rand::Rng;
use rand_pcg::Pcg32;

use super::body::{Behavior, Body, Rebound, Spring};
use super::level::LevelMap;
use super::vector::Vector;
use crate::consts::*;
use crate::error::GameError;

/// Projectile of unit size moving at `speed`, reversing on obstacles
pub fn projectile(pos: Vector, speed: Vector) -> Result<Body, GameError> {
    Body::new(
        pos,
        PROJECTILE_SIZE,
        speed,
        Behavior::Projectile(Rebound::Reverse),
    )
}

pub fn horizontal_projectile(pos: Vector, _rng: &mut Pcg32) -> Result<Body, GameError> {
    projectile(pos, HORIZONTAL_PROJECTILE_SPEED)
}

pub fn vertical_projectile(pos: Vector, _rng: &mut Pcg32) -> Result<Body, GameError> {
    projectile(pos, VERTICAL_PROJECTILE_SPEED)
}

/// Falls from its spawn point and restarts there on every hit
pub fn resetting_projectile(pos: Vector, _rng: &mut Pcg32) -> Result<Body, GameError> {
    Body::new(
        pos,
        PROJECTILE_SIZE,
        RESETTING_PROJECTILE_SPEED,
        Behavior::Projectile(Rebound::Reset { spawn: pos }),
    )
}

/// Collectible bobbing around a point offset into its cell. The starting
/// phase is drawn from `rng` so neighbouring collectibles don't move in sync.
pub fn collectible(pos: Vector, rng: &mut Pcg32) -> Result<Body, GameError> {
    let anchor = pos.plus(COLLECTIBLE_OFFSET);
    let spring = Spring {
        anchor,
        phase: rng.random_range(0.0..TAU),
        speed: COLLECTIBLE_SPRING_SPEED,
        dist: COLLECTIBLE_SPRING_DIST,
    };
    Body::new(
        anchor,
        COLLECTIBLE_SIZE,
        Vector::ZERO,
        Behavior::Collectible(spring),
    )
}

/// Player body, raised so its feet line up with the bottom of the cell
pub fn player(pos: Vector, _rng: &mut Pcg32) -> Result<Body, GameError> {
    Body::new(
        pos.plus(PLAYER_OFFSET),
        PLAYER_SIZE,
        Vector::ZERO,
        Behavior::Player,
    )
}

/// Position rule for one step of `dt` seconds
pub fn next_position(body: &Body, dt: f32) -> Vector {
    match body.behavior {
        Behavior::Inert | Behavior::Player => body.pos,
        Behavior::Projectile(_) => body.pos.plus(body.speed.times(dt)),
        Behavior::Collectible(spring) => {
            let spring = advance_spring(spring, dt);
            spring_position(&spring)
        }
    }
}

/// Collision response when the next position is blocked. The position is
/// left alone; changes show up on the following step.
pub fn on_obstacle(body: &Body) -> Body {
    match body.behavior {
        Behavior::Projectile(Rebound::Reverse) => {
            log::debug!("projectile {:?} bounced", body.id());
            body.with_speed(body.speed.times(-1.0))
        }
        Behavior::Projectile(Rebound::Reset { spawn }) => {
            log::debug!("projectile {:?} reset to spawn", body.id());
            body.with_pos(spawn)
        }
        Behavior::Inert | Behavior::Player | Behavior::Collectible(_) => body.clone(),
    }
}

/// Advance one body by `dt` against the obstacles of `level`
pub fn act(body: &Body, dt: f32, level: &LevelMap) -> Result<Body, GameError> {
    match body.behavior {
        Behavior::Inert | Behavior::Player => Ok(body.clone()),
        Behavior::Projectile(_) => {
            let next = next_position(body, dt);
            match level.obstacle_at(next, body.size())? {
                None => Ok(body.with_pos(next)),
                Some(_) => Ok(on_obstacle(body)),
            }
        }
        Behavior::Collectible(spring) => {
            let spring = advance_spring(spring, dt);
            Ok(body
                .with_behavior(Behavior::Collectible(spring))
                .with_pos(spring_position(&spring)))
        }
    }
}

fn advance_spring(spring: Spring, dt: f32) -> Spring {
    Spring {
        phase: spring.phase + spring.speed * dt,
        ..spring
    }
}

fn spring_position(spring: &Spring) -> Vector {
    spring
        .anchor
        .plus(Vector::new(0.0, spring.phase.sin() * spring.dist))
}
