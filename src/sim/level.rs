//! Level state: static obstacle grid, live entities and the won/lost machine

use serde::{Deserialize, Serialize};

use super::body::{ActorKind, Body, EntityId};
use super::vector::Vector;
use crate::consts::DEFAULT_COMPLETION_DELAY;
use crate::error::GameError;

/// Static grid-cell classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Obstacle {
    Wall,
    Lava,
}

/// Level outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Won,
    Lost,
}

/// What the player touched: a grid obstacle or another entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Touched {
    Obstacle(Obstacle),
    Actor(ActorKind),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<ActorKind> for Touched {
    fn from(kind: ActorKind) -> Self {
        Touched::Actor(kind)
    }
}

/// Rows of optional obstacles. Rows may differ in length.
pub type Grid = Vec<Vec<Option<Obstacle>>>;

/// One level attempt. Discarded and rebuilt for the next level or a retry.
#[derive(Debug, Clone, Serialize)]
pub struct LevelMap {
    grid: Grid,
    /// In parse order
    entities: Vec<Body>,
    width: usize,
    height: usize,
    status: Option<Status>,
    /// Seconds left before a won/lost level reports finished
    completion_delay: f32,
    player: Option<EntityId>,
}

impl LevelMap {
    pub fn new(grid: Grid, entities: Vec<Body>) -> Self {
        let height = grid.len();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);

        let mut players = entities.iter().filter(|e| e.kind() == ActorKind::Player);
        let player = players.next().map(Body::id);
        if players.next().is_some() {
            log::warn!("level has more than one player body, using the first");
        }

        log::info!(
            "Level {}x{}: {} entities, player={}",
            width,
            height,
            entities.len(),
            player.is_some()
        );

        Self {
            grid,
            entities,
            width,
            height,
            status: None,
            completion_delay: DEFAULT_COMPLETION_DELAY,
            player,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Obstacle stored at a grid cell, `None` for empty or out-of-range cells
    pub fn cell(&self, x: usize, y: usize) -> Option<Obstacle> {
        self.grid.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn entities(&self) -> &[Body] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Body> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn player(&self) -> Option<&Body> {
        self.player.and_then(|id| self.entity(id))
    }

    /// Mutable player access for the input source (sets speed/position between ticks)
    pub fn player_mut(&mut self) -> Option<&mut Body> {
        let id = self.player?;
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    #[inline]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    #[inline]
    pub fn completion_delay(&self) -> f32 {
        self.completion_delay
    }

    /// A level is finished once it has an outcome and the delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.completion_delay < 0.0
    }

    /// Count down the completion delay. Does nothing until an outcome is set.
    pub fn advance_completion(&mut self, dt: f32) {
        if self.status.is_some() {
            self.completion_delay -= dt;
        }
    }

    /// First entity (in list order) overlapping `probe`
    pub fn entity_at(&self, probe: &Body) -> Option<&Body> {
        self.entities.iter().find(|e| e.intersects(probe))
    }

    /// Obstacle covering the box at `pos` with `size`, rasterized onto the grid.
    ///
    /// Leaving the grid left, right or top reports `Wall`; leaving the bottom
    /// reports `Lava`, whatever the last row holds. Inside the grid, cells are
    /// scanned row-major and the first obstacle wins.
    ///
    /// Only errors when *both* vectors are malformed. A single non-finite
    /// vector falls through the checks below and usually yields `None`.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>, GameError> {
        if !pos.is_finite() && !size.is_finite() {
            return Err(GameError::MissingArgument("obstacle_at position and size"));
        }

        let left = pos.x().floor();
        let right = (pos.x() + size.x()).ceil();
        let top = pos.y().floor();
        let bottom = (pos.y() + size.y()).ceil();

        if left < 0.0 || right > self.width as f32 || top < 0.0 {
            return Ok(Some(Obstacle::Wall));
        }
        if bottom > self.height as f32 {
            return Ok(Some(Obstacle::Lava));
        }

        // Saturating casts: NaN bounds give empty ranges
        for y in top as usize..bottom as usize {
            for x in left as usize..right as usize {
                if let Some(obstacle) = self.cell(x, y) {
                    return Ok(Some(obstacle));
                }
            }
        }

        Ok(None)
    }

    /// Remove an entity by identity, returning it if it was present
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Body> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index))
    }

    pub fn no_more_of_kind(&self, kind: ActorKind) -> bool {
        !self.entities.iter().any(|e| e.kind() == kind)
    }

    /// Apply the outcome of the player touching `touched`.
    ///
    /// Lava and projectiles lose the level. A collectible is removed and the
    /// level is won once none of the removed entity's kind remain. Anything
    /// else is ignored.
    pub fn resolve_touch(&mut self, touched: Touched, entity: Option<EntityId>) {
        match touched {
            Touched::Obstacle(Obstacle::Lava) | Touched::Actor(ActorKind::Projectile) => {
                self.set_status(Status::Lost);
            }
            Touched::Actor(ActorKind::Collectible) => {
                let removed = entity.and_then(|id| self.remove_entity(id));
                // Relies on every collectible sharing one kind tag
                let kind = removed
                    .as_ref()
                    .map(Body::kind)
                    .unwrap_or(ActorKind::Collectible);
                if let Some(body) = &removed {
                    log::debug!("collected {:?}", body.id());
                }
                if self.no_more_of_kind(kind) {
                    self.set_status(Status::Won);
                }
            }
            Touched::Obstacle(Obstacle::Wall)
            | Touched::Actor(ActorKind::Player)
            | Touched::Actor(ActorKind::Generic) => {}
        }
    }

    /// Advance every entity by `dt`, in list order, replacing each with its next value
    pub fn act_entities(&mut self, dt: f32) -> Result<(), GameError> {
        for index in 0..self.entities.len() {
            let next = self.entities[index].acted(dt, self)?;
            self.entities[index] = next;
        }
        Ok(())
    }

    fn set_status(&mut self, status: Status) {
        if self.status != Some(status) {
            log::info!("Level status: {:?} -> {:?}", self.status, status);
        }
        self.status = Some(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actors;
    use crate::sim::body::Behavior;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_grid(width: usize, height: usize) -> Grid {
        vec![vec![None; width]; height]
    }

    fn coin_at(x: f32, y: f32) -> Body {
        actors::collectible(Vector::new(x, y), &mut Pcg32::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn test_dimensions_from_jagged_grid() {
        let grid = vec![vec![None; 2], vec![None; 5], vec![None; 3]];
        let level = LevelMap::new(grid, Vec::new());
        assert_eq!(level.width(), 5);
        assert_eq!(level.height(), 3);

        let empty = LevelMap::new(Vec::new(), Vec::new());
        assert_eq!(empty.width(), 0);
        assert_eq!(empty.height(), 0);
        assert!(empty.player().is_none());
    }

    #[test]
    fn test_player_lookup() {
        let player = actors::player(Vector::new(1.0, 1.0), &mut Pcg32::seed_from_u64(0)).unwrap();
        let id = player.id();
        let level = LevelMap::new(open_grid(3, 3), vec![coin_at(0.0, 0.0), player]);
        assert_eq!(level.player().map(Body::id), Some(id));
    }

    #[test]
    fn test_obstacle_left_edge_is_wall() {
        let level = LevelMap::new(open_grid(5, 5), Vec::new());
        let hit = level
            .obstacle_at(Vector::new(-0.0001, 1.0), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(hit, Some(Obstacle::Wall));
    }

    #[test]
    fn test_obstacle_right_and_top_edges_are_wall() {
        let level = LevelMap::new(open_grid(5, 5), Vec::new());
        let right = level
            .obstacle_at(Vector::new(4.5, 1.0), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(right, Some(Obstacle::Wall));
        let top = level
            .obstacle_at(Vector::new(1.0, -0.5), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(top, Some(Obstacle::Wall));
    }

    #[test]
    fn test_below_grid_is_lava_even_over_walls() {
        let mut grid = open_grid(5, 5);
        grid[4] = vec![Some(Obstacle::Wall); 5];
        let level = LevelMap::new(grid, Vec::new());
        let hit = level
            .obstacle_at(Vector::new(1.0, 4.5), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(hit, Some(Obstacle::Lava));
    }

    #[test]
    fn test_sideways_exit_beats_lava() {
        let level = LevelMap::new(open_grid(5, 5), Vec::new());
        // Off the left and below the bottom at once
        let hit = level
            .obstacle_at(Vector::new(-1.0, 4.5), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(hit, Some(Obstacle::Wall));
    }

    #[test]
    fn test_obstacle_scan_row_major() {
        let mut grid = open_grid(5, 5);
        grid[1][2] = Some(Obstacle::Lava);
        grid[2][1] = Some(Obstacle::Wall);
        let level = LevelMap::new(grid, Vec::new());

        // Probe covering cells (1..3, 1..3) hits row 1 first
        let hit = level
            .obstacle_at(Vector::new(1.5, 1.5), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(hit, Some(Obstacle::Lava));

        let clear = level
            .obstacle_at(Vector::new(3.0, 3.0), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(clear, None);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let grid = vec![vec![None; 4], vec![Some(Obstacle::Wall)]];
        let level = LevelMap::new(grid, Vec::new());
        let hit = level
            .obstacle_at(Vector::new(2.0, 1.0), Vector::new(1.0, 1.0))
            .unwrap();
        assert_eq!(hit, None);
    }

    #[test]
    fn test_obstacle_validation_needs_both_malformed() {
        let level = LevelMap::new(open_grid(5, 5), Vec::new());
        let bad = Vector::new(f32::NAN, f32::NAN);
        assert!(matches!(
            level.obstacle_at(bad, bad),
            Err(GameError::MissingArgument(_))
        ));
        // One malformed vector alone falls through
        assert!(level.obstacle_at(bad, Vector::new(1.0, 1.0)).is_ok());
        assert!(level.obstacle_at(Vector::new(1.0, 1.0), bad).is_ok());
    }

    #[test]
    fn test_entity_at_returns_first_overlap() {
        let a = Body::generic(Vector::new(1.0, 1.0)).unwrap();
        let b = Body::generic(Vector::new(1.5, 1.0)).unwrap();
        let (a_id, b_id) = (a.id(), b.id());
        let level = LevelMap::new(open_grid(5, 5), vec![a, b]);

        let probe = Body::generic(Vector::new(1.2, 1.2)).unwrap();
        assert_eq!(level.entity_at(&probe).map(Body::id), Some(a_id));

        let probe = Body::generic(Vector::new(2.2, 1.0)).unwrap();
        assert_eq!(level.entity_at(&probe).map(Body::id), Some(b_id));

        let probe = Body::generic(Vector::new(3.0, 3.0)).unwrap();
        assert!(level.entity_at(&probe).is_none());

        // An entity does not find itself
        let own = level.entities()[0].clone();
        assert_eq!(level.entity_at(&own).map(Body::id), Some(b_id));
    }

    #[test]
    fn test_remove_and_kind_queries() {
        let coin = coin_at(1.0, 1.0);
        let id = coin.id();
        let mut level = LevelMap::new(open_grid(5, 5), vec![coin]);
        assert!(!level.no_more_of_kind(ActorKind::Collectible));
        assert!(level.no_more_of_kind(ActorKind::Projectile));

        assert!(level.remove_entity(id).is_some());
        assert!(level.no_more_of_kind(ActorKind::Collectible));
        // Second removal is a no-op
        assert!(level.remove_entity(id).is_none());
    }

    #[test]
    fn test_lava_loses() {
        let mut level = LevelMap::new(open_grid(2, 2), Vec::new());
        level.resolve_touch(Obstacle::Lava.into(), None);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_projectile_loses_even_after_win() {
        let coin = coin_at(0.0, 0.0);
        let id = coin.id();
        let mut level = LevelMap::new(open_grid(2, 2), vec![coin]);
        level.resolve_touch(ActorKind::Collectible.into(), Some(id));
        assert_eq!(level.status(), Some(Status::Won));

        level.resolve_touch(ActorKind::Projectile.into(), None);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_last_collectible_wins() {
        let first = coin_at(0.0, 0.0);
        let second = coin_at(1.0, 0.0);
        let (first_id, second_id) = (first.id(), second.id());
        let mut level = LevelMap::new(open_grid(3, 3), vec![first, second]);

        level.resolve_touch(ActorKind::Collectible.into(), Some(first_id));
        assert_eq!(level.status(), None);
        assert_eq!(level.entities().len(), 1);

        level.resolve_touch(ActorKind::Collectible.into(), Some(second_id));
        assert_eq!(level.status(), Some(Status::Won));
        assert!(level.entities().is_empty());
    }

    #[test]
    fn test_collectible_wins_after_loss() {
        let coin = coin_at(0.0, 0.0);
        let id = coin.id();
        let mut level = LevelMap::new(open_grid(2, 2), vec![coin]);
        level.resolve_touch(Obstacle::Lava.into(), None);
        assert_eq!(level.status(), Some(Status::Lost));

        level.resolve_touch(ActorKind::Collectible.into(), Some(id));
        assert_eq!(level.status(), Some(Status::Won));
    }

    #[test]
    fn test_wall_and_generic_touch_do_nothing() {
        let mut level = LevelMap::new(open_grid(2, 2), Vec::new());
        level.resolve_touch(Obstacle::Wall.into(), None);
        level.resolve_touch(ActorKind::Generic.into(), None);
        level.resolve_touch(ActorKind::Player.into(), None);
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_finish_waits_for_delay() {
        let mut level = LevelMap::new(open_grid(2, 2), Vec::new());
        // No outcome: countdown never starts
        level.advance_completion(5.0);
        assert_eq!(level.completion_delay(), 1.0);
        assert!(!level.is_finished());

        level.resolve_touch(Obstacle::Lava.into(), None);
        assert!(!level.is_finished());

        level.advance_completion(0.5);
        assert!(!level.is_finished());
        level.advance_completion(0.5);
        // Exactly zero is not yet below zero
        assert!(!level.is_finished());
        level.advance_completion(0.01);
        assert!(level.is_finished());
    }

    #[test]
    fn test_act_entities_updates_in_place() {
        let projectile = actors::projectile(Vector::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        let inert = Body::generic(Vector::new(3.0, 3.0)).unwrap();
        let mut level = LevelMap::new(open_grid(5, 5), vec![projectile, inert]);
        level.act_entities(1.0).unwrap();
        assert_eq!(level.entities()[0].pos, Vector::new(1.0, 0.0));
        assert_eq!(level.entities()[1].pos, Vector::new(3.0, 3.0));
        assert_eq!(level.entities()[1].behavior, Behavior::Inert);
    }
}
