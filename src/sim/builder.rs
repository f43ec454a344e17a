//! Text plan to `LevelMap` translation
//!
//! A plan is a list of rows; each character is either an obstacle symbol
//! (`x` wall, `!` lava), an entity symbol looked up in a `SymbolTable`, or
//! empty space.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actors;
use super::body::Body;
use super::level::{Grid, LevelMap, Obstacle};
use super::vector::Vector;
use crate::error::GameError;
use crate::settings::Settings;

/// Builds an entity at a grid position. The RNG seeds per-entity variation.
pub type EntityConstructor = fn(Vector, &mut Pcg32) -> Result<Body, GameError>;

/// Symbol to entity-constructor mapping
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    constructors: BTreeMap<char, EntityConstructor>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `@` player, `o` collectible, `v` resetting projectile,
    /// `|` vertical projectile, `=` horizontal projectile
    pub fn standard() -> Self {
        Self::new()
            .with('@', actors::player)
            .with('o', actors::collectible)
            .with('v', actors::resetting_projectile)
            .with('|', actors::vertical_projectile)
            .with('=', actors::horizontal_projectile)
    }

    pub fn with(mut self, symbol: char, constructor: EntityConstructor) -> Self {
        self.insert(symbol, constructor);
        self
    }

    /// Register a constructor, replacing any previous one for `symbol`
    pub fn insert(&mut self, symbol: char, constructor: EntityConstructor) {
        self.constructors.insert(symbol, constructor);
    }

    pub fn get(&self, symbol: char) -> Option<EntityConstructor> {
        self.constructors.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

/// Parses plans into levels
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    symbols: SymbolTable,
    rng: Pcg32,
}

impl LevelBuilder {
    pub fn new(symbols: SymbolTable) -> Self {
        Self::with_seed(symbols, 0)
    }

    /// Same seed and plan always produce the same level
    pub fn with_seed(symbols: SymbolTable, seed: u64) -> Self {
        Self {
            symbols,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn from_settings(symbols: SymbolTable, settings: &Settings) -> Self {
        Self::with_seed(symbols, settings.seed)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn actor_from_symbol(&self, symbol: char) -> Option<EntityConstructor> {
        self.symbols.get(symbol)
    }

    pub fn obstacle_from_symbol(symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    /// One obstacle classification per character, rows kept at their own length
    pub fn build_grid<S: AsRef<str>>(&self, plan: &[S]) -> Grid {
        plan.iter()
            .map(|row| row.as_ref().chars().map(Self::obstacle_from_symbol).collect())
            .collect()
    }

    /// Entities in row-major scan order, each placed at its cell's `(x, y)`
    pub fn build_entities<S: AsRef<str>>(&mut self, plan: &[S]) -> Result<Vec<Body>, GameError> {
        let mut entities = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                if let Some(constructor) = self.symbols.get(symbol) {
                    let pos = Vector::new(x as f32, y as f32);
                    entities.push(constructor(pos, &mut self.rng)?);
                }
            }
        }
        Ok(entities)
    }

    pub fn parse<S: AsRef<str>>(&mut self, plan: &[S]) -> Result<LevelMap, GameError> {
        let grid = self.build_grid(plan);
        let entities = self.build_entities(plan)?;
        Ok(LevelMap::new(grid, entities))
    }
}
