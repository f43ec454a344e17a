//! Immutable 2D vector used for positions, sizes, speeds and offsets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A 2-component value type. Every operation returns a new vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Vec2);

impl Vector {
    pub const ZERO: Self = Self(Vec2::ZERO);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    /// Scale both components by `factor`
    #[inline]
    pub fn times(self, factor: f32) -> Vector {
        Self(self.0 * factor)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Reject vectors with NaN or infinite components
    pub fn checked(self, field: &'static str) -> Result<Vector, GameError> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(GameError::InvalidVector { field })
        }
    }
}
