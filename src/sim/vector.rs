//! 2D point/displacement value
//!
//! Thin wrapper over `glam::Vec2`: every operation returns a new value,
//! nothing is mutated in place.

use std::ops::{Add, Mul};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Immutable 2D vector in tile units (x grows right, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Vec2);

impl Vector {
    pub const ZERO: Self = Self(Vec2::ZERO);
    pub const ONE: Self = Self(Vec2::ONE);

    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        Self(self.0 + other.0)
    }

    /// Component-wise scale
    #[inline]
    pub fn times(self, scalar: f32) -> Vector {
        Self(self.0 * scalar)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        v.0
    }
}
