//! 2D geometry primitives for cover placement
//!
//! Everything here works in right angles only: covers move along one of
//! the four cardinal directions, so rotations are always multiples of 90
//! degrees. A non-right angle is a caller bug and fails fast.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("rotation angle must be a multiple of 90 degrees (angle={angle})")]
    InvalidAngle { angle: i32 },
}

/// A 2D point or vector in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rotation by a whole number of quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Quarter {
    /// Parse a degree value; 360 and 0 are equivalent
    pub fn from_degrees(angle: i32) -> Result<Self, GeometryError> {
        match angle {
            0 | 360 => Ok(Quarter::Deg0),
            90 => Ok(Quarter::Deg90),
            180 => Ok(Quarter::Deg180),
            270 => Ok(Quarter::Deg270),
            _ => Err(GeometryError::InvalidAngle { angle }),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Quarter::Deg0 => 0,
            Quarter::Deg90 => 90,
            Quarter::Deg180 => 180,
            Quarter::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one
    pub fn inverse(self) -> Quarter {
        match self {
            Quarter::Deg0 => Quarter::Deg0,
            Quarter::Deg90 => Quarter::Deg270,
            Quarter::Deg180 => Quarter::Deg180,
            Quarter::Deg270 => Quarter::Deg90,
        }
    }

    /// Rotate a vector counter-screenwise by this quarter turn
    pub fn rotate(self, v: Vec2) -> Vec2 {
        match self {
            Quarter::Deg0 => v,
            Quarter::Deg90 => Vec2::new(-v.y, v.x),
            Quarter::Deg180 => Vec2::new(-v.x, -v.y),
            Quarter::Deg270 => Vec2::new(v.y, -v.x),
        }
    }

    /// Rotate a vector back into local coordinates (exact inverse of [`rotate`](Self::rotate))
    pub fn rotate_back(self, v: Vec2) -> Vec2 {
        self.inverse().rotate(v)
    }

    /// Swap the axes of a size when the rotation turns the movement axis sideways
    pub fn switch_axis(self, v: Vec2) -> Vec2 {
        match self {
            Quarter::Deg90 | Quarter::Deg270 => Vec2::new(v.y, v.x),
            Quarter::Deg0 | Quarter::Deg180 => v,
        }
    }
}

/// Rotate `v` by `angle` degrees, which must be a multiple of 90
pub fn rotate_ortho(v: Vec2, angle: i32) -> Result<Vec2, GeometryError> {
    Ok(Quarter::from_degrees(angle)?.rotate(v))
}

/// Exact inverse of [`rotate_ortho`]
pub fn rotate_back_ortho(v: Vec2, angle: i32) -> Result<Vec2, GeometryError> {
    Ok(Quarter::from_degrees(angle)?.rotate_back(v))
}

/// Swap width/height when `angle` is 90 or 270; identity otherwise
pub fn switch_axis(v: Vec2, angle: i32) -> Result<Vec2, GeometryError> {
    Ok(Quarter::from_degrees(angle)?.switch_axis(v))
}
