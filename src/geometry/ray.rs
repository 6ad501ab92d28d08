use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// A half-line `origin + t * direction` for `t >= 0`, with unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Creates a ray, normalizing the direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the direction is zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Creates a ray pointing from `origin` towards `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if the two points coincide.
    pub fn through(origin: Point3, target: Point3) -> Result<Self> {
        Self::new(origin, target - origin)
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Evaluates the ray at parameter `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
