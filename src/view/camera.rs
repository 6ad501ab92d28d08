use crate::error::{GeometryError, Result};
use crate::geometry::Ray;
use crate::math::{Point2, Point3, Vector3, TOLERANCE};

/// Turns a pointer position into a pick ray and reports the view direction.
///
/// This is the seam to the external renderer's camera; [`PerspectiveCamera`]
/// is the implementation the core ships with.
pub trait RayCaster {
    /// Casts a ray from the eye through a pointer position given in
    /// normalized device coordinates (`[-1, 1]` on both axes, +Y up).
    ///
    /// # Errors
    ///
    /// Returns an error if the camera is degenerate.
    fn cast(&self, ndc: &Point2) -> Result<Ray>;

    /// Unit direction the camera looks along.
    fn view_direction(&self) -> Vector3;
}

/// Converts a pointer position in pixels (origin top-left) to normalized
/// device coordinates.
#[must_use]
pub fn screen_to_ndc(x: f64, y: f64, width: f64, height: f64) -> Point2 {
    Point2::new(
        (x / width.max(1.0)) * 2.0 - 1.0,
        -(y / height.max(1.0)) * 2.0 + 1.0,
    )
}

/// A look-at perspective camera.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Point3,
    pub target: Point3,
    pub up: Vector3,
    /// Vertical field of view in degrees.
    pub fov_y: f64,
    /// Viewport width over height.
    pub aspect: f64,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 2.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov_y: 75.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl PerspectiveCamera {
    /// Orthonormal `(forward, right, up)` frame of the camera.
    fn basis(&self) -> Result<(Vector3, Vector3, Vector3)> {
        let forward = self.target - self.position;
        if forward.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("camera target equals position".into()).into());
        }
        let forward = forward.normalize();
        let right = forward.cross(&self.up);
        if right.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("camera up is parallel to view".into()).into());
        }
        let right = right.normalize();
        let up = right.cross(&forward);
        Ok((forward, right, up))
    }

    /// Projects a scene point to normalized device coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera is degenerate or the point lies on or
    /// behind the eye plane.
    pub fn project(&self, point: &Point3) -> Result<Point2> {
        let (forward, right, up) = self.basis()?;
        let d = point - self.position;
        let depth = d.dot(&forward);
        if depth < TOLERANCE {
            return Err(GeometryError::Degenerate("point is behind the camera".into()).into());
        }
        let tan_half = (self.fov_y.to_radians() * 0.5).tan();
        Ok(Point2::new(
            d.dot(&right) / (depth * tan_half * self.aspect),
            d.dot(&up) / (depth * tan_half),
        ))
    }

    /// Moves position and target together.
    pub fn translate(&mut self, offset: &Vector3) {
        self.position += offset;
        self.target += offset;
    }
}

impl RayCaster for PerspectiveCamera {
    fn cast(&self, ndc: &Point2) -> Result<Ray> {
        let (forward, right, up) = self.basis()?;
        let tan_half = (self.fov_y.to_radians() * 0.5).tan();
        let dir = forward + right * (ndc.x * tan_half * self.aspect) + up * (ndc.y * tan_half);
        Ray::new(self.position, dir)
    }

    fn view_direction(&self) -> Vector3 {
        let forward = self.target - self.position;
        if forward.norm() < TOLERANCE {
            return -Vector3::z();
        }
        forward.normalize()
    }
}
