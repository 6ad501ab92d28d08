use crate::geometry::{Plane, Ray};

use super::{Point3, TOLERANCE};

/// Relationship of a ray with a plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayPlaneRelation {
    /// Ray meets the plane at a single point in front of its origin.
    Point { point: Point3, t: f64 },
    /// Ray is parallel to the plane and does not touch it.
    Parallel,
    /// Ray lies entirely on the plane.
    OnPlane,
    /// The supporting line meets the plane behind the ray origin.
    Behind,
}

impl RayPlaneRelation {
    /// Returns the single point the ray shares with the plane, if any.
    ///
    /// A ray lying on the plane yields its own origin.
    #[must_use]
    pub fn point(&self, ray: &Ray) -> Option<Point3> {
        match *self {
            Self::Point { point, .. } => Some(point),
            Self::OnPlane => Some(*ray.origin()),
            Self::Parallel | Self::Behind => None,
        }
    }
}

/// Computes the intersection of a ray with a plane.
#[must_use]
pub fn ray_plane_intersect(ray: &Ray, plane: &Plane) -> RayPlaneRelation {
    let normal = plane.plane_normal();
    let denom = normal.dot(ray.direction());
    let numer = normal.dot(&(plane.origin() - ray.origin()));

    if denom.abs() < TOLERANCE {
        if numer.abs() < TOLERANCE {
            RayPlaneRelation::OnPlane
        } else {
            RayPlaneRelation::Parallel
        }
    } else {
        let t = numer / denom;
        if t < 0.0 {
            RayPlaneRelation::Behind
        } else {
            RayPlaneRelation::Point { point: ray.at(t), t }
        }
    }
}

/// Returns the nearest non-negative ray parameter at which the ray meets a
/// sphere, or `None` when it misses.
///
/// A ray starting inside the sphere hits the far wall.
#[must_use]
pub fn ray_sphere_intersect(ray: &Ray, center: &Point3, radius: f64) -> Option<f64> {
    let to_center = center - ray.origin();
    let tca = to_center.dot(ray.direction());
    let d2 = to_center.dot(&to_center) - tca * tca;
    let r2 = radius * radius;
    if d2 > r2 {
        return None;
    }
    let thc = (r2 - d2).sqrt();
    let t0 = tca - thc;
    let t1 = tca + thc;
    if t1 < 0.0 {
        return None;
    }
    Some(if t0 < 0.0 { t1 } else { t0 })
}
