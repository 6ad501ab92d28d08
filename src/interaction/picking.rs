use crate::geometry::Ray;
use crate::handles::{HandleId, HandleSet};
use crate::math::intersect_3d::ray_sphere_intersect;
use crate::math::Point3;

/// A successful pick against a handle's sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub handle: HandleId,
    /// Point where the ray enters the pick sphere.
    pub point: Point3,
    /// Distance along the ray.
    pub distance: f64,
}

/// Tests the ray against all four handles; the nearest hit wins.
#[must_use]
pub fn pick_handle(ray: &Ray, handles: &HandleSet, radius: f64) -> Option<PickHit> {
    handles
        .iter()
        .filter_map(|h| {
            ray_sphere_intersect(ray, &h.current_position, radius).map(|t| PickHit {
                handle: h.id,
                point: ray.at(t),
                distance: t,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
