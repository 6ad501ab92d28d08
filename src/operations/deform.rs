use tracing::debug;

use crate::contour::{Bounds, ContourModel};
use crate::handles::HandleId;
use crate::math::{safe_ratio, Point2, Vector3};

/// Reshapes a contour by dragging one semantic handle.
///
/// Each handle stretches only its own half of the planform, with the
/// displacement falling off linearly from the far extreme to the centre
/// line. `delta` is the scene-space handle displacement; `unit_scale`
/// converts it back to contour units.
pub struct Deform {
    handle: HandleId,
    delta: Vector3,
    unit_scale: f64,
}

impl Deform {
    /// Creates a new `Deform` operation.
    #[must_use]
    pub fn new(handle: HandleId, delta: Vector3, unit_scale: f64) -> Self {
        Self {
            handle,
            delta,
            unit_scale,
        }
    }

    /// Expansion in contour units along the handle's axis.
    ///
    /// Toe and heel read the scene depth axis, which points opposite to
    /// contour `y`; left and right read scene `x` directly.
    #[must_use]
    pub fn expansion(&self) -> f64 {
        match self.handle {
            HandleId::Toe | HandleId::Heel => -self.delta.z / self.unit_scale,
            HandleId::Left | HandleId::Right => self.delta.x / self.unit_scale,
        }
    }

    /// Executes the deformation, returning a new contour version.
    ///
    /// The input is never modified. A zero expansion yields a point-for-point
    /// copy.
    #[must_use]
    pub fn execute(&self, contour: &ContourModel) -> ContourModel {
        let expansion = self.expansion();
        let Some(bounds) = contour.bounds() else {
            return contour.clone();
        };
        if expansion == 0.0 || !expansion.is_finite() {
            return contour.clone();
        }

        debug!(handle = %self.handle, expansion, "deforming contour");

        let warp = |p: &Point2| warp_point(self.handle, expansion, &bounds, *p);
        let outer = contour.outer().iter().map(warp).collect();
        let inner = contour.inner().iter().map(warp).collect();
        contour.with_points(outer, inner)
    }
}

fn warp_point(handle: HandleId, expansion: f64, b: &Bounds, p: Point2) -> Point2 {
    let (cx, cy) = (b.center_x(), b.center_y());
    match handle {
        HandleId::Toe if p.y >= cy => {
            Point2::new(p.x, p.y + expansion * safe_ratio(p.y - cy, b.max_y - cy))
        }
        HandleId::Heel if p.y <= cy => {
            Point2::new(p.x, p.y + expansion * safe_ratio(cy - p.y, cy - b.min_y))
        }
        HandleId::Left if p.x <= cx => {
            Point2::new(p.x + expansion * safe_ratio(cx - p.x, cx - b.min_x), p.y)
        }
        HandleId::Right if p.x >= cx => {
            Point2::new(p.x + expansion * safe_ratio(p.x - cx, b.max_x - cx), p.y)
        }
        _ => p,
    }
}
