use crate::contour::ContourModel;
use crate::math::{Point2, Point3};

use super::Polyline;

/// Overlay polylines tracing a contour's boundaries just above the build
/// plane, in shell space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourLines {
    pub inner: Option<Polyline>,
    pub outer: Option<Polyline>,
}

impl ContourLines {
    /// Traces both boundaries at `elevation` (scene units). Empty boundaries
    /// produce no line.
    #[must_use]
    pub fn trace(contour: &ContourModel, unit_scale: f64, elevation: f64) -> Self {
        let line = |pts: &[Point2]| {
            (!pts.is_empty()).then(|| Polyline {
                points: pts
                    .iter()
                    .map(|p| Point3::new(p.x * unit_scale, p.y * unit_scale, elevation))
                    .collect(),
            })
        };
        Self {
            inner: line(contour.inner()),
            outer: line(contour.outer()),
        }
    }

    /// Iterates the lines that exist, inner first.
    pub fn iter(&self) -> impl Iterator<Item = &Polyline> {
        self.inner.iter().chain(self.outer.iter())
    }
}
