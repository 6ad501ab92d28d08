use crate::math::polygon_2d::{contains_point, signed_area_2d};
use crate::math::Point2;

use super::Bounds;

/// One immutable version of a foot outline.
///
/// `outer` and `inner` are the two boundary sequences as supplied by the
/// contour source. The mesh is built from [`combined`](Self::combined):
/// `outer` followed by `inner` reversed, read as a single closed loop.
///
/// A new version is produced by [`Deform`](crate::operations::Deform);
/// existing versions are never mutated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContourModel {
    outer: Vec<Point2>,
    inner: Vec<Point2>,
    /// Nominal foot length carried by the source, if any.
    length_hint: Option<f64>,
    /// Nominal foot width carried by the source, if any.
    width_hint: Option<f64>,
}

impl ContourModel {
    /// Creates a contour from its outer and inner boundaries.
    #[must_use]
    pub fn new(outer: Vec<Point2>, inner: Vec<Point2>) -> Self {
        Self {
            outer,
            inner,
            length_hint: None,
            width_hint: None,
        }
    }

    /// Attaches the nominal length/width the source supplied.
    #[must_use]
    pub fn with_hints(mut self, length: Option<f64>, width: Option<f64>) -> Self {
        self.length_hint = length;
        self.width_hint = width;
        self
    }

    #[must_use]
    pub fn outer(&self) -> &[Point2] {
        &self.outer
    }

    #[must_use]
    pub fn inner(&self) -> &[Point2] {
        &self.inner
    }

    #[must_use]
    pub fn length_hint(&self) -> Option<f64> {
        self.length_hint
    }

    #[must_use]
    pub fn width_hint(&self) -> Option<f64> {
        self.width_hint
    }

    /// Number of points in the combined loop.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.outer.len() + self.inner.len()
    }

    /// Returns `outer` followed by `inner` reversed.
    #[must_use]
    pub fn combined(&self) -> Vec<Point2> {
        let mut points = Vec::with_capacity(self.point_count());
        points.extend_from_slice(&self.outer);
        points.extend(self.inner.iter().rev().copied());
        points
    }

    /// Planform bounds over both boundaries, or `None` for an empty contour.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.outer.iter().chain(self.inner.iter()))
    }

    /// `true` when the combined loop winds counter-clockwise.
    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        signed_area_2d(&self.combined()) > 0.0
    }

    /// Even-odd containment test against the combined loop.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        contains_point(&self.combined(), point.x, point.y)
    }

    /// Builds a sibling version with replaced point sequences, keeping the
    /// source hints.
    #[must_use]
    pub(crate) fn with_points(&self, outer: Vec<Point2>, inner: Vec<Point2>) -> Self {
        Self {
            outer,
            inner,
            length_hint: self.length_hint,
            width_hint: self.width_hint,
        }
    }
}
