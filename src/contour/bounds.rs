use crate::math::{safe_ratio, Point2};

/// Axis-aligned planform bounds of a contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Computes the bounds of a point sequence, or `None` if it is empty.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(iter.fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        (self.min_x + self.max_x) * 0.5
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        (self.min_y + self.max_y) * 0.5
    }

    /// Extent along X (medial/lateral).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y (heel to toe).
    #[must_use]
    pub fn length(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Normalized longitudinal position: 0 at the heel extreme, 1 at the toe.
    ///
    /// Clamped to `[0, 1]`; a zero-length planform maps everything to 0.
    #[must_use]
    pub fn relative_y(&self, y: f64) -> f64 {
        safe_ratio(y - self.min_y, self.length()).clamp(0.0, 1.0)
    }
}
