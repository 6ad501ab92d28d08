use std::f64::consts::PI;

use crate::contour::Bounds;
use crate::math::Point2;
use crate::params::MeshParameters;

/// Lower edge of the longitudinal arch band, as a fraction of foot length.
pub const ARCH_START: f64 = 0.3;
/// Upper edge of the longitudinal arch band.
pub const ARCH_END: f64 = 0.7;
/// Lateral distance (contour units) at which `center_distance` reaches 1.
const ARCH_LATERAL_REACH: f64 = 100.0;

/// Scalar shell thickness over the planform: a heel-to-toe linear gradient
/// plus a bell-shaped arch bump in the midfoot band.
///
/// The field trusts its parameters; it applies no floor, so a negative
/// `arch_height` passed by direct field assignment can yield a negative
/// thickness.
#[derive(Debug, Clone, Copy)]
pub struct ThicknessField {
    heel: f64,
    toe: f64,
    arch_height: f64,
    bounds: Bounds,
}

impl ThicknessField {
    #[must_use]
    pub fn new(params: &MeshParameters, bounds: Bounds) -> Self {
        Self {
            heel: params.heel_thickness,
            toe: params.toe_thickness,
            arch_height: params.arch_height,
            bounds,
        }
    }

    /// Thickness at a boundary point, in contour units.
    #[must_use]
    pub fn thickness(&self, point: &Point2) -> f64 {
        let relative_y = self.bounds.relative_y(point.y);
        self.base(relative_y) + self.arch_bump(relative_y, point.x)
    }

    /// Heel-to-toe linear interpolation; exact at both ends.
    #[must_use]
    pub fn base(&self, relative_y: f64) -> f64 {
        if relative_y >= 1.0 {
            return self.toe;
        }
        self.heel + (self.toe - self.heel) * relative_y
    }

    /// Arch contribution. Zero at and outside `(ARCH_START, ARCH_END)`.
    #[must_use]
    pub fn arch_bump(&self, relative_y: f64, x: f64) -> f64 {
        if relative_y <= ARCH_START || relative_y >= ARCH_END {
            return 0.0;
        }
        let progress = (relative_y - ARCH_START) / (ARCH_END - ARCH_START);
        let curve = (progress * PI).sin();
        let center_distance = x.abs() / ARCH_LATERAL_REACH;
        let width = (1.0 - 2.0 * center_distance).max(0.0);
        self.arch_height * curve * width
    }

    /// Arch support factor in `[0, 0.8]` sized from the source's nominal foot
    /// length `l` and width `w`, with `y` measured from the heel.
    ///
    /// A smoother alternative to [`arch_bump`](Self::arch_bump): sine
    /// lengthwise, Gaussian across the width.
    #[must_use]
    pub fn arch_factor(x: f64, y: f64, length: f64, width: f64) -> f64 {
        let start = length * ARCH_START;
        let end = length * ARCH_END;
        let arch_width = width * 0.6;
        if end <= start || arch_width <= 0.0 {
            return 0.0;
        }
        if y < start || y > end || x.abs() > arch_width / 2.0 {
            return 0.0;
        }
        let length_factor = ((y - start) / (end - start) * PI).sin();
        let width_factor = (-(x / (arch_width / 4.0)).powi(2)).exp();
        length_factor * width_factor * 0.8
    }
}
