//! Foot outline versions and the external contour source format.

mod bounds;
mod model;
mod source;

pub use bounds::Bounds;
pub use model::ContourModel;
pub use source::{ContourData, LoadContour, PointRecord};
