//! Camera state supplied to picking, and keyboard camera motion.

mod camera;
mod motion;

pub use camera::{screen_to_ndc, PerspectiveCamera, RayCaster};
pub use motion::{CameraMotion, MoveKey};
