mod deform;
mod thickness;

pub use deform::Deform;
pub use thickness::{ThicknessField, ARCH_END, ARCH_START};
