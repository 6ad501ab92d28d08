pub mod contour;
pub mod error;
pub mod geometry;
pub mod handles;
pub mod interaction;
pub mod math;
pub mod operations;
pub mod params;
pub mod scene;
pub mod session;
pub mod tessellation;
pub mod view;

pub use error::{Result, SoleformError};
pub use session::{EditorMode, EditorSession};
