//! Picking and the hover/drag lifecycle of the control handles.

mod controller;
mod picking;

pub use controller::{
    CursorHint, DragSession, HandleState, InteractionController, InteractionEvent,
};
pub use picking::{pick_handle, PickHit};
