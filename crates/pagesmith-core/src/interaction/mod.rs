//! Drag and resize gesture tracking.
//!
//! Controllers hold only the transient gesture state; the items they act on
//! are passed in on every call, so hosts can keep items wherever they like.

mod drag;
mod pointer;
mod resize;

pub use drag::DragController;
pub use pointer::PointerEvent;
pub use resize::{ResizeController, ResizeDirection};
