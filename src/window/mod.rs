pub mod chrome;
mod interact;
mod manager;
mod registry;

pub use interact::{DragState, ResizeState, apply_drag, apply_resize};
pub use manager::{ContentArea, ShellRequest, WindowManager, WindowOp};
pub use registry::{WindowId, WindowOptions, WindowRecord, WindowRegistry};
