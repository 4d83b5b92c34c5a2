//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The window session translates platform key events into `Key`/`KeyAction`.

mod state;
mod types;

pub use state::InputState;
pub use types::{FrameInput, Key, KeyAction, KeyResponse, Movement};
