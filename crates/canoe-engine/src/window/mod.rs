//! Window session.
//!
//! Owns the `winit` event loop, the native window and its GL context, and
//! drives the render manager once per redraw.

mod config;
mod error;
mod gl;
mod keymap;
mod session;

pub use config::SessionConfig;
pub use error::WindowError;
pub use gl::GlTarget;
pub use keymap::{map_action, map_key};
pub use session::Session;
