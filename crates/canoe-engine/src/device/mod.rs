//! Graphics device layer.
//!
//! This module is responsible for:
//! - the `Backend` command surface and its implementations (glow, headless)
//! - the `GraphicsContext` that owns binding state and resource accounting
//! - scoped binding guards that restore previous bindings on every exit path

mod backend;
mod binding;
mod context;
mod error;
mod glow_backend;
mod headless;
mod stats;

pub use backend::{Backend, BufferUsage, ShaderKind, TextureFilter, TextureWrap};
pub use binding::{BufferBinding, ProgramBinding, TextureBinding, VertexArrayBinding};
pub use context::GraphicsContext;
pub use error::RenderError;
pub use glow_backend::GlowBackend;
pub use headless::{Call, HeadlessBackend};
pub use stats::{ResourceCounts, ResourceStats};
