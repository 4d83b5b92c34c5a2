//! GPU resource wrappers.
//!
//! Each wrapper owns exactly one GPU object name and is released explicitly
//! with `delete(ctx)`. There is no `Drop`-based release: deletion needs the
//! context, and the context must still be current when it happens.
//!
//! Convention:
//! - vertex data is interleaved [`Vertex`] (position, texture coordinate)
//! - positions are normalized device coordinates

mod array;
mod buffer;
mod shader;
mod texture;
mod vertex;

pub use array::VertexArray;
pub use buffer::VertexBuffer;
pub use shader::{ShaderProgram, ShaderStage, ATTRIBUTE_LOCATIONS};
pub use texture::Texture;
pub use vertex::{Vertex, VertexAttribute};
