use bytemuck::Pod;

use crate::device::{Backend, BufferBinding, BufferUsage, GraphicsContext, RenderError};

/// Vertex buffer object.
///
/// Owns one GPU buffer name. Uploads always replace the full contents; there
/// are no sub-range updates. Not `Clone`: exactly one owner deletes the name.
#[derive(Debug)]
pub struct VertexBuffer<B: Backend> {
    handle: B::Buffer,
    len_bytes: usize,
}

impl<B: Backend> VertexBuffer<B> {
    pub fn create(ctx: &mut GraphicsContext<B>) -> Result<Self, RenderError> {
        let handle = ctx.create_buffer()?;
        Ok(Self {
            handle,
            len_bytes: 0,
        })
    }

    pub fn handle(&self) -> B::Buffer {
        self.handle
    }

    /// Size of the last upload.
    pub fn len_bytes(&self) -> usize {
        self.len_bytes
    }

    /// Binds this buffer as the array buffer until the guard ends.
    pub fn bind<'c>(&self, ctx: &'c mut GraphicsContext<B>) -> BufferBinding<'c, B> {
        ctx.bind_array_buffer(self.handle)
    }

    /// Binds, replaces the contents with `data`, and restores the previous
    /// array buffer binding.
    pub fn upload<T: Pod>(&mut self, ctx: &mut GraphicsContext<B>, data: &[T], usage: BufferUsage) {
        let mut bound = self.bind(ctx);
        bound.upload(data, usage);
        self.len_bytes = std::mem::size_of_val(data);
    }

    pub fn delete(self, ctx: &mut GraphicsContext<B>) {
        ctx.delete_buffer(self.handle);
    }
}
