//! Scoped binding guards.
//!
//! Each guard records what was bound before it, binds its object, and puts the
//! previous binding back on drop. Guards deref to the context, so bindings can
//! nest; the borrow checker guarantees they unwind in reverse order.

use std::ops::{Deref, DerefMut};

use bytemuck::Pod;

use super::backend::{Backend, BufferUsage, TextureFilter, TextureWrap};
use super::context::GraphicsContext;

// ── array buffer ──────────────────────────────────────────────────────────

/// Array buffer bound for the guard's lifetime.
pub struct BufferBinding<'c, B: Backend> {
    ctx: &'c mut GraphicsContext<B>,
    buffer: B::Buffer,
    previous: Option<B::Buffer>,
}

impl<'c, B: Backend> BufferBinding<'c, B> {
    pub(super) fn new(ctx: &'c mut GraphicsContext<B>, buffer: B::Buffer) -> Self {
        let previous = ctx.bindings.array_buffer;
        ctx.set_array_buffer(Some(buffer));
        Self {
            ctx,
            buffer,
            previous,
        }
    }

    pub fn buffer(&self) -> B::Buffer {
        self.buffer
    }

    /// Replaces the whole buffer store with `data`.
    pub fn upload<T: Pod>(&mut self, data: &[T], usage: BufferUsage) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        log::trace!("upload {} bytes to buffer {:?}", bytes.len(), self.buffer);
        self.ctx.backend.array_buffer_data(bytes, usage);
    }
}

impl<B: Backend> Drop for BufferBinding<'_, B> {
    fn drop(&mut self) {
        self.ctx.set_array_buffer(self.previous);
    }
}

// ── vertex array ──────────────────────────────────────────────────────────

/// Vertex array bound for the guard's lifetime.
pub struct VertexArrayBinding<'c, B: Backend> {
    ctx: &'c mut GraphicsContext<B>,
    array: B::VertexArray,
    previous: Option<B::VertexArray>,
}

impl<'c, B: Backend> VertexArrayBinding<'c, B> {
    pub(super) fn new(ctx: &'c mut GraphicsContext<B>, array: B::VertexArray) -> Self {
        let previous = ctx.bindings.vertex_array;
        ctx.set_vertex_array(Some(array));
        Self {
            ctx,
            array,
            previous,
        }
    }

    pub fn array(&self) -> B::VertexArray {
        self.array
    }

    /// Records a float attribute sourced from the currently bound array buffer.
    pub fn attrib_pointer_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        debug_assert!(
            self.ctx.bindings.array_buffer.is_some(),
            "attribute {index} described with no array buffer bound"
        );
        self.ctx
            .backend
            .vertex_attrib_pointer_f32(index, components, stride, offset);
    }

    pub fn enable_attrib(&mut self, index: u32) {
        self.ctx.backend.enable_vertex_attrib_array(index);
    }

    /// Draws `count` vertices as a triangle list with the current program.
    pub fn draw_triangles(&mut self, first: i32, count: i32) {
        debug_assert!(
            self.ctx.bindings.program.is_some(),
            "draw issued with no program in use"
        );
        self.ctx.backend.draw_triangles(first, count);
    }
}

impl<B: Backend> Drop for VertexArrayBinding<'_, B> {
    fn drop(&mut self) {
        self.ctx.set_vertex_array(self.previous);
    }
}

// ── texture ───────────────────────────────────────────────────────────────

/// 2D texture bound on one texture unit for the guard's lifetime.
///
/// The unit stays active while the guard lives; on drop the unit's previous
/// texture and the previously active unit are restored.
pub struct TextureBinding<'c, B: Backend> {
    ctx: &'c mut GraphicsContext<B>,
    unit: u32,
    texture: B::Texture,
    previous_unit: u32,
    previous: Option<B::Texture>,
}

impl<'c, B: Backend> TextureBinding<'c, B> {
    pub(super) fn new(ctx: &'c mut GraphicsContext<B>, unit: u32, texture: B::Texture) -> Self {
        let previous_unit = ctx.bindings.active_unit;
        ctx.set_active_unit(unit);
        let previous = ctx.bound_texture_2d(unit);
        ctx.set_texture_2d(Some(texture));
        Self {
            ctx,
            unit,
            texture,
            previous_unit,
            previous,
        }
    }

    pub fn texture(&self) -> B::Texture {
        self.texture
    }

    pub fn set_wrap(&mut self, s: TextureWrap, t: TextureWrap) {
        self.ctx.backend.texture_2d_wrap(s, t);
    }

    pub fn set_filter(&mut self, min: TextureFilter, mag: TextureFilter) {
        self.ctx.backend.texture_2d_filter(min, mag);
    }

    /// Uploads level 0 as RGBA8. `pixels` must hold `width * height * 4` bytes.
    pub fn upload_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        self.ctx.backend.texture_2d_image_rgba8(width, height, pixels);
    }

    pub fn generate_mipmaps(&mut self) {
        self.ctx.backend.generate_mipmap_2d();
    }
}

impl<B: Backend> Drop for TextureBinding<'_, B> {
    fn drop(&mut self) {
        self.ctx.set_active_unit(self.unit);
        self.ctx.set_texture_2d(self.previous);
        self.ctx.set_active_unit(self.previous_unit);
    }
}

// ── program ───────────────────────────────────────────────────────────────

/// Program in use for the guard's lifetime.
pub struct ProgramBinding<'c, B: Backend> {
    ctx: &'c mut GraphicsContext<B>,
    program: B::Program,
    previous: Option<B::Program>,
}

impl<'c, B: Backend> ProgramBinding<'c, B> {
    pub(super) fn new(ctx: &'c mut GraphicsContext<B>, program: B::Program) -> Self {
        let previous = ctx.bindings.program;
        ctx.set_program(Some(program));
        Self {
            ctx,
            program,
            previous,
        }
    }

    pub fn program(&self) -> B::Program {
        self.program
    }
}

impl<B: Backend> Drop for ProgramBinding<'_, B> {
    fn drop(&mut self) {
        self.ctx.set_program(self.previous);
    }
}

// ── deref to the context ──────────────────────────────────────────────────

macro_rules! deref_to_context {
    ($($guard:ident),* $(,)?) => {$(
        impl<B: Backend> Deref for $guard<'_, B> {
            type Target = GraphicsContext<B>;

            fn deref(&self) -> &Self::Target {
                self.ctx
            }
        }

        impl<B: Backend> DerefMut for $guard<'_, B> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                self.ctx
            }
        }
    )*};
}

deref_to_context!(BufferBinding, VertexArrayBinding, TextureBinding, ProgramBinding);
