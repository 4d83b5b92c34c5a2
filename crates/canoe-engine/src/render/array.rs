use crate::device::{Backend, GraphicsContext, RenderError, VertexArrayBinding};

use super::vertex::Vertex;

/// Vertex array object.
///
/// Records how the array buffer bound at description time maps onto shader
/// inputs. The layout is [`Vertex::ATTRIBUTES`] and is described once.
#[derive(Debug)]
pub struct VertexArray<B: Backend> {
    handle: B::VertexArray,
}

impl<B: Backend> VertexArray<B> {
    pub fn create(ctx: &mut GraphicsContext<B>) -> Result<Self, RenderError> {
        let handle = ctx.create_vertex_array()?;
        Ok(Self { handle })
    }

    pub fn handle(&self) -> B::VertexArray {
        self.handle
    }

    pub fn bind<'c>(&self, ctx: &'c mut GraphicsContext<B>) -> VertexArrayBinding<'c, B> {
        ctx.bind_vertex_array(self.handle)
    }

    /// Describes the interleaved [`Vertex`] layout against the currently bound
    /// array buffer. The caller must have bound the source buffer.
    pub fn describe_vertex_layout(&self, ctx: &mut GraphicsContext<B>) {
        let mut bound = self.bind(ctx);
        for attr in Vertex::ATTRIBUTES {
            bound.attrib_pointer_f32(attr.index, attr.components, Vertex::STRIDE, attr.offset);
        }
    }

    pub fn delete(self, ctx: &mut GraphicsContext<B>) {
        ctx.delete_vertex_array(self.handle);
    }
}
