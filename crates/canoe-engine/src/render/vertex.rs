use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position followed by texture coordinate.
///
/// Buffers are uploaded as `&[Vertex]`, so their byte length is always a
/// whole number of 20-byte strides.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// One entry of the fixed attribute layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: i32,
    pub offset: i32,
}

impl Vertex {
    pub const STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

    /// Location 0 is `point`, location 1 is `texPointIn`.
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            index: 0,
            components: 3,
            offset: std::mem::offset_of!(Vertex, position) as i32,
        },
        VertexAttribute {
            index: 1,
            components: 2,
            offset: std::mem::offset_of!(Vertex, tex_coord) as i32,
        },
    ];

    pub const fn new(position: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, tex_coord }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_shader_inputs() {
        assert_eq!(Vertex::STRIDE, 20);
        assert_eq!(Vertex::ATTRIBUTES[0], VertexAttribute { index: 0, components: 3, offset: 0 });
        assert_eq!(Vertex::ATTRIBUTES[1], VertexAttribute { index: 1, components: 2, offset: 12 });
    }

    #[test]
    fn byte_view_is_a_multiple_of_the_stride() {
        let verts = [Vertex::new([0.0; 3], [0.0; 2]); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len() % Vertex::STRIDE as usize, 0);
        assert_eq!(bytes.len() / std::mem::size_of::<f32>(), 15);
    }
}
