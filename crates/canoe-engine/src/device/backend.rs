use std::fmt::Debug;
use std::hash::Hash;

/// Driver hint sent with every buffer upload.
///
/// Entity buffers are rewritten every update, so they always use `Dynamic`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    Static,
    Dynamic,
}

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// GL-class command surface.
///
/// Methods map one-to-one onto driver calls and perform no state tracking of
/// their own. Binding discipline and resource accounting live in
/// [`GraphicsContext`](super::GraphicsContext); nothing outside the `device`
/// module talks to a backend directly.
///
/// Calls that act on "the current object" (`array_buffer_data`,
/// `vertex_attrib_pointer_f32`, `texture_2d_*`, `draw_triangles`) operate on
/// whatever the last corresponding `bind_*` call selected.
pub trait Backend {
    type Buffer: Copy + Eq + Hash + Debug;
    type VertexArray: Copy + Eq + Hash + Debug;
    type Texture: Copy + Eq + Hash + Debug;
    type Shader: Copy + Eq + Hash + Debug;
    type Program: Copy + Eq + Hash + Debug;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&mut self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&mut self, buffer: Option<Self::Buffer>);
    /// Replaces the full contents of the bound array buffer.
    fn array_buffer_data(&mut self, data: &[u8], usage: BufferUsage);
    fn delete_buffer(&mut self, buffer: Self::Buffer);

    // ── vertex arrays ─────────────────────────────────────────────────────

    fn create_vertex_array(&mut self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&mut self, array: Option<Self::VertexArray>);
    /// Describes a float attribute sourced from the bound array buffer.
    fn vertex_attrib_pointer_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32);
    fn enable_vertex_attrib_array(&mut self, index: u32);
    fn delete_vertex_array(&mut self, array: Self::VertexArray);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&mut self) -> Result<Self::Texture, String>;
    fn active_texture_unit(&mut self, unit: u32);
    fn bind_texture_2d(&mut self, texture: Option<Self::Texture>);
    fn texture_2d_wrap(&mut self, s: TextureWrap, t: TextureWrap);
    fn texture_2d_filter(&mut self, min: TextureFilter, mag: TextureFilter);
    fn texture_2d_image_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]);
    fn generate_mipmap_2d(&mut self);
    fn delete_texture(&mut self, texture: Self::Texture);

    // ── shaders / programs ────────────────────────────────────────────────

    fn create_shader(&mut self, kind: ShaderKind) -> Result<Self::Shader, String>;
    fn shader_source(&mut self, shader: Self::Shader, source: &str);
    fn compile_shader(&mut self, shader: Self::Shader);
    fn shader_compile_status(&mut self, shader: Self::Shader) -> bool;
    fn shader_info_log(&mut self, shader: Self::Shader) -> String;
    fn delete_shader(&mut self, shader: Self::Shader);

    fn create_program(&mut self) -> Result<Self::Program, String>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn bind_attrib_location(&mut self, program: Self::Program, index: u32, name: &str);
    fn link_program(&mut self, program: Self::Program);
    fn program_link_status(&mut self, program: Self::Program) -> bool;
    fn program_info_log(&mut self, program: Self::Program) -> String;
    fn use_program(&mut self, program: Option<Self::Program>);
    fn delete_program(&mut self, program: Self::Program);

    // ── frame ─────────────────────────────────────────────────────────────

    fn clear_color(&mut self, rgba: [f32; 4]);
    fn clear_color_buffer(&mut self);
    fn draw_triangles(&mut self, first: i32, count: i32);
}
