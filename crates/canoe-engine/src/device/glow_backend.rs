use glow::HasContext;

use super::backend::{Backend, BufferUsage, ShaderKind, TextureFilter, TextureWrap};

/// [`Backend`] over a loaded `glow` context.
pub struct GlowBackend {
    gl: glow::Context,
}

impl GlowBackend {
    /// Wraps a loaded GL function table.
    ///
    /// # Safety
    ///
    /// `gl` must have been loaded for a context that is current on the calling
    /// thread, and that context must stay current for every call issued
    /// through this backend.
    pub unsafe fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// Returns the driver version string for diagnostics.
    pub fn version_string(&self) -> String {
        let v = self.gl.version();
        format!("{}.{} {}", v.major, v.minor, v.vendor_info)
    }
}

fn usage_enum(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
    }
}

fn wrap_enum(wrap: TextureWrap) -> i32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT as i32,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
    }
}

fn filter_enum(filter: TextureFilter) -> i32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST as i32,
        TextureFilter::Linear => glow::LINEAR as i32,
    }
}

fn shader_enum(kind: ShaderKind) -> u32 {
    match kind {
        ShaderKind::Vertex => glow::VERTEX_SHADER,
        ShaderKind::Fragment => glow::FRAGMENT_SHADER,
    }
}

// Every `unsafe` block below relies on the contract of `GlowBackend::new`:
// the context is current on this thread. Object handles come from the same
// context and are only passed back while alive (tracked by `GraphicsContext`).
impl Backend for GlowBackend {
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Texture = glow::Texture;
    type Shader = glow::Shader;
    type Program = glow::Program;

    fn create_buffer(&mut self) -> Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_array_buffer(&mut self, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&mut self, data: &[u8], usage: BufferUsage) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, data, usage_enum(usage))
        }
    }

    fn delete_buffer(&mut self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn create_vertex_array(&mut self) -> Result<Self::VertexArray, String> {
        unsafe { self.gl.create_vertex_array() }
    }

    fn bind_vertex_array(&mut self, array: Option<Self::VertexArray>) {
        unsafe { self.gl.bind_vertex_array(array) }
    }

    fn vertex_attrib_pointer_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn delete_vertex_array(&mut self, array: Self::VertexArray) {
        unsafe { self.gl.delete_vertex_array(array) }
    }

    fn create_texture(&mut self) -> Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn active_texture_unit(&mut self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture_2d(&mut self, texture: Option<Self::Texture>) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, texture) }
    }

    fn texture_2d_wrap(&mut self, s: TextureWrap, t: TextureWrap) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap_enum(s));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap_enum(t));
        }
    }

    fn texture_2d_filter(&mut self, min: TextureFilter, mag: TextureFilter) {
        unsafe {
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter_enum(min));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter_enum(mag));
        }
    }

    fn texture_2d_image_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn generate_mipmap_2d(&mut self) {
        unsafe { self.gl.generate_mipmap(glow::TEXTURE_2D) }
    }

    fn delete_texture(&mut self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn create_shader(&mut self, kind: ShaderKind) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(shader_enum(kind)) }
    }

    fn shader_source(&mut self, shader: Self::Shader, source: &str) {
        unsafe { self.gl.shader_source(shader, source) }
    }

    fn compile_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl.compile_shader(shader) }
    }

    fn shader_compile_status(&mut self, shader: Self::Shader) -> bool {
        unsafe { self.gl.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&mut self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&mut self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn bind_attrib_location(&mut self, program: Self::Program, index: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, index, name) }
    }

    fn link_program(&mut self, program: Self::Program) {
        unsafe { self.gl.link_program(program) }
    }

    fn program_link_status(&mut self, program: Self::Program) -> bool {
        unsafe { self.gl.get_program_link_status(program) }
    }

    fn program_info_log(&mut self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn delete_program(&mut self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        let [r, g, b, a] = rgba;
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_color_buffer(&mut self) {
        unsafe { self.gl.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, first, count) }
    }
}
