use std::collections::{HashMap, HashSet};

use super::backend::{Backend, BufferUsage, ShaderKind, TextureFilter, TextureWrap};

/// One recorded backend call.
///
/// Object names are the raw `u32` names handed out by [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    BindArrayBuffer(Option<u32>),
    BufferData { buffer: u32, bytes: usize, usage: BufferUsage },
    DeleteBuffer(u32),

    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribPointer { index: u32, components: i32, stride: i32, offset: i32 },
    EnableVertexAttribArray(u32),
    DeleteVertexArray(u32),

    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture2d(Option<u32>),
    TextureWrap(TextureWrap, TextureWrap),
    TextureFilter(TextureFilter, TextureFilter),
    TextureImage { width: u32, height: u32, bytes: usize },
    GenerateMipmap,
    DeleteTexture(u32),

    CreateShader(u32, ShaderKind),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    BindAttribLocation { program: u32, index: u32, name: String },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),

    ClearColor([f32; 4]),
    Clear,
    DrawTriangles { first: i32, count: i32 },
}

/// Recording [`Backend`] without a GPU.
///
/// Hands out increasing non-zero names, records every call in order and keeps
/// the last upload of each buffer so vertex data can be inspected. Shader
/// compilation and program linking succeed unless a failure was requested.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_name: u32,
    calls: Vec<Call>,

    live: HashSet<u32>,
    bound_array_buffer: Option<u32>,
    buffer_contents: HashMap<u32, Vec<u8>>,
    shader_kinds: HashMap<u32, ShaderKind>,

    compile_failure: Option<(ShaderKind, String)>,
    link_failure: Option<String>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every compilation of `kind` fail with `log`.
    pub fn with_compile_failure(mut self, kind: ShaderKind, log: impl Into<String>) -> Self {
        self.compile_failure = Some((kind, log.into()));
        self
    }

    /// Makes every program link fail with `log`.
    pub fn with_link_failure(mut self, log: impl Into<String>) -> Self {
        self.link_failure = Some(log.into());
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Names that were created and not yet deleted.
    pub fn live_names(&self) -> usize {
        self.live.len()
    }

    /// Last data uploaded to `buffer`.
    pub fn buffer_contents(&self, buffer: u32) -> Option<&[u8]> {
        self.buffer_contents.get(&buffer).map(Vec::as_slice)
    }

    fn alloc(&mut self) -> u32 {
        self.next_name += 1;
        self.live.insert(self.next_name);
        self.next_name
    }

    fn release(&mut self, name: u32) {
        if !self.live.remove(&name) {
            log::warn!("headless: delete of unknown name {name}");
        }
    }
}

impl Backend for HeadlessBackend {
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type Shader = u32;
    type Program = u32;

    fn create_buffer(&mut self) -> Result<u32, String> {
        let name = self.alloc();
        self.calls.push(Call::CreateBuffer(name));
        Ok(name)
    }

    fn bind_array_buffer(&mut self, buffer: Option<u32>) {
        self.bound_array_buffer = buffer;
        self.calls.push(Call::BindArrayBuffer(buffer));
    }

    fn array_buffer_data(&mut self, data: &[u8], usage: BufferUsage) {
        // Uploading with nothing bound is a GL error; record it as buffer 0.
        let buffer = self.bound_array_buffer.unwrap_or(0);
        if buffer != 0 {
            self.buffer_contents.insert(buffer, data.to_vec());
        }
        self.calls.push(Call::BufferData {
            buffer,
            bytes: data.len(),
            usage,
        });
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.release(buffer);
        self.buffer_contents.remove(&buffer);
        if self.bound_array_buffer == Some(buffer) {
            self.bound_array_buffer = None;
        }
        self.calls.push(Call::DeleteBuffer(buffer));
    }

    fn create_vertex_array(&mut self) -> Result<u32, String> {
        let name = self.alloc();
        self.calls.push(Call::CreateVertexArray(name));
        Ok(name)
    }

    fn bind_vertex_array(&mut self, array: Option<u32>) {
        self.calls.push(Call::BindVertexArray(array));
    }

    fn vertex_attrib_pointer_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        self.calls.push(Call::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.calls.push(Call::EnableVertexAttribArray(index));
    }

    fn delete_vertex_array(&mut self, array: u32) {
        self.release(array);
        self.calls.push(Call::DeleteVertexArray(array));
    }

    fn create_texture(&mut self) -> Result<u32, String> {
        let name = self.alloc();
        self.calls.push(Call::CreateTexture(name));
        Ok(name)
    }

    fn active_texture_unit(&mut self, unit: u32) {
        self.calls.push(Call::ActiveTexture(unit));
    }

    fn bind_texture_2d(&mut self, texture: Option<u32>) {
        self.calls.push(Call::BindTexture2d(texture));
    }

    fn texture_2d_wrap(&mut self, s: TextureWrap, t: TextureWrap) {
        self.calls.push(Call::TextureWrap(s, t));
    }

    fn texture_2d_filter(&mut self, min: TextureFilter, mag: TextureFilter) {
        self.calls.push(Call::TextureFilter(min, mag));
    }

    fn texture_2d_image_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        self.calls.push(Call::TextureImage {
            width,
            height,
            bytes: pixels.len(),
        });
    }

    fn generate_mipmap_2d(&mut self) {
        self.calls.push(Call::GenerateMipmap);
    }

    fn delete_texture(&mut self, texture: u32) {
        self.release(texture);
        self.calls.push(Call::DeleteTexture(texture));
    }

    fn create_shader(&mut self, kind: ShaderKind) -> Result<u32, String> {
        let name = self.alloc();
        self.shader_kinds.insert(name, kind);
        self.calls.push(Call::CreateShader(name, kind));
        Ok(name)
    }

    fn shader_source(&mut self, shader: u32, _source: &str) {
        self.calls.push(Call::ShaderSource(shader));
    }

    fn compile_shader(&mut self, shader: u32) {
        self.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&mut self, shader: u32) -> bool {
        match (&self.compile_failure, self.shader_kinds.get(&shader)) {
            (Some((kind, _)), Some(actual)) => kind != actual,
            _ => true,
        }
    }

    fn shader_info_log(&mut self, shader: u32) -> String {
        match (&self.compile_failure, self.shader_kinds.get(&shader)) {
            (Some((kind, log)), Some(actual)) if kind == actual => log.clone(),
            _ => String::new(),
        }
    }

    fn delete_shader(&mut self, shader: u32) {
        self.release(shader);
        self.shader_kinds.remove(&shader);
        self.calls.push(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Result<u32, String> {
        let name = self.alloc();
        self.calls.push(Call::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        self.calls.push(Call::AttachShader { program, shader });
    }

    fn detach_shader(&mut self, program: u32, shader: u32) {
        self.calls.push(Call::DetachShader { program, shader });
    }

    fn bind_attrib_location(&mut self, program: u32, index: u32, name: &str) {
        self.calls.push(Call::BindAttribLocation {
            program,
            index,
            name: name.to_string(),
        });
    }

    fn link_program(&mut self, program: u32) {
        self.calls.push(Call::LinkProgram(program));
    }

    fn program_link_status(&mut self, _program: u32) -> bool {
        self.link_failure.is_none()
    }

    fn program_info_log(&mut self, _program: u32) -> String {
        self.link_failure.clone().unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<u32>) {
        self.calls.push(Call::UseProgram(program));
    }

    fn delete_program(&mut self, program: u32) {
        self.release(program);
        self.calls.push(Call::DeleteProgram(program));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(Call::ClearColor(rgba));
    }

    fn clear_color_buffer(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.calls.push(Call::DrawTriangles { first, count });
    }
}
