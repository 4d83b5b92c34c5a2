use std::collections::HashMap;

use super::backend::{Backend, ShaderKind};
use super::binding::{BufferBinding, ProgramBinding, TextureBinding, VertexArrayBinding};
use super::error::RenderError;
use super::stats::ResourceStats;

/// Objects currently bound on the context.
///
/// GL binding state is global to the context, so this table is the single
/// record of what "current" means for every wrapper.
pub(super) struct Bindings<B: Backend> {
    pub(super) array_buffer: Option<B::Buffer>,
    pub(super) vertex_array: Option<B::VertexArray>,
    pub(super) active_unit: u32,
    pub(super) textures_2d: HashMap<u32, B::Texture>,
    pub(super) program: Option<B::Program>,
}

impl<B: Backend> Default for Bindings<B> {
    fn default() -> Self {
        Self {
            array_buffer: None,
            vertex_array: None,
            active_unit: 0,
            textures_2d: HashMap::new(),
            program: None,
        }
    }
}

/// Single owner of the GL-class command surface.
///
/// Every resource wrapper receives the context explicitly; there is no hidden
/// global. Binding goes through scoped guards ([`BufferBinding`] and friends)
/// that put the previous binding back when they end, and operations on "the
/// current object" are only reachable through those guards.
///
/// The context also counts created and deleted objects per kind.
pub struct GraphicsContext<B: Backend> {
    pub(super) backend: B,
    pub(super) bindings: Bindings<B>,
    stats: ResourceStats,
}

impl<B: Backend> GraphicsContext<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            bindings: Bindings::default(),
            stats: ResourceStats::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Direct backend access. Bypasses the binding table, so only use it for
    /// calls that do not bind anything (instrumentation, swap-adjacent state).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn stats(&self) -> ResourceStats {
        self.stats
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn bound_array_buffer(&self) -> Option<B::Buffer> {
        self.bindings.array_buffer
    }

    pub fn bound_vertex_array(&self) -> Option<B::VertexArray> {
        self.bindings.vertex_array
    }

    pub fn bound_texture_2d(&self, unit: u32) -> Option<B::Texture> {
        self.bindings.textures_2d.get(&unit).copied()
    }

    pub fn bound_program(&self) -> Option<B::Program> {
        self.bindings.program
    }

    // ── scoped binding ────────────────────────────────────────────────────

    /// Binds `buffer` as the array buffer until the guard is dropped.
    pub fn bind_array_buffer(&mut self, buffer: B::Buffer) -> BufferBinding<'_, B> {
        BufferBinding::new(self, buffer)
    }

    /// Binds `array` until the guard is dropped.
    pub fn bind_vertex_array(&mut self, array: B::VertexArray) -> VertexArrayBinding<'_, B> {
        VertexArrayBinding::new(self, array)
    }

    /// Binds `texture` on texture `unit` until the guard is dropped.
    pub fn bind_texture_2d(&mut self, unit: u32, texture: B::Texture) -> TextureBinding<'_, B> {
        TextureBinding::new(self, unit, texture)
    }

    /// Makes `program` current until the guard is dropped.
    pub fn use_program(&mut self, program: B::Program) -> ProgramBinding<'_, B> {
        ProgramBinding::new(self, program)
    }

    // ── raw binding (guards only) ─────────────────────────────────────────

    pub(super) fn set_array_buffer(&mut self, buffer: Option<B::Buffer>) {
        if self.bindings.array_buffer != buffer {
            self.backend.bind_array_buffer(buffer);
            self.bindings.array_buffer = buffer;
        }
    }

    pub(super) fn set_vertex_array(&mut self, array: Option<B::VertexArray>) {
        if self.bindings.vertex_array != array {
            self.backend.bind_vertex_array(array);
            self.bindings.vertex_array = array;
        }
    }

    pub(super) fn set_active_unit(&mut self, unit: u32) {
        if self.bindings.active_unit != unit {
            self.backend.active_texture_unit(unit);
            self.bindings.active_unit = unit;
        }
    }

    /// Binds on the active unit.
    pub(super) fn set_texture_2d(&mut self, texture: Option<B::Texture>) {
        let unit = self.bindings.active_unit;
        if self.bindings.textures_2d.get(&unit).copied() != texture {
            self.backend.bind_texture_2d(texture);
            match texture {
                Some(t) => self.bindings.textures_2d.insert(unit, t),
                None => self.bindings.textures_2d.remove(&unit),
            };
        }
    }

    pub(super) fn set_program(&mut self, program: Option<B::Program>) {
        if self.bindings.program != program {
            self.backend.use_program(program);
            self.bindings.program = program;
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    pub fn create_buffer(&mut self) -> Result<B::Buffer, RenderError> {
        let buffer = self.backend.create_buffer().map_err(|message| RenderError::Device {
            object: "buffer",
            message,
        })?;
        self.stats.created.buffers += 1;
        log::trace!("created buffer {buffer:?}");
        Ok(buffer)
    }

    pub fn delete_buffer(&mut self, buffer: B::Buffer) {
        // Deleting a bound object unbinds it.
        if self.bindings.array_buffer == Some(buffer) {
            self.bindings.array_buffer = None;
        }
        self.backend.delete_buffer(buffer);
        self.stats.deleted.buffers += 1;
        log::trace!("deleted buffer {buffer:?}");
    }

    pub fn create_vertex_array(&mut self) -> Result<B::VertexArray, RenderError> {
        let array = self
            .backend
            .create_vertex_array()
            .map_err(|message| RenderError::Device {
                object: "vertex array",
                message,
            })?;
        self.stats.created.vertex_arrays += 1;
        log::trace!("created vertex array {array:?}");
        Ok(array)
    }

    pub fn delete_vertex_array(&mut self, array: B::VertexArray) {
        if self.bindings.vertex_array == Some(array) {
            self.bindings.vertex_array = None;
        }
        self.backend.delete_vertex_array(array);
        self.stats.deleted.vertex_arrays += 1;
        log::trace!("deleted vertex array {array:?}");
    }

    pub fn create_texture(&mut self) -> Result<B::Texture, RenderError> {
        let texture = self.backend.create_texture().map_err(|message| RenderError::Device {
            object: "texture",
            message,
        })?;
        self.stats.created.textures += 1;
        log::trace!("created texture {texture:?}");
        Ok(texture)
    }

    pub fn delete_texture(&mut self, texture: B::Texture) {
        self.bindings.textures_2d.retain(|_, bound| *bound != texture);
        self.backend.delete_texture(texture);
        self.stats.deleted.textures += 1;
        log::trace!("deleted texture {texture:?}");
    }

    pub fn create_shader(&mut self, kind: ShaderKind) -> Result<B::Shader, RenderError> {
        let shader = self
            .backend
            .create_shader(kind)
            .map_err(|message| RenderError::Device {
                object: "shader",
                message,
            })?;
        self.stats.created.shaders += 1;
        log::trace!("created {kind} shader {shader:?}");
        Ok(shader)
    }

    /// Uploads `source` and compiles it. Returns the compiler log on failure.
    pub fn compile_shader(&mut self, shader: B::Shader, source: &str) -> Result<(), String> {
        self.backend.shader_source(shader, source);
        self.backend.compile_shader(shader);
        if self.backend.shader_compile_status(shader) {
            Ok(())
        } else {
            Err(self.backend.shader_info_log(shader))
        }
    }

    pub fn delete_shader(&mut self, shader: B::Shader) {
        self.backend.delete_shader(shader);
        self.stats.deleted.shaders += 1;
        log::trace!("deleted shader {shader:?}");
    }

    pub fn create_program(&mut self) -> Result<B::Program, RenderError> {
        let program = self.backend.create_program().map_err(|message| RenderError::Device {
            object: "program",
            message,
        })?;
        self.stats.created.programs += 1;
        log::trace!("created program {program:?}");
        Ok(program)
    }

    pub fn attach_shader(&mut self, program: B::Program, shader: B::Shader) {
        self.backend.attach_shader(program, shader);
    }

    pub fn detach_shader(&mut self, program: B::Program, shader: B::Shader) {
        self.backend.detach_shader(program, shader);
    }

    /// Takes effect at the next link.
    pub fn bind_attrib_location(&mut self, program: B::Program, index: u32, name: &str) {
        self.backend.bind_attrib_location(program, index, name);
    }

    /// Links `program`. Returns the linker log on failure.
    pub fn link_program(&mut self, program: B::Program) -> Result<(), String> {
        self.backend.link_program(program);
        if self.backend.program_link_status(program) {
            Ok(())
        } else {
            Err(self.backend.program_info_log(program))
        }
    }

    pub fn delete_program(&mut self, program: B::Program) {
        if self.bindings.program == Some(program) {
            self.bindings.program = None;
        }
        self.backend.delete_program(program);
        self.stats.deleted.programs += 1;
        log::trace!("deleted program {program:?}");
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Clears the color buffer of the default framebuffer to `rgba`.
    pub fn clear(&mut self, rgba: [f32; 4]) {
        self.backend.clear_color(rgba);
        self.backend.clear_color_buffer();
    }
}
