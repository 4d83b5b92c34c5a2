use crate::device::{Backend, GraphicsContext, ProgramBinding, RenderError, ShaderKind};

const TEXTURED_VERT: &str = include_str!("shaders/textured.vert");
const TEXTURED_FRAG: &str = include_str!("shaders/textured.frag");

/// Attribute names bound to fixed locations before linking.
pub const ATTRIBUTE_LOCATIONS: [(u32, &str); 2] = [(0, "point"), (1, "texPointIn")];

/// One compiled shader object.
#[derive(Debug)]
pub struct ShaderStage<B: Backend> {
    kind: ShaderKind,
    handle: B::Shader,
}

impl<B: Backend> ShaderStage<B> {
    /// Creates a stage of `kind` and compiles `source`.
    ///
    /// On failure the stage is deleted and the compiler log is returned.
    pub fn compile(
        ctx: &mut GraphicsContext<B>,
        kind: ShaderKind,
        source: &str,
    ) -> Result<Self, RenderError> {
        let handle = ctx.create_shader(kind)?;
        if let Err(log) = ctx.compile_shader(handle, source) {
            ctx.delete_shader(handle);
            return Err(RenderError::ShaderCompile { kind, log });
        }
        Ok(Self { kind, handle })
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn handle(&self) -> B::Shader {
        self.handle
    }

    pub fn delete(self, ctx: &mut GraphicsContext<B>) {
        ctx.delete_shader(self.handle);
    }
}

/// Linked vertex + fragment program.
///
/// Owns both stages; they stay attached for the program's lifetime and are
/// released together in [`ShaderProgram::delete`].
#[derive(Debug)]
pub struct ShaderProgram<B: Backend> {
    handle: B::Program,
    vertex: ShaderStage<B>,
    fragment: ShaderStage<B>,
}

impl<B: Backend> ShaderProgram<B> {
    /// Compiles the built-in textured pair and links it.
    pub fn textured(ctx: &mut GraphicsContext<B>) -> Result<Self, RenderError> {
        let vertex = ShaderStage::compile(ctx, ShaderKind::Vertex, TEXTURED_VERT)?;
        let fragment = match ShaderStage::compile(ctx, ShaderKind::Fragment, TEXTURED_FRAG) {
            Ok(stage) => stage,
            Err(e) => {
                vertex.delete(ctx);
                return Err(e);
            }
        };
        Self::link(ctx, vertex, fragment)
    }

    /// Attaches both stages, binds [`ATTRIBUTE_LOCATIONS`] and links.
    ///
    /// On failure the program and both stages are released.
    pub fn link(
        ctx: &mut GraphicsContext<B>,
        vertex: ShaderStage<B>,
        fragment: ShaderStage<B>,
    ) -> Result<Self, RenderError> {
        debug_assert_eq!(vertex.kind(), ShaderKind::Vertex);
        debug_assert_eq!(fragment.kind(), ShaderKind::Fragment);

        let handle = match ctx.create_program() {
            Ok(p) => p,
            Err(e) => {
                vertex.delete(ctx);
                fragment.delete(ctx);
                return Err(e);
            }
        };

        ctx.attach_shader(handle, vertex.handle());
        ctx.attach_shader(handle, fragment.handle());
        for (index, name) in ATTRIBUTE_LOCATIONS {
            ctx.bind_attrib_location(handle, index, name);
        }

        if let Err(log) = ctx.link_program(handle) {
            let program = Self {
                handle,
                vertex,
                fragment,
            };
            program.delete(ctx);
            return Err(RenderError::ShaderLink { log });
        }

        log::debug!("linked shader program {handle:?}");
        Ok(Self {
            handle,
            vertex,
            fragment,
        })
    }

    pub fn handle(&self) -> B::Program {
        self.handle
    }

    /// Makes the program current until the guard ends.
    pub fn bind<'c>(&self, ctx: &'c mut GraphicsContext<B>) -> ProgramBinding<'c, B> {
        ctx.use_program(self.handle)
    }

    /// Detaches and deletes both stages, then deletes the program.
    pub fn delete(self, ctx: &mut GraphicsContext<B>) {
        ctx.detach_shader(self.handle, self.vertex.handle());
        ctx.detach_shader(self.handle, self.fragment.handle());
        self.vertex.delete(ctx);
        self.fragment.delete(ctx);
        ctx.delete_program(self.handle);
    }
}
