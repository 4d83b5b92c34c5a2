use crate::assets::TextureImage;
use crate::device::{Backend, GraphicsContext, RenderError};
use crate::input::FrameInput;
use crate::render::{ShaderProgram, Texture};

use super::entity::DrawableEntity;

/// Upper bound on live entities; further spawn requests are ignored.
pub const MAX_ENTITIES: usize = 10;

/// Background color of every frame.
pub const CLEAR_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Owns every GPU resource of the scene and drives update and draw.
///
/// Must be torn down with [`RenderManager::destroy`] while the context is
/// still current.
#[derive(Debug)]
pub struct RenderManager<B: Backend> {
    texture: Texture<B>,
    program: ShaderProgram<B>,
    entities: Vec<DrawableEntity<B>>,
}

impl<B: Backend> RenderManager<B> {
    /// Uploads `image`, creates the first entity and builds the textured
    /// shader program, in that order. Anything created before a failure is
    /// released again.
    pub fn new(ctx: &mut GraphicsContext<B>, image: TextureImage) -> Result<Self, RenderError> {
        let texture = Texture::create(ctx, image)?;

        let first = match DrawableEntity::new(ctx, texture.handle()) {
            Ok(entity) => entity,
            Err(e) => {
                texture.delete(ctx);
                return Err(e);
            }
        };

        let program = match ShaderProgram::textured(ctx) {
            Ok(program) => program,
            Err(e) => {
                first.delete(ctx);
                texture.delete(ctx);
                return Err(e);
            }
        };

        log::info!(
            "render manager ready ({}x{} texture)",
            texture.width(),
            texture.height()
        );

        let mut entities = Vec::with_capacity(MAX_ENTITIES);
        entities.push(first);
        Ok(Self {
            texture,
            program,
            entities,
        })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[DrawableEntity<B>] {
        &self.entities
    }

    pub fn texture(&self) -> &Texture<B> {
        &self.texture
    }

    /// Adds one entity at the default triangle. Returns `Ok(false)` when the
    /// cap is reached.
    pub fn spawn(&mut self, ctx: &mut GraphicsContext<B>) -> Result<bool, RenderError> {
        if self.entities.len() >= MAX_ENTITIES {
            log::debug!("spawn ignored, {MAX_ENTITIES} entities already live");
            return Ok(false);
        }
        let entity = DrawableEntity::new(ctx, self.texture.handle())?;
        self.entities.push(entity);
        log::debug!("spawned entity #{}", self.entities.len());
        Ok(true)
    }

    /// Clears the frame and draws every entity in creation order.
    pub fn draw(&self, ctx: &mut GraphicsContext<B>) {
        ctx.clear(CLEAR_COLOR);

        let mut program = self.program.bind(ctx);
        for entity in &self.entities {
            let mut texture = program.bind_texture_2d(0, entity.texture());
            let mut array = entity.array().bind(&mut texture);
            array.enable_attrib(0);
            array.enable_attrib(1);
            array.draw_triangles(0, 3);
        }
    }

    /// Spawns one entity if requested, then moves only the first entity.
    pub fn update(
        &mut self,
        ctx: &mut GraphicsContext<B>,
        input: &FrameInput,
    ) -> Result<(), RenderError> {
        if input.spawn {
            self.spawn(ctx)?;
        }

        if let Some(first) = self.entities.first_mut() {
            first.set_movement(input.movement);
            first.update(ctx);
        }
        Ok(())
    }

    /// Releases entities, then the texture, then the program and its stages.
    pub fn destroy(self, ctx: &mut GraphicsContext<B>) {
        let count = self.entities.len();
        for entity in self.entities {
            entity.delete(ctx);
        }
        self.texture.delete(ctx);
        self.program.delete(ctx);
        log::debug!("render manager destroyed ({count} entities)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Call, HeadlessBackend, ShaderKind};
    use crate::input::Movement;

    fn image() -> TextureImage {
        TextureImage {
            pixels: vec![0xff; 2 * 2 * 4],
            width: 2,
            height: 2,
            channels: 3,
        }
    }

    fn setup() -> (GraphicsContext<HeadlessBackend>, RenderManager<HeadlessBackend>) {
        let mut ctx = GraphicsContext::new(HeadlessBackend::new());
        let manager = RenderManager::new(&mut ctx, image()).unwrap();
        (ctx, manager)
    }

    fn spawn_input() -> FrameInput {
        FrameInput {
            movement: Movement::NONE,
            spawn: true,
        }
    }

    #[test]
    fn starts_with_one_entity() {
        let (_ctx, manager) = setup();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.texture().channels(), 3);
    }

    #[test]
    fn creation_order_is_texture_entity_program() {
        let (ctx, _manager) = setup();
        let calls = ctx.backend().calls();
        let texture = calls
            .iter()
            .position(|c| matches!(c, Call::CreateTexture(_)))
            .unwrap();
        let buffer = calls
            .iter()
            .position(|c| matches!(c, Call::CreateBuffer(_)))
            .unwrap();
        let program = calls
            .iter()
            .position(|c| matches!(c, Call::CreateProgram(_)))
            .unwrap();
        assert!(texture < buffer && buffer < program);
    }

    #[test]
    fn eleventh_spawn_is_a_no_op() {
        let (mut ctx, mut manager) = setup();
        for _ in 0..20 {
            manager.update(&mut ctx, &spawn_input()).unwrap();
        }
        assert_eq!(manager.len(), MAX_ENTITIES);
        assert!(!manager.spawn(&mut ctx).unwrap());
        assert_eq!(ctx.stats().created.buffers as usize, MAX_ENTITIES);
    }

    #[test]
    fn only_the_first_entity_moves() {
        let (mut ctx, mut manager) = setup();
        manager.update(&mut ctx, &spawn_input()).unwrap();

        let input = FrameInput {
            movement: Movement { up: true, ..Movement::NONE },
            spawn: false,
        };
        manager.update(&mut ctx, &input).unwrap();

        let entities = manager.entities();
        assert!((entities[0].vertices()[0].position[1] - 0.52).abs() < 1e-6);
        assert!((entities[1].vertices()[0].position[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn draw_issues_one_triangle_per_entity_in_order() {
        let (mut ctx, mut manager) = setup();
        manager.update(&mut ctx, &spawn_input()).unwrap();
        manager.update(&mut ctx, &spawn_input()).unwrap();
        ctx.backend_mut().clear_calls();

        manager.draw(&mut ctx);

        let calls = ctx.backend().calls();
        assert_eq!(calls[0], Call::ClearColor(CLEAR_COLOR));
        assert_eq!(calls[1], Call::Clear);
        assert!(matches!(calls[2], Call::UseProgram(Some(_))));

        let drawn: Vec<u32> = calls
            .iter()
            .filter_map(|c| match c {
                Call::BindVertexArray(Some(a)) => Some(*a),
                _ => None,
            })
            .collect();
        let expected: Vec<u32> = manager.entities().iter().map(|e| e.array().handle()).collect();
        assert_eq!(drawn, expected);

        let draws = calls
            .iter()
            .filter(|c| **c == Call::DrawTriangles { first: 0, count: 3 })
            .count();
        assert_eq!(draws, 3);

        assert_eq!(ctx.bound_program(), None);
        assert_eq!(ctx.bound_vertex_array(), None);
        assert_eq!(ctx.bound_texture_2d(0), None);
    }

    #[test]
    fn destroy_balances_every_resource_kind() {
        let (mut ctx, mut manager) = setup();
        for _ in 0..4 {
            manager.update(&mut ctx, &spawn_input()).unwrap();
        }
        manager.draw(&mut ctx);
        manager.destroy(&mut ctx);

        let stats = ctx.stats();
        assert!(stats.is_balanced(), "leaked: {:?}", stats.live());
        assert_eq!(stats.created.vertex_arrays, 5);
        assert_eq!(ctx.backend().live_names(), 0);
    }

    #[test]
    fn destroy_releases_entities_before_texture_and_program() {
        let (mut ctx, manager) = setup();
        ctx.backend_mut().clear_calls();
        manager.destroy(&mut ctx);

        let calls = ctx.backend().calls();
        let buffer = calls
            .iter()
            .position(|c| matches!(c, Call::DeleteBuffer(_)))
            .unwrap();
        let texture = calls
            .iter()
            .position(|c| matches!(c, Call::DeleteTexture(_)))
            .unwrap();
        let program = calls
            .iter()
            .position(|c| matches!(c, Call::DeleteProgram(_)))
            .unwrap();
        assert!(buffer < texture && texture < program);
    }

    #[test]
    fn shader_failure_releases_texture_and_first_entity() {
        let backend = HeadlessBackend::new().with_link_failure("link error");
        let mut ctx = GraphicsContext::new(backend);

        let err = RenderManager::new(&mut ctx, image()).unwrap_err();
        assert_eq!(err, RenderError::ShaderLink { log: "link error".into() });
        assert!(ctx.stats().is_balanced());

        let backend = HeadlessBackend::new().with_compile_failure(ShaderKind::Vertex, "nope");
        let mut ctx = GraphicsContext::new(backend);
        assert!(RenderManager::new(&mut ctx, image()).is_err());
        assert!(ctx.stats().is_balanced());
    }

    #[test]
    fn invalid_image_creates_nothing() {
        let mut ctx = GraphicsContext::new(HeadlessBackend::new());
        let bad = TextureImage {
            pixels: vec![0; 3],
            width: 2,
            height: 2,
            channels: 4,
        };
        assert!(matches!(
            RenderManager::new(&mut ctx, bad),
            Err(RenderError::InvalidImage { .. })
        ));
        assert_eq!(ctx.stats().created.total(), 0);
    }
}
