use crate::device::{Backend, BufferUsage, GraphicsContext, RenderError};
use crate::input::Movement;
use crate::render::{Vertex, VertexArray, VertexBuffer};

/// Translation applied per flag per update, in normalized device units.
pub const STEP: f32 = 0.02;

/// Triangle every entity starts as.
pub const DEFAULT_TRIANGLE: [Vertex; 3] = [
    Vertex::new([0.0, 0.5, 0.0], [0.5, 0.0]),
    Vertex::new([0.5, -0.5, 0.0], [1.0, 1.0]),
    Vertex::new([-0.5, -0.5, 0.0], [0.0, 1.0]),
];

/// A movable textured triangle.
///
/// Owns its vertex buffer and vertex array. The texture is shared and owned by
/// the render manager; the entity only keeps its handle.
#[derive(Debug)]
pub struct DrawableEntity<B: Backend> {
    buffer: VertexBuffer<B>,
    array: VertexArray<B>,
    texture: B::Texture,
    vertices: [Vertex; 3],
    movement: Movement,
}

impl<B: Backend> DrawableEntity<B> {
    /// Creates the entity at [`DEFAULT_TRIANGLE`].
    pub fn new(ctx: &mut GraphicsContext<B>, texture: B::Texture) -> Result<Self, RenderError> {
        Self::with_vertices(ctx, texture, DEFAULT_TRIANGLE)
    }

    pub fn with_vertices(
        ctx: &mut GraphicsContext<B>,
        texture: B::Texture,
        vertices: [Vertex; 3],
    ) -> Result<Self, RenderError> {
        let mut buffer = VertexBuffer::create(ctx)?;
        let array = match VertexArray::create(ctx) {
            Ok(array) => array,
            Err(e) => {
                buffer.delete(ctx);
                return Err(e);
            }
        };

        buffer.upload(ctx, &vertices, BufferUsage::Dynamic);
        {
            let mut vbo = buffer.bind(ctx);
            array.describe_vertex_layout(&mut vbo);
            let _tex = vbo.bind_texture_2d(0, texture);
        }

        log::debug!(
            "entity created (buffer {:?}, array {:?})",
            buffer.handle(),
            array.handle()
        );

        Ok(Self {
            buffer,
            array,
            texture,
            vertices,
            movement: Movement::NONE,
        })
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn set_movement(&mut self, movement: Movement) {
        self.movement = movement;
    }

    pub fn array(&self) -> &VertexArray<B> {
        &self.array
    }

    pub fn texture(&self) -> B::Texture {
        self.texture
    }

    /// Applies the movement flags once (up, down, right, left) and re-uploads
    /// the whole vertex buffer.
    pub fn update(&mut self, ctx: &mut GraphicsContext<B>) {
        translate(&mut self.vertices, self.movement);
        self.buffer.upload(ctx, &self.vertices, BufferUsage::Dynamic);
    }

    pub fn delete(self, ctx: &mut GraphicsContext<B>) {
        self.array.delete(ctx);
        self.buffer.delete(ctx);
    }
}

/// Moves every vertex by [`STEP`] for each set flag. Opposite flags both
/// apply. No clamping.
pub fn translate(vertices: &mut [Vertex], movement: Movement) {
    let steps = [
        (movement.up, 1, STEP),
        (movement.down, 1, -STEP),
        (movement.right, 0, STEP),
        (movement.left, 0, -STEP),
    ];
    for (set, axis, delta) in steps {
        if !set {
            continue;
        }
        for v in vertices.iter_mut() {
            v.position[axis] += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Call, HeadlessBackend};

    const EPS: f32 = 1e-6;

    fn ys(e: &DrawableEntity<HeadlessBackend>) -> Vec<f32> {
        e.vertices().iter().map(|v| v.position[1]).collect()
    }

    fn xs(e: &DrawableEntity<HeadlessBackend>) -> Vec<f32> {
        e.vertices().iter().map(|v| v.position[0]).collect()
    }

    fn close(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < EPS)
    }

    fn setup() -> (GraphicsContext<HeadlessBackend>, u32) {
        let mut ctx = GraphicsContext::new(HeadlessBackend::new());
        let texture = ctx.create_texture().unwrap();
        (ctx, texture)
    }

    #[test]
    fn construction_leaves_no_bindings_behind() {
        let (mut ctx, texture) = setup();
        let entity = DrawableEntity::new(&mut ctx, texture).unwrap();

        assert_eq!(ctx.bound_array_buffer(), None);
        assert_eq!(ctx.bound_vertex_array(), None);
        assert_eq!(ctx.bound_texture_2d(0), None);
        assert_eq!(entity.texture(), texture);
        assert_eq!(ctx.stats().created.buffers, 1);
        assert_eq!(ctx.stats().created.vertex_arrays, 1);
    }

    #[test]
    fn construction_uploads_before_describing_layout() {
        let (mut ctx, texture) = setup();
        let entity = DrawableEntity::new(&mut ctx, texture).unwrap();

        let calls = ctx.backend().calls();
        let upload = calls
            .iter()
            .position(|c| matches!(c, Call::BufferData { bytes: 60, .. }))
            .unwrap();
        let bind_vao = calls
            .iter()
            .position(|c| *c == Call::BindVertexArray(Some(entity.array().handle())))
            .unwrap();
        let first_pointer = calls
            .iter()
            .position(|c| matches!(c, Call::VertexAttribPointer { .. }))
            .unwrap();
        assert!(upload < bind_vao);
        assert!(bind_vao < first_pointer);
    }

    #[test]
    fn up_for_one_tick_raises_every_vertex() {
        let (mut ctx, texture) = setup();
        let mut entity = DrawableEntity::new(&mut ctx, texture).unwrap();

        entity.set_movement(Movement { up: true, ..Movement::NONE });
        entity.update(&mut ctx);

        assert!(close(&ys(&entity), &[0.52, -0.48, -0.48]));
        assert!(close(&xs(&entity), &[0.0, 0.5, -0.5]));
    }

    #[test]
    fn opposite_flags_cancel() {
        let (mut ctx, texture) = setup();
        let mut entity = DrawableEntity::new(&mut ctx, texture).unwrap();

        entity.set_movement(Movement { up: true, down: true, left: true, right: true });
        for _ in 0..5 {
            entity.update(&mut ctx);
        }

        let original: Vec<f32> = DEFAULT_TRIANGLE.iter().map(|v| v.position[1]).collect();
        assert!(close(&ys(&entity), &original));
        assert!(close(&xs(&entity), &[0.0, 0.5, -0.5]));
    }

    #[test]
    fn update_reuploads_even_when_idle() {
        let (mut ctx, texture) = setup();
        let mut entity = DrawableEntity::new(&mut ctx, texture).unwrap();
        ctx.backend_mut().clear_calls();

        entity.update(&mut ctx);

        let uploads = ctx
            .backend()
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::BufferData { usage: BufferUsage::Dynamic, bytes: 60, .. }))
            .count();
        assert_eq!(uploads, 1);
    }

    #[test]
    fn uploaded_bytes_follow_the_moved_vertices() {
        let (mut ctx, texture) = setup();
        let mut entity = DrawableEntity::new(&mut ctx, texture).unwrap();

        entity.set_movement(Movement { right: true, ..Movement::NONE });
        entity.update(&mut ctx);

        let handle = entity.buffer.handle();
        let bytes = ctx.backend().buffer_contents(handle).unwrap();
        let uploaded: Vec<Vertex> = bytemuck::pod_collect_to_vec(bytes);
        assert!((uploaded[0].position[0] - 0.02).abs() < EPS);
        assert_eq!(uploaded[2].tex_coord, [0.0, 1.0]);
    }

    #[test]
    fn delete_releases_buffer_and_array_but_not_texture() {
        let (mut ctx, texture) = setup();
        let entity = DrawableEntity::new(&mut ctx, texture).unwrap();
        entity.delete(&mut ctx);

        let live = ctx.stats().live();
        assert_eq!(live.buffers, 0);
        assert_eq!(live.vertex_arrays, 0);
        assert_eq!(live.textures, 1);
    }
}
