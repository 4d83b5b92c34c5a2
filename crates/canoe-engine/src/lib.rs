//! Canoe engine crate.
//!
//! A minimal OpenGL rendering harness: GPU resource wrappers with scoped
//! binding, a small scene of movable textured triangles, and a winit/glutin
//! window session that redraws them every frame.

pub mod assets;
pub mod device;
pub mod input;
pub mod render;
pub mod scene;
pub mod window;

pub mod logging;
pub mod time;
