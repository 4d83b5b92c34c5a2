//! Scene: drawable entities and the render manager that owns them.
//!
//! Only the first entity responds to movement input; spawned entities stay at
//! the default triangle.

mod entity;
mod manager;

pub use entity::{translate, DrawableEntity, DEFAULT_TRIANGLE, STEP};
pub use manager::{RenderManager, CLEAR_COLOR, MAX_ENTITIES};
