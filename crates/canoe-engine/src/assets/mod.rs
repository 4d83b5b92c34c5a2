//! Asset decoding.
//!
//! Only texture images for now: file path in, RGBA8 pixels out.

mod decode;

pub use decode::{decode_rgba8, ImageDecodeError, TextureImage};
