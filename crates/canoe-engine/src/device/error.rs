use std::fmt;

use super::backend::ShaderKind;

/// Failure while creating or preparing a GPU resource.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The driver could not allocate an object name.
    Device { object: &'static str, message: String },

    /// A shader stage was rejected by the compiler.
    ShaderCompile { kind: ShaderKind, log: String },

    /// The stages compiled but the program failed to link.
    ShaderLink { log: String },

    /// Pixel data does not hold exactly `width * height` RGBA8 texels.
    InvalidImage { width: u32, height: u32, len: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Device { object, message } => {
                write!(f, "failed to create {object}: {message}")
            }
            RenderError::ShaderCompile { kind, log } => {
                write!(f, "{kind} shader failed to compile: {}", log.trim_end())
            }
            RenderError::ShaderLink { log } => {
                write!(f, "shader program failed to link: {}", log.trim_end())
            }
            RenderError::InvalidImage { width, height, len } => write!(
                f,
                "texture image {width}x{height} needs {} RGBA bytes, got {len}",
                *width as usize * *height as usize * 4
            ),
        }
    }
}

impl std::error::Error for RenderError {}
