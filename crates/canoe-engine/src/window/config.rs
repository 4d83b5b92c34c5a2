use winit::dpi::LogicalSize;

/// Window session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub title: String,
    pub size: LogicalSize<u32>,

    /// Requested OpenGL version as (major, minor). Any profile is accepted.
    pub gl_version: (u8, u8),

    /// Frames to wait per buffer swap; 0 disables vsync.
    pub swap_interval: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            title: "Canoe".to_string(),
            size: LogicalSize::new(640, 480),
            gl_version: (4, 3),
            swap_interval: 1,
        }
    }
}
