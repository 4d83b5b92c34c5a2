use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use super::config::SessionConfig;
use super::error::WindowError;

/// Native window with a current GL context and its window surface.
///
/// Field order is drop order: surface, then context, then window.
pub struct GlTarget {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlTarget {
    /// Creates a hidden, non-resizable window and makes a GL context current
    /// on it. Returns the target plus the GL function table loaded for that
    /// context.
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &SessionConfig,
    ) -> Result<(Self, glow::Context), WindowError> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.size)
            .with_resizable(false)
            .with_visible(false);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, ConfigTemplateBuilder::new(), pick_config)
            .map_err(|e| WindowError::Creation(format!("no usable GL config: {e}")))?;
        let window =
            window.ok_or_else(|| WindowError::Creation("display builder returned no window".into()))?;

        log::debug!("picked GL config with {} samples", gl_config.num_samples());

        let raw = window
            .window_handle()
            .map_err(|e| WindowError::Creation(format!("window handle unavailable: {e}")))?
            .as_raw();
        let (major, minor) = config.gl_version;
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw));

        let display = gl_config.display();
        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .map_err(|e| WindowError::Creation(format!("OpenGL {major}.{minor} context: {e}")))?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .map_err(|e| WindowError::Creation(format!("surface attributes: {e}")))?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .map_err(|e| WindowError::Creation(format!("window surface: {e}")))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| WindowError::Creation(format!("make current: {e}")))?;

        let interval = match NonZeroU32::new(config.swap_interval) {
            Some(n) => SwapInterval::Wait(n),
            None => SwapInterval::DontWait,
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("swap interval {interval:?} rejected: {e}");
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        Ok((
            Self {
                surface,
                context,
                window,
            },
            gl,
        ))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }
}

/// Prefers the config with the most samples.
///
/// glutin reports an error instead of calling the picker when no config
/// matches, so the iterator is never empty here.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("glutin offered no GL config")
}
