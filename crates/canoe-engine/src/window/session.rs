use std::time::Instant;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::assets::TextureImage;
use crate::device::{GlowBackend, GraphicsContext};
use crate::input::{InputState, KeyResponse};
use crate::scene::RenderManager;
use crate::time::FrameCounter;

use super::config::SessionConfig;
use super::error::WindowError;
use super::gl::GlTarget;
use super::keymap::{map_action, map_key};

/// Entry point for the window session.
pub struct Session;

impl Session {
    /// Opens the window, runs the frame loop until the window is closed and
    /// tears everything down in order.
    ///
    /// `image` is uploaded once the GL context exists. Errors raised inside
    /// the loop stop it and are returned here.
    pub fn run(config: SessionConfig, image: TextureImage) -> Result<()> {
        let event_loop = EventLoop::new().map_err(|e| WindowError::Init(e.to_string()))?;
        let mut state = SessionState::new(config, image);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything that only exists while the window is open.
struct Running {
    manager: RenderManager<GlowBackend>,
    gfx: GraphicsContext<GlowBackend>,
    target: GlTarget,
}

impl Running {
    fn open(
        event_loop: &ActiveEventLoop,
        config: &SessionConfig,
        image: TextureImage,
    ) -> Result<Self> {
        let (target, gl) = GlTarget::create(event_loop, config)?;

        // SAFETY: `gl` was loaded for the context `GlTarget::create` just made
        // current on this thread; it stays current until `target` is dropped.
        let backend = unsafe { GlowBackend::new(gl) };
        log::info!("OpenGL {}", backend.version_string());

        let mut gfx = GraphicsContext::new(backend);
        let manager =
            RenderManager::new(&mut gfx, image).context("failed to create render resources")?;

        target.window().set_visible(true);

        Ok(Self {
            manager,
            gfx,
            target,
        })
    }

    fn frame(&mut self, input: &mut InputState) -> Result<()> {
        self.manager.draw(&mut self.gfx);

        let frame_input = input.begin_frame();
        self.manager
            .update(&mut self.gfx, &frame_input)
            .context("frame update failed")?;

        self.target
            .swap_buffers()
            .context("failed to present frame")?;
        Ok(())
    }

    /// Releases GPU resources while the context is still current, then drops
    /// surface, context and window.
    fn close(self) {
        let Running {
            manager,
            mut gfx,
            target,
        } = self;

        manager.destroy(&mut gfx);

        let stats = gfx.stats();
        if stats.is_balanced() {
            log::debug!("all GPU resources released ({} created)", stats.created.total());
        } else {
            log::warn!("leaked GPU resources at shutdown: {:?}", stats.live());
        }

        drop(gfx);
        drop(target);
        log::info!("window closed");
    }
}

struct SessionState {
    config: SessionConfig,
    image: Option<TextureImage>,

    input: InputState,
    counter: FrameCounter,
    running: Option<Running>,

    fatal: Option<anyhow::Error>,
}

impl SessionState {
    fn new(config: SessionConfig, image: TextureImage) -> Self {
        Self {
            config,
            image: Some(image),
            input: InputState::default(),
            counter: FrameCounter::new(),
            running: None,
            fatal: None,
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.take() {
            running.close();
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        log::debug!("stopping session: {e:#}");
        if self.fatal.is_none() {
            self.fatal = Some(e);
        }
        self.shutdown(event_loop);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        if let Err(e) = running.frame(&mut self.input) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(report) = self.counter.tick(Instant::now()) {
            log::debug!(
                "{} frames in {:.2?} ({:.1} fps)",
                report.frames,
                report.elapsed,
                report.fps
            );
        }
    }
}

impl ApplicationHandler for SessionState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        let Some(image) = self.image.take() else {
            return;
        };

        match Running::open(event_loop, &self.config, image) {
            Ok(running) => {
                running.target.window().request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e.context("failed to open window session")),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; vsync paces the loop.
        if let Some(running) = &self.running {
            running.target.window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(event.physical_key);
                let action = map_action(event.state, event.repeat);
                if self.input.apply_key(key, action) == KeyResponse::RequestClose {
                    log::debug!("escape released, closing");
                    self.shutdown(event_loop);
                }
            }

            WindowEvent::Focused(focused) => self.input.set_focused(focused),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.take() {
            running.close();
        }
    }
}
