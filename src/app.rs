use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::core::scene_pipeline::ScenePipeline;
use crate::core::{GpuContext, OverlayPass, WindowSurface};
use crate::error::RenderError;
use crate::session::Session;
use crate::ui::overlay::{self, OverlayFrame};
use crate::ui::{OverlayOutput, OverlayStyle};

/// GPU side of the window, created on `resumed`
struct Renderer {
    gpu: GpuContext,
    surface: WindowSurface,
    scene: ScenePipeline,
    overlay: OverlayPass,
}

impl Renderer {
    async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let (gpu, surface) = GpuContext::for_window(window.clone()).await?;
        let (width, height) = surface.size();
        let scene = ScenePipeline::new(gpu.device(), surface.format(), width, height);
        let overlay = OverlayPass::new(&gpu, surface.format(), &window);
        Ok(Self {
            gpu,
            surface,
            scene,
            overlay,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface.resize(self.gpu.device(), width, height);
        self.scene.resize(self.gpu.device(), width, height);
    }

    /// One frame: scene pass (unless failed), overlay pass, present
    fn frame(&mut self, window: &Window, session: &mut Session) {
        let output = match self.surface.acquire(self.gpu.device()) {
            Ok(Some(output)) => output,
            Ok(None) => return,
            Err(err) => {
                session.report_failure(&err);
                return;
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let (width, height) = self.surface.size();
        let gpu = &self.gpu;
        let scene = &mut self.scene;
        let drawn = session.render_scene(width, height, |camera, batches, clear| {
            scene.render(gpu, &mut encoder, &view, camera, batches, clear);
            Ok(())
        });
        if !drawn {
            ScenePipeline::clear(&mut encoder, &view, session.palette().background);
        }

        let clicks = if session.config().no_ui && !session.shell().is_failed() {
            OverlayOutput::default()
        } else {
            self.draw_overlay(window, session, &mut encoder, &view)
        };

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();

        session.apply_overlay(clicks);
    }

    fn draw_overlay(
        &mut self,
        window: &Window,
        session: &Session,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> OverlayOutput {
        let theme = session.view().theme;
        let style = OverlayStyle::for_theme(theme);
        let width = window.inner_size().width as f32 / window.scale_factor() as f32;
        let frame = OverlayFrame {
            view: session.view(),
            style: &style,
            width,
            breakpoint: session.config().window.mobile_breakpoint,
            failure: session.shell().failure_message(),
        };

        let mut clicks = OverlayOutput::default();
        self.overlay.draw(&self.gpu, encoder, view, window, |ctx| {
            style.install(ctx, theme);
            clicks = overlay::show(ctx, &frame);
        });
        clicks
    }
}

pub struct App {
    session: Session,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    init_error: Option<RenderError>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Session::new(config),
            window: None,
            renderer: None,
            init_error: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let settings = &self.session.config().window;
        let attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(settings.width, settings.height));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => {
                let stats = self.session.stats();
                log::info!(
                    "Renderer ready: {} racks, {} lights, {} cable segments",
                    stats.racks,
                    stats.lights,
                    stats.cable_segments
                );
                self.renderer = Some(renderer);
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to initialise renderer: {e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        // egui sees every event first
        if renderer.overlay.on_window_event(window, &event) {
            return;
        }

        if ends_session(&event) {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => renderer.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                self.session.advance();
                renderer.frame(window, &mut self.session);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Pointer input goes to the overlay; closing the window is the only way out
fn ends_session(event: &WindowEvent) -> bool {
    matches!(event, WindowEvent::CloseRequested | WindowEvent::Destroyed)
}

/// Opens the window and runs until it is closed
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn only_window_close_ends_the_session() {
        assert!(ends_session(&WindowEvent::CloseRequested));
        assert!(ends_session(&WindowEvent::Destroyed));
        assert!(!ends_session(&WindowEvent::Resized(PhysicalSize::new(800, 600))));
        assert!(!ends_session(&WindowEvent::RedrawRequested));
        assert!(!ends_session(&WindowEvent::Focused(false)));
    }
}
