use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, Redraw, WindowCtx};
use crate::device::{Gpu, GpuInit};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub min_size: Option<LogicalSize<f64>>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "clockface".to_string(),
            initial_size: LogicalSize::new(600.0, 600.0),
            min_size: None,
        }
    }
}

impl RuntimeConfig {
    fn window_attributes(&self) -> winit::window::WindowAttributes {
        let attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(self.initial_size);
        match self.min_size {
            Some(min) => attrs.with_min_inner_size(min),
            None => attrs,
        }
    }
}

/// Maps a redraw request to the event loop's sleep policy.
///
/// The flag is `true` when a frame must be requested right away.
pub fn control_flow_for(redraw: Redraw, now: Instant) -> (ControlFlow, bool) {
    match redraw {
        Redraw::Now => (ControlFlow::Wait, true),
        Redraw::At(deadline) if deadline <= now => (ControlFlow::Wait, true),
        Redraw::At(deadline) => (ControlFlow::WaitUntil(deadline), false),
        Redraw::Idle => (ControlFlow::Wait, false),
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs the event loop until it closes or the app
    /// asks to exit.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut host = Host { config, gpu_init, app, surface: None, failure: None };

        event_loop
            .run_app(&mut host)
            .context("winit event loop terminated with error")?;

        match host.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct Surface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl Surface {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let window = event_loop
            .create_window(config.window_attributes())
            .context("failed to create window")?;

        SurfaceTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .with_context(|| format!("GPU initialization failed for window {:?}", config.title))
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.request_redraw();
    }
}

/// `winit` handler owning the app and its single window.
struct Host<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    surface: Option<Surface>,
    /// Startup error reported once the loop returns.
    failure: Option<anyhow::Error>,
}

impl<A> Host<A>
where
    A: CoreApp + 'static,
{
    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.take().is_some() {
            log::debug!("window closed");
        }
        event_loop.exit();
    }

    fn draw_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_mut() else { return };
        let app = &mut self.app;

        let control = surface.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { id: fields.window.id(), window: fields.window },
                gpu: fields.gpu,
            };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.shut_down(event_loop);
        }
    }
}

impl<A> ApplicationHandler for Host<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match Surface::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(surface) => {
                log::info!("window {:?} created: {:?}", surface.id(), self.config.title);
                surface.request_redraw();
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(surface) = self.surface.as_ref() else { return };

        let now = Instant::now();
        let (flow, redraw_now) = control_flow_for(self.app.poll_redraw(now), now);
        event_loop.set_control_flow(flow);
        if redraw_now {
            surface.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.surface.as_ref().map(Surface::id) != Some(window_id) {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.shut_down(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),
            WindowEvent::RedrawRequested => self.draw_frame(event_loop),
            _ => {
                let Some(surface) = self.surface.as_mut() else { return };
                match event {
                    WindowEvent::Resized(size) => surface.resize(size),
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = surface.with_window(|w| w.inner_size());
                        surface.resize(size);
                    }
                    WindowEvent::Occluded(false) => surface.request_redraw(),
                    _ => {}
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.on_exit();
        self.surface = None;
        log::debug!("event loop exiting");
    }
}
