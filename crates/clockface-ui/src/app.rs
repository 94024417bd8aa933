use std::collections::HashMap;
use std::time::Instant;

use anyhow::Context;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

use clockface_engine::core::{App as EngineApp, AppControl, FrameCtx, Redraw};
use clockface_engine::device::GpuInit;
use clockface_engine::paint::Color;
use clockface_engine::render::SceneRenderer;
use clockface_engine::text::FontId;
use clockface_engine::window::{Runtime, RuntimeConfig};

use crate::scene::UiScene;
use crate::widget::Element;

// ── FontMap ───────────────────────────────────────────────────────────────

/// Loaded font handles by registration name.
///
/// Handed to the builder closure in [`Application::run_widget`].
pub struct FontMap {
    fonts: HashMap<String, FontId>,
    default: Option<FontId>,
}

impl FontMap {
    /// `None` if the name was never registered or its bytes failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.fonts.get(name).copied()
    }

    /// First font that loaded successfully.
    pub fn default_font(&self) -> Option<FontId> {
        self.default
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Builder for a single-window app hosting one root widget.
///
/// ```rust,ignore
/// Application::new()
///     .title("Clock")
///     .font("body", font_bytes)
///     .run_widget(|fonts| ClockFace::with_zone(style, fonts.get("body").unwrap()).into());
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    min_size: Option<(f64, f64)>,
    fonts: Vec<(String, Vec<u8>)>,
    background: Color,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "clockface".to_string(),
            width: 600.0,
            height: 600.0,
            min_size: None,
            fonts: Vec::new(),
            background: Color::white(),
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_size = Some((width, height));
        self
    }

    /// Registers a named font. Fonts load in registration order.
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Clear color behind the root widget.
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    // ── Entry points ──────────────────────────────────────────────────────

    /// Runs the event loop with the widget returned by `build`, then exits
    /// the process. Runtime failures are logged and exit with status 1.
    pub fn run_widget<F>(self, build: F) -> !
    where
        F: FnOnce(&FontMap) -> Element,
    {
        match self.try_run_widget(build) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                log::error!("clockface runtime error: {e:#}");
                std::process::exit(1);
            }
        }
    }

    /// Like [`run_widget`](Self::run_widget) but returns once the event loop
    /// ends.
    pub fn try_run_widget<F>(self, build: F) -> anyhow::Result<()>
    where
        F: FnOnce(&FontMap) -> Element,
    {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: self.min_size.map(|(w, h)| LogicalSize::new(w, h)),
        };
        let state = UiAppState::new(self, build, Instant::now());
        Runtime::run(config, GpuInit::default(), state).context("clockface event loop failed")
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Engine-facing host for the root widget. Owns the renderers.
struct UiAppState {
    ui_scene: UiScene,
    renderer: SceneRenderer,
    background: Color,

    root: Element,
    /// A frame is owed regardless of timers (first frame, fired timer).
    dirty: bool,
}

impl UiAppState {
    fn new<F>(app: Application, build: F, now: Instant) -> Self
    where
        F: FnOnce(&FontMap) -> Element,
    {
        let mut ui_scene = UiScene::new();
        let mut font_map = FontMap { fonts: HashMap::new(), default: None };

        for (name, bytes) in &app.fonts {
            match ui_scene.load_font(bytes) {
                Ok(id) => {
                    font_map.default.get_or_insert(id);
                    font_map.fonts.insert(name.clone(), id);
                }
                Err(e) => log::warn!("failed to load font '{name}': {e}"),
            }
        }

        let mut root = build(&font_map);
        root.on_attach(now);

        Self {
            ui_scene,
            renderer: SceneRenderer::new(),
            background: app.background,
            root,
            dirty: true,
        }
    }
}

fn is_escape_press(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput { event, .. }
            if event.state == ElementState::Pressed
                && event.logical_key == Key::Named(NamedKey::Escape)
    )
}

impl EngineApp for UiAppState {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if is_escape_press(event) {
            log::debug!("escape pressed, exiting");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.logical_size();
        let scale = ctx.window.scale_factor();

        self.ui_scene.frame_ref(&self.root, viewport, scale);
        self.dirty = false;

        let scene = &mut self.ui_scene;
        let renderer = &mut self.renderer;
        ctx.render(self.background, |rctx, target| scene.render(renderer, rctx, target))
    }

    fn poll_redraw(&mut self, now: Instant) -> Redraw {
        if self.root.poll(now) {
            self.dirty = true;
        }
        if self.dirty {
            return Redraw::Now;
        }
        self.root.next_deadline().map_or(Redraw::Idle, Redraw::At)
    }

    fn on_exit(&mut self) {
        self.root.on_detach();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::clock::{ClockStyle, FixedClock};
    use crate::widgets::ClockFace;

    fn state(now: Instant) -> UiAppState {
        UiAppState::new(
            Application::new(),
            |fonts| {
                assert!(fonts.default_font().is_none());
                let source = FixedClock::hms(12, 0, 0).unwrap();
                ClockFace::new(ClockStyle::default(), source, FontId::new(0)).into()
            },
            now,
        )
    }

    #[test]
    fn first_frame_is_owed() {
        let t0 = Instant::now();
        assert_eq!(state(t0).poll_redraw(t0), Redraw::Now);
    }

    #[test]
    fn sleeps_until_the_attached_timer() {
        let t0 = Instant::now();
        let mut app = state(t0);
        app.dirty = false;
        assert_eq!(app.poll_redraw(t0), Redraw::At(t0 + Duration::from_secs(1)));
        assert_eq!(app.poll_redraw(t0 + Duration::from_secs(1)), Redraw::Now);
    }

    #[test]
    fn exit_detaches_the_root() {
        let t0 = Instant::now();
        let mut app = state(t0);
        app.dirty = false;
        app.on_exit();
        assert_eq!(app.poll_redraw(t0 + Duration::from_secs(3)), Redraw::Idle);
    }
}
