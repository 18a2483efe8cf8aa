//! Native preview window backed by winit.
//!
//! There is no page here, so the viewer stands in for one: sections are
//! stacked one viewport tall each, the mouse wheel scrolls that virtual
//! page through the smooth scroller, and the number keys jump to sections
//! the way navigation anchors do. The countdown is shown in the title bar.
//!
//! ```no_run
//! # use depthscroll::viewer::Viewer;
//! Viewer::builder()
//!     .with_title("depthscroll")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::error::DepthscrollError;
use crate::experience::{Experience, PageEffect};
use crate::gpu::render_context::RenderContext;
use crate::input::PageEvent;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scroll::{PageLayout, SectionBounds};
use crate::util::frame_timing::seconds;

/// Pixels scrolled per wheel line.
const LINE_HEIGHT: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "depthscroll".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A desktop window previewing the scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Viewer`] if the event loop cannot be
    /// created or exits with an error, and [`DepthscrollError::Trigger`]
    /// if a configured trigger band does not parse.
    pub fn run(self) -> Result<(), DepthscrollError> {
        let event_loop =
            EventLoop::new().map_err(|e| DepthscrollError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let now = Instant::now();
        let mut app = ViewerApp {
            window: None,
            gpu: None,
            experience: Experience::new(self.options, now)?,
            title: self.title,
            last_countdown: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| DepthscrollError::Viewer(e.to_string()))
    }
}

/// Stand-in page: every section one viewport tall, in checkpoint order.
#[must_use]
pub fn stacked_layout<'a>(
    sections: impl IntoIterator<Item = &'a str>,
    width: f32,
    height: f32,
) -> PageLayout {
    let sections: FxHashMap<String, SectionBounds> = sections
        .into_iter()
        .enumerate()
        .map(|(i, id)| (id.to_owned(), SectionBounds::new(i as f32 * height, height)))
        .collect();
    PageLayout {
        viewport_width: width,
        viewport_height: height,
        document_height: sections.len() as f32 * height,
        sections,
        ..PageLayout::default()
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct Gpu {
    context: RenderContext,
    renderer: SceneRenderer,
}

struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    experience: Experience,
    title: String,
    last_countdown: Option<Instant>,
}

impl ViewerApp {
    fn dispatch(&mut self, event: PageEvent) {
        let effects = self.experience.handle_event(event, Instant::now());
        self.apply(effects);
    }

    fn resize(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        let scale = window.scale_factor();
        let logical = window.inner_size().to_logical::<f32>(scale);
        self.dispatch(PageEvent::Resize {
            width: logical.width,
            height: logical.height,
            pixel_ratio: scale as f32,
        });
    }

    fn apply(&mut self, effects: Vec<PageEffect>) {
        for effect in effects {
            match effect {
                PageEffect::ResizeSurface { width, height } => {
                    if let Some(gpu) = &mut self.gpu {
                        if gpu.context.resize(width, height) {
                            gpu.renderer.resize(&gpu.context);
                        }
                    }
                }
                PageEffect::RefreshLayout => {
                    let (width, height) = self.viewport();
                    let layout = stacked_layout(
                        self.experience
                            .options()
                            .sections
                            .checkpoints
                            .iter()
                            .map(|cp| cp.id.as_str()),
                        width,
                        height,
                    );
                    let follow_up = self
                        .experience
                        .handle_event(PageEvent::Layout(layout), Instant::now());
                    self.apply(follow_up);
                }
                PageEffect::NavActive { id } => log::info!("section: {id}"),
                PageEffect::Countdown(display) => {
                    if let Some(window) = &self.window {
                        let [d, h, m, s] = display.units.padded();
                        let status = display
                            .live_label
                            .unwrap_or_else(|| format!("{d}:{h}:{m}:{s}"));
                        window.set_title(&format!("{} | {status}", self.title));
                    }
                }
                // Page styling has no counterpart in the preview.
                _ => {}
            }
        }
    }

    fn viewport(&self) -> (f32, f32) {
        self.window.as_ref().map_or((0.0, 0.0), |w| {
            let logical = w.inner_size().to_logical::<f32>(w.scale_factor());
            (logical.width, logical.height)
        })
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let interval = seconds(self.experience.options().countdown.interval);
        if self
            .last_countdown
            .is_none_or(|last| now.duration_since(last) >= interval)
        {
            self.last_countdown = Some(now);
            self.dispatch(PageEvent::CountdownTick(chrono::Utc::now()));
        }

        let effects = self.experience.update(now);
        self.apply(effects);

        if let Some(gpu) = &mut self.gpu {
            gpu.renderer.prepare(
                &gpu.context,
                self.experience.scene(),
                self.experience.camera(),
            );
            match gpu.renderer.render(&gpu.context) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                    gpu.context.reconfigure();
                }
                Err(e) => log::error!("render error: {e:?}"),
            }
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn key(&mut self, code: KeyCode) {
        let index = match code {
            KeyCode::Digit1 | KeyCode::Home => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            KeyCode::Digit7 => 6,
            KeyCode::Digit8 => 7,
            _ => return,
        };
        let id = self
            .experience
            .options()
            .sections
            .checkpoints
            .get(index)
            .map(|cp| cp.id.clone());
        if let Some(id) = id {
            self.dispatch(PageEvent::AnchorClicked { id });
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_transparent(true)
                .with_inner_size(winit::dpi::LogicalSize::new(logical_w, logical_h))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let context = match pollster::block_on(RenderContext::new(
            Arc::clone(&window),
            (inner.width, inner.height),
        )) {
            Ok(context) => context,
            Err(e) => {
                log::error!("Failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        };
        let renderer = SceneRenderer::new(&context, self.experience.scene());

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(Gpu { context, renderer });
        self.resize();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                let logical = position.to_logical::<f32>(scale);
                self.dispatch(PageEvent::PointerMoved {
                    x: logical.x,
                    y: logical.y,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports wheel-down as negative.
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.dispatch(PageEvent::Wheel { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key(code);
                }
            }

            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::Checkpoint;

    #[test]
    fn stacked_layout_tiles_the_page() {
        let checkpoints = Checkpoint::defaults();
        let layout = stacked_layout(checkpoints.iter().map(|cp| cp.id.as_str()), 1280.0, 720.0);
        assert_eq!(layout.document_height, 8.0 * 720.0);
        assert_eq!(layout.section("hero"), Some(SectionBounds::new(0.0, 720.0)));
        assert_eq!(layout.section("join"), Some(SectionBounds::new(7.0 * 720.0, 720.0)));
        assert_eq!(layout.section("missing"), None);
    }
}
