//! Browser front end (`web` feature).
//!
//! JS entry points:
//!
//! - `start()` runs on module load and installs the panic hook and logger;
//! - `mount(options_json?)` builds the [`Experience`], starts the GPU
//!   renderer on `#webgl` and attaches every listener;
//! - `switch_track(event, track)` is the inline `onclick` handler of the
//!   prize track tabs;
//! - `unmount()` detaches everything.
//!
//! All callbacks share one `Rc<RefCell<App>>`. Listeners, the countdown
//! interval and the frame loop are RAII handles owned by the mounted
//! instance, so dropping it unsubscribes them.

pub mod dom;
pub mod listener;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_time::Instant;

use self::dom::Page;
use self::listener::{AnimationFrameLoop, EventListener, Interval};
use crate::error::DepthscrollError;
use crate::experience::{Experience, PageEffect};
use crate::gpu::render_context::RenderContext;
use crate::input::PageEvent;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::widgets::Track;

struct Gpu {
    context: RenderContext,
    renderer: SceneRenderer,
}

struct App {
    experience: Experience,
    page: Page,
    gpu: Option<Gpu>,
}

type SharedApp = Rc<RefCell<App>>;

struct Mounted {
    app: SharedApp,
    _listeners: Vec<EventListener>,
    _countdown: Interval,
    _frames: AnimationFrameLoop,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Module start hook: panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already initialised");
    }
}

/// Build the experience and attach it to the page. `options_json`
/// overrides the defaults field by field. Mounting again replaces the
/// previous instance.
///
/// # Errors
///
/// Fails without a window, document or `#webgl` canvas, or when the options
/// or a trigger band do not parse.
#[wasm_bindgen]
pub fn mount(options_json: Option<String>) -> Result<(), JsValue> {
    unmount();
    let mounted = build(options_json.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted));
    Ok(())
}

/// Detach every listener, timer and the frame loop.
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|slot| slot.borrow_mut().take());
    if previous.is_some() {
        log::info!("experience unmounted");
    }
}

/// Show a prize track. Bound from inline `onclick="switch_track(event, 'senior')"`.
#[wasm_bindgen]
pub fn switch_track(event: web_sys::Event, track: &str) {
    event.prevent_default();
    event.stop_propagation();
    let Some(app) = MOUNTED.with(|slot| slot.borrow().as_ref().map(|m| Rc::clone(&m.app)))
    else {
        log::warn!("switch_track called before mount");
        return;
    };
    let track = Track::from_name(track);
    let event = {
        let app = app.borrow();
        let target = event
            .current_target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .filter(|el| el.class_list().contains("tab-btn"));
        let (labels, clicked) = app.page.tab_buttons(target.as_ref());
        PageEvent::TrackSelected {
            track,
            clicked,
            labels,
            cards: app.page.card_count(track),
        }
    };
    dispatch(&app, event);
}

fn build(options_json: Option<&str>) -> Result<Mounted, DepthscrollError> {
    let options = match options_json {
        Some(json) => Options::from_json(json)?,
        None => Options::default(),
    };
    let sections = options
        .sections
        .checkpoints
        .iter()
        .map(|cp| cp.id.clone())
        .collect();
    let page = Page::new(sections, options.sections.tracks.section.clone())?;
    let canvas = page.canvas()?;
    let window = page.window().clone();
    let countdown_ms = (options.countdown.interval * 1000.0).round() as i32;
    let experience = Experience::new(options, Instant::now())?;

    let app = Rc::new(RefCell::new(App {
        experience,
        page,
        gpu: None,
    }));

    let (width, height) = app.borrow().page.viewport();
    let pixel_ratio = app.borrow().page.pixel_ratio();
    dispatch(
        &app,
        PageEvent::Resize {
            width,
            height,
            pixel_ratio,
        },
    );
    let metrics = app.borrow().page.metrics();
    dispatch(&app, PageEvent::Scroll(metrics));
    dispatch(&app, PageEvent::CountdownTick(chrono::Utc::now()));

    spawn_gpu(&app, canvas);
    let listeners = attach_listeners(&app, &window)?;

    let countdown = {
        let app = Rc::clone(&app);
        Interval::new(&window, countdown_ms.max(1), move || {
            dispatch(&app, PageEvent::CountdownTick(chrono::Utc::now()));
        })?
    };
    let frames = {
        let app = Rc::clone(&app);
        AnimationFrameLoop::start(&window, move |_| frame(&app))?
    };

    log::info!("experience mounted with {} listeners", listeners.len());
    Ok(Mounted {
        app,
        _listeners: listeners,
        _countdown: countdown,
        _frames: frames,
    })
}

fn attach_listeners(
    app: &SharedApp,
    window: &web_sys::Window,
) -> Result<Vec<EventListener>, DepthscrollError> {
    let mut listeners = Vec::new();

    let shared = Rc::clone(app);
    listeners.push(EventListener::passive(window, "scroll", move |_| {
        let metrics = shared.borrow().page.metrics();
        dispatch(&shared, PageEvent::Scroll(metrics));
    })?);

    let shared = Rc::clone(app);
    listeners.push(EventListener::passive(window, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() {
            dispatch(
                &shared,
                PageEvent::PointerMoved {
                    x: mouse.client_x() as f32,
                    y: mouse.client_y() as f32,
                },
            );
        }
    })?);

    let shared = Rc::clone(app);
    listeners.push(EventListener::new(window, "resize", move |_| {
        let (width, height, pixel_ratio) = {
            let app = shared.borrow();
            let (w, h) = app.page.viewport();
            (w, h, app.page.pixel_ratio())
        };
        dispatch(
            &shared,
            PageEvent::Resize {
                width,
                height,
                pixel_ratio,
            },
        );
    })?);

    let state = app.borrow();
    let page = &state.page;
    for anchor in page.all("a[href^=\"#\"]") {
        let Some(id) = anchor
            .get_attribute("href")
            .map(|href| href.trim_start_matches('#').to_owned())
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        let shared = Rc::clone(app);
        listeners.push(EventListener::new(&anchor, "click", move |event| {
            event.prevent_default();
            dispatch(&shared, PageEvent::AnchorClicked { id: id.clone() });
        })?);
    }

    for (index, item) in page.all(".faq-item").iter().enumerate() {
        let Ok(Some(question)) = item.query_selector(".faq-question") else {
            log::warn!("faq item {index} has no .faq-question");
            continue;
        };
        let shared = Rc::clone(app);
        listeners.push(EventListener::new(&question, "click", move |_| {
            dispatch(&shared, PageEvent::FaqClicked { index });
        })?);
    }

    let document = page.document();
    match (
        document.get_element_by_id("faqTrigger"),
        document.get_element_by_id("faqContent"),
    ) {
        (Some(trigger), Some(_)) => {
            let shared = Rc::clone(app);
            listeners.push(EventListener::new(&trigger, "click", move |_| {
                dispatch(&shared, PageEvent::FaqGateClicked);
            })?);
        }
        _ => log::debug!("faq gate elements missing; gate not attached"),
    }

    Ok(listeners)
}

fn spawn_gpu(app: &SharedApp, canvas: web_sys::HtmlCanvasElement) {
    let app = Rc::clone(app);
    wasm_bindgen_futures::spawn_local(async move {
        let size = (canvas.width(), canvas.height());
        match RenderContext::new(wgpu::SurfaceTarget::Canvas(canvas), size).await {
            Ok(context) => {
                let renderer = SceneRenderer::new(&context, app.borrow().experience.scene());
                app.borrow_mut().gpu = Some(Gpu { context, renderer });
            }
            Err(e) => log::error!("renderer unavailable: {e}"),
        }
    });
}

/// Feed one event through the experience and apply the effects, following
/// layout refreshes.
fn dispatch(app: &SharedApp, event: PageEvent) {
    let mut app = app.borrow_mut();
    let effects = app.experience.handle_event(event, Instant::now());
    apply(&mut app, effects);
}

fn frame(app: &SharedApp) {
    let mut app = app.borrow_mut();
    let effects = app.experience.update(Instant::now());
    apply(&mut app, effects);

    let App {
        experience, gpu, ..
    } = &mut *app;
    let Some(gpu) = gpu else {
        return;
    };
    gpu.renderer
        .prepare(&gpu.context, experience.scene(), experience.camera());
    match gpu.renderer.render(&gpu.context) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            gpu.context.reconfigure();
        }
        Err(e) => log::error!("render error: {e:?}"),
    }
}

fn apply(app: &mut App, effects: Vec<PageEffect>) {
    let mut pending = effects;
    while !pending.is_empty() {
        let mut follow_up = Vec::new();
        for effect in &pending {
            match effect {
                PageEffect::RefreshLayout => {
                    let layout = app.page.measure();
                    follow_up.extend(
                        app.experience
                            .handle_event(PageEvent::Layout(layout), Instant::now()),
                    );
                }
                PageEffect::ResizeSurface { width, height } => {
                    app.page.size_canvas(*width, *height);
                    if let Some(gpu) = &mut app.gpu {
                        if gpu.context.resize(*width, *height) {
                            gpu.renderer.resize(&gpu.context);
                        }
                    }
                }
                other => app.page.apply(other, app.experience.track()),
            }
        }
        pending = follow_up;
    }
}
