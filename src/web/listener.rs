//! RAII subscriptions to browser callbacks.
//!
//! Each type registers a Rust closure with the browser on construction and
//! unregisters it on drop, so dropping the owner detaches everything.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::error::DepthscrollError;

/// A DOM event listener, removed when dropped.
pub struct EventListener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
    /// Listen for `event` on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Dom`] if the browser rejects the
    /// registration.
    pub fn new(
        target: &web_sys::EventTarget,
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, DepthscrollError> {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        target.add_event_listener_with_callback(
            event,
            callback.as_ref().unchecked_ref(),
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Like [`EventListener::new`], registered as passive (the callback
    /// never calls `preventDefault`).
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Dom`] if the browser rejects the
    /// registration.
    pub fn passive(
        target: &web_sys::EventTarget,
        event: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, DepthscrollError> {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove '{}' listener: {e:?}", self.event);
        }
    }
}

/// A `setInterval` timer, cleared when dropped.
pub struct Interval {
    window: web_sys::Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    /// Call `callback` every `millis` milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Dom`] if the timer cannot be created.
    pub fn new(
        window: &web_sys::Window,
        millis: i32,
        callback: impl FnMut() + 'static,
    ) -> Result<Self, DepthscrollError> {
        let callback = Closure::<dyn FnMut()>::new(callback);
        let handle = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            )?;
        Ok(Self {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop, cancelled when dropped.
pub struct AnimationFrameLoop {
    window: web_sys::Window,
    handle: Rc<Cell<i32>>,
    callback: FrameCallback,
}

impl AnimationFrameLoop {
    /// Call `frame` with the rAF timestamp once per display frame.
    ///
    /// # Errors
    ///
    /// Returns [`DepthscrollError::Dom`] if the first frame cannot be
    /// requested.
    pub fn start(
        window: &web_sys::Window,
        mut frame: impl FnMut(f64) + 'static,
    ) -> Result<Self, DepthscrollError> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(0));

        // The closure re-requests itself through this second reference.
        let next = Rc::clone(&callback);
        let next_handle = Rc::clone(&handle);
        let next_window = window.clone();
        *callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
            frame(timestamp);
            if let Some(cb) = next.borrow().as_ref() {
                match next_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => next_handle.set(id),
                    Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
                }
            }
        }));

        if let Some(cb) = callback.borrow().as_ref() {
            handle.set(window.request_animation_frame(cb.as_ref().unchecked_ref())?);
        }
        Ok(Self {
            window: window.clone(),
            handle,
            callback,
        })
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        let _ = self.window.cancel_animation_frame(self.handle.get());
        // Breaks the closure's reference cycle.
        let _ = self.callback.borrow_mut().take();
    }
}
