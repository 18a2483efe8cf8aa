//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the depthscroll crate.
#[derive(Debug)]
pub enum DepthscrollError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML/JSON options parsing/serialization failure.
    OptionsParse(String),
    /// Malformed scroll-trigger band description.
    Trigger(String),
    /// A mandatory DOM root (window, document, canvas) is missing.
    Dom(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for DepthscrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Trigger(msg) => write!(f, "invalid trigger band: {msg}"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for DepthscrollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for DepthscrollError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for DepthscrollError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl From<wasm_bindgen::JsValue> for DepthscrollError {
    fn from(e: wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{e:?}"))
    }
}
