// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-driven 3D landing page experience built on wgpu.
//!
//! Depthscroll renders a floating rock field, a wireframe arena and drifting
//! particles behind a long scrolling page. Scrolling moves the camera down
//! through the scene, each page section fades in as it arrives, and the
//! pointer tilts the arena for parallax.
//!
//! # Key entry points
//!
//! - [`Experience`] - all page state, driven by [`PageEvent`]s and a per-frame
//!   [`Experience::update`], answering with [`PageEffect`]s
//! - [`renderer::SceneRenderer`] - draws the [`scene::Scene`] through a
//!   [`camera::Camera`]
//! - [`Options`] - runtime configuration (scene, scroll mapping, section
//!   triggers, parallax, countdown)
//!
//! # Front ends
//!
//! With the `web` feature on `wasm32`, the `web` module mounts the
//! experience on a page whose `#webgl` canvas sits behind the content. The
//! `viewer` feature opens a native winit window that previews the scene
//! with the mouse wheel standing in for page scroll.

pub mod animation;
pub mod camera;
pub mod error;
pub mod experience;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod scroll;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;
pub mod widgets;

pub use error::DepthscrollError;
pub use experience::{Experience, PageEffect};
pub use input::PageEvent;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
