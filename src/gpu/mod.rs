//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable instance buffers,
//! the lighting uniform, and pipeline boilerplate.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Lighting and fog uniform.
pub mod lighting;
/// Shared wgpu boilerplate for scene pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;
