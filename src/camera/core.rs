use glam::{Mat4, Vec3};

use crate::animation::tween::AnimatedValues;
use crate::options::CameraOptions;

/// Perspective camera looking down -Z, moved by scroll and pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Viewing direction.
    pub forward: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and the camera
/// basis used to orient point sprites.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera right vector.
    pub right: [f32; 3],
    /// `tan(fovy / 2)`, converts sprite sizes to world units.
    pub sprite_scale: f32,
    /// Camera up vector.
    pub up: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Camera {
    /// Camera at the configured initial position.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.initial_position),
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Move the eye to the animated x/y, keeping its depth.
    pub fn follow(&mut self, values: &AnimatedValues) {
        self.eye.x = values.camera_x;
        self.eye.y = values.camera_y;
    }

    /// Update the aspect ratio for a new viewport size. Degenerate sizes
    /// keep the previous aspect.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_to_rh(self.eye, self.forward, self.up);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Unit vector pointing to the camera's right.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or(Vec3::X)
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            right: [1.0, 0.0, 0.0],
            sprite_scale: 1.0,
            up: [0.0, 1.0, 0.0],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.right = camera.right().to_array();
        self.up = camera.up.to_array();
        self.sprite_scale = (camera.fovy.to_radians() * 0.5).tan();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(&CameraOptions::default(), 16.0 / 9.0)
    }

    #[test]
    fn starts_at_initial_position() {
        let cam = camera();
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(cam.fovy, 75.0);
        assert_eq!(cam.right(), Vec3::X);
    }

    #[test]
    fn follows_animated_values() {
        let mut cam = camera();
        cam.follow(&AnimatedValues {
            camera_x: 1.5,
            camera_y: -90.0,
            ..AnimatedValues::default()
        });
        assert_eq!(cam.eye, Vec3::new(1.5, -90.0, 5.0));
    }

    #[test]
    fn projects_point_ahead_to_centre() {
        let cam = camera();
        let clip = cam.build_matrix() * Vec3::new(0.0, 0.0, -10.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn degenerate_sizes_keep_aspect() {
        let mut cam = camera();
        cam.resize(0.0, 100.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.resize(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
        assert_eq!(Camera::new(&CameraOptions::default(), f32::NAN).aspect, 1.0);
    }

    #[test]
    fn uniform_layout_is_aligned() {
        assert_eq!(size_of::<CameraUniform>() % 16, 0);
    }
}
