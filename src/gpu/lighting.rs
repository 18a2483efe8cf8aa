//! Scene lighting and fog uniform.

use crate::options::LightingOptions;

/// Lights and fog shared by every scene shader.
/// NOTE: Must match the WGSL `Lighting` struct layout exactly (80 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Direction *toward* the key light (normalized).
    pub key_dir: [f32; 3],
    /// Key light intensity.
    pub key_intensity: f32,
    /// Point light world position.
    pub point_position: [f32; 3],
    /// Point light intensity.
    pub point_intensity: f32,
    /// Point light linear RGB.
    pub point_color: [f32; 3],
    /// Distance at which the point light fades to zero.
    pub point_range: f32,
    /// Fog linear RGB.
    pub fog_color: [f32; 3],
    /// Exponential-squared fog density.
    pub fog_density: f32,
    /// Ambient intensity (white).
    pub ambient: f32,
    /// 1.0 when the surface is not sRGB and shaders must encode.
    pub encode_srgb: f32,
    pub(crate) _pad: [f32; 2],
}

impl LightingUniform {
    /// Uniform from options, for a surface of `format`.
    #[must_use]
    pub fn new(options: &LightingOptions, format: wgpu::TextureFormat) -> Self {
        Self {
            key_dir: normalize(options.key_position),
            key_intensity: options.key_intensity,
            point_position: options.point_position,
            point_intensity: options.point_intensity,
            point_color: options.point_color,
            point_range: options.point_range.max(f32::EPSILON),
            fog_color: options.fog_color,
            fog_density: options.fog_density.max(0.0),
            ambient: options.ambient,
            encode_srgb: if format.is_srgb() { 0.0 } else { 1.0 },
            _pad: [0.0; 2],
        }
    }

    /// Fog factor (0 = clear, 1 = fully fogged) at view distance `depth`.
    #[must_use]
    pub fn fog_factor(&self, depth: f32) -> f32 {
        let d = self.fog_density * depth;
        1.0 - (-d * d).exp()
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let v = glam::Vec3::from_array(v).normalize_or(glam::Vec3::Y);
    v.to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_shader() {
        assert_eq!(size_of::<LightingUniform>(), 80);
    }

    #[test]
    fn key_light_points_at_source() {
        let options = LightingOptions::default();
        let u = LightingUniform::new(&options, wgpu::TextureFormat::Bgra8UnormSrgb);
        let len = u.key_dir.iter().map(|c| c * c).sum::<f32>().sqrt();
        assert!((len - 1.0).abs() < 1e-6);
        assert!(u.key_dir[1] > 0.0);
        assert_eq!(u.encode_srgb, 0.0);
        let linear = LightingUniform::new(&options, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(linear.encode_srgb, 1.0);
    }

    #[test]
    fn fog_thickens_with_distance() {
        let u = LightingUniform::new(&LightingOptions::default(), wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(u.fog_factor(0.0), 0.0);
        assert!(u.fog_factor(10.0) < u.fog_factor(50.0));
        assert!(u.fog_factor(1000.0) > 0.999);
    }
}
