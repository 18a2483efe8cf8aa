//! Per-frame GPU instance data derived from the scene.

use glam::Mat4;

use crate::scene::{Group, PointField, Scene, Transform};

/// Model matrix and RGBA colour of one mesh or line instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshInstance {
    /// World matrix, column major.
    pub model: [[f32; 4]; 4],
    /// Linear RGB + opacity.
    pub color: [f32; 4],
}

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
];

impl MeshInstance {
    /// Instance-step layout (locations 2-6).
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    };

    fn new(model: Mat4, rgb: [f32; 3], opacity: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], opacity],
        }
    }
}

/// Point field transform and material, matching the WGSL `Field` struct.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FieldUniform {
    /// World matrix of the field.
    pub model: [[f32; 4]; 4],
    /// Linear RGB + opacity.
    pub color: [f32; 4],
    /// x = sprite size.
    pub params: [f32; 4],
}

/// Point-position vertex layout (location 0, one per instance).
pub const POINT_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &POINT_ATTRIBUTES,
};

const POINT_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn world(group: &Transform, local: &Transform) -> Mat4 {
    group.matrix() * local.matrix()
}

/// One instance per rock.
#[must_use]
pub fn rocks(scene: &Scene) -> Vec<MeshInstance> {
    let group = &scene.hero;
    let material = group.content.material;
    group
        .content
        .rocks
        .iter()
        .map(|rock| {
            MeshInstance::new(world(&group.transform, rock), material.color, material.opacity)
        })
        .collect()
}

/// One instance per bubble.
#[must_use]
pub fn bubbles(scene: &Scene) -> Vec<MeshInstance> {
    let group = &scene.water;
    let material = group.content.material;
    group
        .content
        .bubbles
        .iter()
        .map(|b| {
            let transform = world(&group.transform, &b.transform);
            MeshInstance::new(transform, material.color, material.opacity)
        })
        .collect()
}

/// The grid's single instance. Line colours come from the vertices.
#[must_use]
pub fn grid(scene: &Scene) -> MeshInstance {
    let group = &scene.arena;
    MeshInstance::new(world(&group.transform, &group.content.transform), [1.0; 3], 1.0)
}

/// Uniform for one point field.
#[must_use]
pub fn field(group: &Group<PointField>) -> FieldUniform {
    let material = group.content.material;
    let [r, g, b] = material.color;
    FieldUniform {
        model: world(&group.transform, &group.content.transform).to_cols_array_2d(),
        color: [r, g, b, material.opacity],
        params: [material.size, 0.0, 0.0, 0.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SceneOptions;
    use crate::scene::builder::SceneBuilder;
    use glam::Vec3;

    fn scene() -> Scene {
        SceneBuilder::new(&SceneOptions::default()).build()
    }

    #[test]
    fn instance_counts_match_scene() {
        let scene = scene();
        assert_eq!(rocks(&scene).len(), 8);
        assert_eq!(bubbles(&scene).len(), 40);
    }

    #[test]
    fn children_inherit_group_depth() {
        let scene = scene();
        for instance in bubbles(&scene) {
            let origin = Mat4::from_cols_array_2d(&instance.model).transform_point3(Vec3::ZERO);
            assert!(origin.y < -90.0 + 8.5 && origin.y > -90.0 - 8.5);
            assert_eq!(instance.color[3], 0.35);
        }
        let stars = field(&scene.universe);
        assert_eq!(stars.model[3][1], -200.0);
        assert_eq!(stars.color[3], 0.6);
        assert_eq!(stars.params[0], 0.05);
    }

    #[test]
    fn uniform_sizes_are_aligned() {
        assert_eq!(size_of::<MeshInstance>(), 80);
        assert_eq!(size_of::<FieldUniform>(), 96);
    }
}
