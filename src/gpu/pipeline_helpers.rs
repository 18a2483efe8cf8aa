//! Shared wgpu boilerplate for the scene pipelines.

use super::texture::DepthTexture;

/// Uniform buffer binding visible to the given stages.
#[must_use]
pub fn uniform_buffer(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// How a scene pipeline blends and writes depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    /// No blending; writes depth.
    Opaque,
    /// Standard alpha blending; tests but does not write depth.
    Alpha,
    /// Additive blending; tests but does not write depth.
    Additive,
}

impl Blending {
    fn state(self) -> Option<wgpu::BlendState> {
        match self {
            Self::Opaque => None,
            Self::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            Self::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
        }
    }

    fn writes_depth(self) -> bool {
        matches!(self, Self::Opaque)
    }
}

/// Description of a scene pipeline.
pub struct ScenePipelineDesc<'a> {
    /// Debug label prefix.
    pub label: &'a str,
    /// Module with `vs_main` / `fs_main`.
    pub shader: &'a wgpu::ShaderModule,
    /// Surface format.
    pub format: wgpu::TextureFormat,
    /// Vertex buffer layouts.
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
    /// Primitive topology.
    pub topology: wgpu::PrimitiveTopology,
    /// Blending and depth writes.
    pub blending: Blending,
    /// Bind group layouts, in group order.
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
}

/// Create a depth-tested render pipeline with `vs_main` / `fs_main` entry
/// points and a single color target.
#[must_use]
pub fn create_scene_pipeline(
    device: &wgpu::Device,
    desc: &ScenePipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let label = desc.label;
    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Pipeline Layout")),
            bind_group_layouts: desc.bind_group_layouts,
            push_constant_ranges: &[],
        });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: desc.buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.format,
                blend: desc.blending.state(),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthTexture::FORMAT,
            depth_write_enabled: desc.blending.writes_depth(),
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
