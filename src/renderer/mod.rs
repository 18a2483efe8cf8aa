//! Scene rendering: rocks, grid, bubbles and particle fields.
//!
//! [`SceneRenderer`] owns every GPU resource the decorative scene needs.
//! Static geometry (dodecahedron, sphere, grid lines, point positions) is
//! uploaded once at construction; per-frame work is limited to rewriting
//! the camera uniform, the mesh instance buffers and the point-field
//! uniforms in [`SceneRenderer::prepare`].
//!
//! Draw order is opaque rocks, grid lines, translucent bubbles, then the
//! point fields. Only the opaque pass writes depth.

pub mod geometry;
pub mod instances;

use wgpu::util::DeviceExt;

use self::geometry::{LineVertex, MeshVertex};
use self::instances::{FieldUniform, MeshInstance};
use crate::camera::{Camera, CameraUniform};
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::lighting::LightingUniform;
use crate::gpu::pipeline_helpers::{
    create_scene_pipeline, uniform_buffer, Blending, ScenePipelineDesc,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::scene::{Group, PointField, Scene};

const ROCK_RADIUS: f32 = 1.0;
const BUBBLE_RADIUS: f32 = 0.15;
const BUBBLE_SEGMENTS: u32 = 16;
/// Vertices per point sprite (two triangles).
const SPRITE_VERTICES: u32 = 6;

/// GPU data for one particle field.
struct FieldGpu {
    positions: wgpu::Buffer,
    count: u32,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    additive: bool,
}

impl FieldGpu {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        group: &Group<PointField>,
    ) -> Self {
        let name = group.id.name();
        let points: Vec<[f32; 3]> = group
            .content
            .positions
            .iter()
            .map(|p| p.to_array())
            .collect();
        let positions =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Points")),
                contents: bytemuck::cast_slice(&points),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let uniform =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{name} Field Uniform")),
                contents: bytemuck::cast_slice(&[instances::field(group)]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{name} Field Bind Group")),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });
        Self {
            positions,
            count: points.len() as u32,
            uniform,
            bind_group,
            additive: group.content.material.additive,
        }
    }
}

/// Draws a [`Scene`] onto the render context's surface.
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    mesh_opaque: wgpu::RenderPipeline,
    mesh_alpha: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    points_alpha: wgpu::RenderPipeline,
    points_additive: wgpu::RenderPipeline,

    rock_vertices: wgpu::Buffer,
    rock_vertex_count: u32,
    bubble_vertices: wgpu::Buffer,
    bubble_indices: wgpu::Buffer,
    bubble_index_count: u32,
    grid_vertices: wgpu::Buffer,
    grid_vertex_count: u32,

    rock_instances: TypedBuffer<MeshInstance>,
    bubble_instances: TypedBuffer<MeshInstance>,
    grid_instance: TypedBuffer<MeshInstance>,

    fields: Vec<FieldGpu>,
    depth: DepthTexture,
}

impl SceneRenderer {
    /// Create pipelines and upload the scene's static geometry.
    #[must_use]
    pub fn new(context: &RenderContext, scene: &Scene) -> Self {
        let device = &context.device;
        let format = context.format();

        let camera_uniform = CameraUniform::new();
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lighting = LightingUniform::new(&scene.lighting, format);
        let lighting_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[lighting]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let stages = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let globals_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globals Layout"),
                entries: &[uniform_buffer(0, stages), uniform_buffer(1, stages)],
            });
        let globals_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Globals Bind Group"),
                layout: &globals_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
            });
        let field_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Field Layout"),
                entries: &[uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
            });

        let mesh_shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/mesh.wgsl"));
        let lines_shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/lines.wgsl"));
        let points_shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/points.wgsl"));

        let globals = [&globals_layout];
        let mesh_buffers = [MeshVertex::LAYOUT, MeshInstance::LAYOUT];
        let mesh = |label, blending| {
            create_scene_pipeline(
                device,
                &ScenePipelineDesc {
                    label,
                    shader: &mesh_shader,
                    format,
                    buffers: &mesh_buffers,
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    blending,
                    bind_group_layouts: &globals,
                },
            )
        };
        let mesh_opaque = mesh("Rocks", Blending::Opaque);
        let mesh_alpha = mesh("Bubbles", Blending::Alpha);

        let lines = create_scene_pipeline(
            device,
            &ScenePipelineDesc {
                label: "Grid",
                shader: &lines_shader,
                format,
                buffers: &[LineVertex::LAYOUT, MeshInstance::LAYOUT],
                topology: wgpu::PrimitiveTopology::LineList,
                blending: Blending::Alpha,
                bind_group_layouts: &globals,
            },
        );

        let point_layouts = [&globals_layout, &field_layout];
        let points = |label, blending| {
            create_scene_pipeline(
                device,
                &ScenePipelineDesc {
                    label,
                    shader: &points_shader,
                    format,
                    buffers: &[instances::POINT_LAYOUT],
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    blending,
                    bind_group_layouts: &point_layouts,
                },
            )
        };
        let points_alpha = points("Points", Blending::Alpha);
        let points_additive = points("Points Additive", Blending::Additive);

        let rock_mesh = geometry::dodecahedron(ROCK_RADIUS);
        let rock_vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Rock Vertices"),
                contents: bytemuck::cast_slice(&rock_mesh),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let (sphere, sphere_indices) =
            geometry::uv_sphere(BUBBLE_RADIUS, BUBBLE_SEGMENTS, BUBBLE_SEGMENTS);
        let bubble_vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bubble Vertices"),
                contents: bytemuck::cast_slice(&sphere),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let bubble_indices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bubble Indices"),
                contents: bytemuck::cast_slice(&sphere_indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let grid = &scene.arena.content;
        let grid_mesh = geometry::grid_lines(
            grid.size,
            grid.divisions,
            grid.center_color,
            grid.line_color,
        );
        let grid_vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Grid Vertices"),
                contents: bytemuck::cast_slice(&grid_mesh),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let instance_usage = wgpu::BufferUsages::VERTEX;
        let rock_instances = TypedBuffer::with_capacity(
            device,
            "Rock Instances",
            scene.hero.content.rocks.len(),
            instance_usage,
        );
        let bubble_instances = TypedBuffer::with_capacity(
            device,
            "Bubble Instances",
            scene.water.content.bubbles.len(),
            instance_usage,
        );
        let grid_instance =
            TypedBuffer::with_capacity(device, "Grid Instance", 1, instance_usage);

        let fields = scene
            .point_fields()
            .iter()
            .map(|group| FieldGpu::new(device, &field_layout, group))
            .collect();

        let (width, height) = context.size();
        log::info!(
            "scene renderer ready: {} rock verts, {} bubble indices, {} grid verts",
            rock_mesh.len(),
            sphere_indices.len(),
            grid_mesh.len()
        );

        Self {
            camera_uniform,
            camera_buffer,
            globals_bind_group,
            mesh_opaque,
            mesh_alpha,
            lines,
            points_alpha,
            points_additive,
            rock_vertices,
            rock_vertex_count: rock_mesh.len() as u32,
            bubble_vertices,
            bubble_indices,
            bubble_index_count: sphere_indices.len() as u32,
            grid_vertices,
            grid_vertex_count: grid_mesh.len() as u32,
            rock_instances,
            bubble_instances,
            grid_instance,
            fields,
            depth: DepthTexture::new(device, width, height),
        }
    }

    /// Recreate the depth buffer if the surface size changed.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        if !self.depth.matches(width, height) {
            self.depth = DepthTexture::new(&context.device, width, height);
        }
    }

    /// Upload this frame's camera and scene transforms.
    pub fn prepare(&mut self, context: &RenderContext, scene: &Scene, camera: &Camera) {
        let device = &context.device;
        let queue = &context.queue;

        self.camera_uniform.update_view_proj(camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );

        let _ = self.rock_instances.write(device, queue, &instances::rocks(scene));
        let _ = self
            .bubble_instances
            .write(device, queue, &instances::bubbles(scene));
        let _ = self
            .grid_instance
            .write(device, queue, &[instances::grid(scene)]);

        for (gpu, group) in self.fields.iter().zip(scene.point_fields()) {
            let uniform: FieldUniform = instances::field(group);
            queue.write_buffer(&gpu.uniform, 0, bytemuck::cast_slice(&[uniform]));
        }
    }

    /// Render one frame to the surface.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the next swapchain texture
    /// cannot be acquired.
    pub fn render(&self, context: &RenderContext) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            self.draw_meshes(&mut pass);
            self.draw_fields(&mut pass);
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn draw_meshes(&self, pass: &mut wgpu::RenderPass<'_>) {
        if !self.rock_instances.is_empty() {
            pass.set_pipeline(&self.mesh_opaque);
            pass.set_vertex_buffer(0, self.rock_vertices.slice(..));
            pass.set_vertex_buffer(1, self.rock_instances.buffer().slice(..));
            pass.draw(
                0..self.rock_vertex_count,
                0..self.rock_instances.count() as u32,
            );
        }

        if !self.grid_instance.is_empty() {
            pass.set_pipeline(&self.lines);
            pass.set_vertex_buffer(0, self.grid_vertices.slice(..));
            pass.set_vertex_buffer(1, self.grid_instance.buffer().slice(..));
            pass.draw(0..self.grid_vertex_count, 0..1);
        }

        if !self.bubble_instances.is_empty() {
            pass.set_pipeline(&self.mesh_alpha);
            pass.set_vertex_buffer(0, self.bubble_vertices.slice(..));
            pass.set_vertex_buffer(1, self.bubble_instances.buffer().slice(..));
            pass.set_index_buffer(
                self.bubble_indices.slice(..),
                wgpu::IndexFormat::Uint16,
            );
            pass.draw_indexed(
                0..self.bubble_index_count,
                0,
                0..self.bubble_instances.count() as u32,
            );
        }
    }

    fn draw_fields(&self, pass: &mut wgpu::RenderPass<'_>) {
        for field in self.fields.iter().filter(|f| f.count > 0) {
            pass.set_pipeline(if field.additive {
                &self.points_additive
            } else {
                &self.points_alpha
            });
            pass.set_bind_group(1, &field.bind_group, &[]);
            pass.set_vertex_buffer(0, field.positions.slice(..));
            pass.draw(0..SPRITE_VERTICES, 0..field.count);
        }
    }
}
