//! Instanced rasterisation of the scene graph.
//!
//! One unit mesh per `Primitive`, one instance buffer per primitive and blend
//! mode. Opaque instances draw first with depth writes; translucent ones draw
//! afterwards, sorted back to front, with depth testing only.

use glam::Vec3;
use wgpu::util::DeviceExt;

use super::gpu_context::GpuContext;
use super::mesh::Mesh;
use crate::scene::{InstanceBatches, Primitive};
use crate::types::{CameraUniform, InstanceData, Vertex};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const MIN_INSTANCE_CAPACITY: usize = 64;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32,
];

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, primitive: Primitive) -> Self {
        let mesh = Mesh::for_primitive(primitive);
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: mesh.index_count(),
        }
    }
}

/// Instance buffer that grows by doubling and never shrinks
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, capacity: usize) -> Self {
        Self {
            buffer: Self::allocate(device, capacity),
            capacity,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[InstanceData]) {
        self.len = instances.len() as u32;
        if instances.is_empty() {
            return;
        }
        let needed = grown_capacity(self.capacity, instances.len());
        if needed != self.capacity {
            log::debug!("Growing instance buffer {} -> {}", self.capacity, needed);
            self.buffer = Self::allocate(device, needed);
            self.capacity = needed;
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
    }

    fn used_bytes(&self) -> u64 {
        self.len as u64 * std::mem::size_of::<InstanceData>() as u64
    }
}

/// Capacity needed to hold `needed` instances, doubling from `current`
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two().max(MIN_INSTANCE_CAPACITY)
    }
}

/// Orders translucent instances farthest first
pub fn sort_back_to_front(instances: &mut [InstanceData], eye: Vec3) {
    instances.sort_by(|a, b| {
        let da = a.position().distance_squared(eye);
        let db = b.position().distance_squared(eye);
        db.total_cmp(&da)
    });
}

pub struct ScenePipeline {
    opaque: wgpu::RenderPipeline,
    translucent: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
    opaque_instances: Vec<InstanceBuffer>,
    translucent_instances: Vec<InstanceBuffer>,
    depth_view: wgpu::TextureView,
}

impl ScenePipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let opaque = Self::create_pipeline(device, &layout, &shader, format, false);
        let translucent = Self::create_pipeline(device, &layout, &shader, format, true);

        let meshes = Primitive::ALL.iter().map(|p| GpuMesh::upload(device, *p)).collect();
        let buffers = || {
            Primitive::ALL
                .iter()
                .map(|_| InstanceBuffer::new(device, MIN_INSTANCE_CAPACITY))
                .collect::<Vec<_>>()
        };

        Self {
            opaque,
            translucent,
            camera_buffer,
            camera_bind_group,
            meshes,
            opaque_instances: buffers(),
            translucent_instances: buffers(),
            depth_view: Self::create_depth_view(device, width, height),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        translucent: bool,
    ) -> wgpu::RenderPipeline {
        let (label, blend) = if translucent {
            ("Translucent Pipeline", wgpu::BlendState::ALPHA_BLENDING)
        } else {
            ("Opaque Pipeline", wgpu::BlendState::REPLACE)
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &VERTEX_ATTRIBUTES,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &INSTANCE_ATTRIBUTES,
                    },
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: !translucent,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_view = Self::create_depth_view(device, width, height);
    }

    /// Uploads camera and instances, then records the scene pass
    pub fn render(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        camera: &CameraUniform,
        batches: &mut InstanceBatches,
        clear: [f32; 3],
    ) {
        let (device, queue) = (gpu.device(), gpu.queue());
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[*camera]));

        let eye = Vec3::from(camera.eye);
        for (i, instances) in batches.opaque.iter().enumerate() {
            self.opaque_instances[i].upload(device, queue, instances);
        }
        for (i, instances) in batches.translucent.iter_mut().enumerate() {
            sort_back_to_front(instances, eye);
            self.translucent_instances[i].upload(device, queue, instances);
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color(clear)),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_bind_group(0, &self.camera_bind_group, &[]);

        pass.set_pipeline(&self.opaque);
        for (mesh, instances) in self.meshes.iter().zip(&self.opaque_instances) {
            draw_batch(&mut pass, mesh, instances);
        }

        pass.set_pipeline(&self.translucent);
        for (mesh, instances) in self.meshes.iter().zip(&self.translucent_instances) {
            draw_batch(&mut pass, mesh, instances);
        }
    }

    /// Clears to the background colour only; used while the 3D layer is down
    pub fn clear(encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, clear: [f32; 3]) {
        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color(clear)),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
    }
}

fn draw_batch(pass: &mut wgpu::RenderPass<'_>, mesh: &GpuMesh, instances: &InstanceBuffer) {
    if instances.len == 0 {
        return;
    }
    pass.set_vertex_buffer(0, mesh.vertices.slice(..));
    pass.set_vertex_buffer(1, instances.buffer.slice(..instances.used_bytes()));
    pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
    pass.draw_indexed(0..mesh.index_count, 0, 0..instances.len);
}

/// sRGB palette colour to the linear clear colour of an sRGB surface
pub fn clear_color(rgb: [f32; 3]) -> wgpu::Color {
    let linear = |c: f32| (c.clamp(0.0, 1.0) as f64).powf(2.2);
    wgpu::Color {
        r: linear(rgb[0]),
        g: linear(rgb[1]),
        b: linear(rgb[2]),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    fn at(x: f32) -> InstanceData {
        InstanceData::new(Mat4::from_translation(Vec3::new(x, 0.0, 0.0)), [1.0; 3], 0.5, 0.0)
    }

    #[test]
    fn capacity_doubles_only_when_needed() {
        assert_eq!(grown_capacity(64, 10), 64);
        assert_eq!(grown_capacity(64, 64), 64);
        assert_eq!(grown_capacity(64, 65), 128);
        assert_eq!(grown_capacity(128, 1000), 1024);
        assert_eq!(grown_capacity(0, 1), MIN_INSTANCE_CAPACITY);
    }

    #[test]
    fn translucent_sorts_farthest_first() {
        let mut instances = vec![at(1.0), at(5.0), at(3.0)];
        sort_back_to_front(&mut instances, Vec3::ZERO);
        let xs: Vec<f32> = instances.iter().map(|i| i.position().x).collect();
        assert_eq!(xs, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn instance_attributes_cover_the_struct() {
        let last = INSTANCE_ATTRIBUTES[5];
        assert_eq!(last.shader_location, 7);
        assert_eq!(last.offset, 80);
        assert!(last.offset + 4 <= std::mem::size_of::<InstanceData>() as u64);
    }

    #[test]
    fn clear_colour_is_linearised() {
        let c = clear_color([0.5, 0.0, 1.0]);
        assert!(c.r < 0.5 && c.r > 0.2);
        assert_eq!((c.g, c.b, c.a), (0.0, 1.0, 1.0));
    }
}
