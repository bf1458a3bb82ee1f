use glam::{Mat4, Vec3};

/// Camera and lighting uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub time: f32,
    pub light_dir: [f32; 3],
    pub ambient: f32,
    pub fog_color: [f32; 3],
    pub fog_density: f32,
}

impl CameraUniform {
    pub fn new(view_proj: Mat4, eye: Vec3, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.to_array(),
            time,
            light_dir: Vec3::new(-0.35, -1.0, -0.45).normalize().to_array(),
            ambient: 0.25,
            fog_color: [0.0; 3],
            fog_density: 0.035,
        }
    }

    pub fn with_environment(mut self, fog_color: [f32; 3], ambient: f32) -> Self {
        self.fog_color = fog_color;
        self.ambient = ambient;
        self
    }
}

/// Mesh vertex: position and normal
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Per-instance data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4], // rgb + opacity
    pub emissive: f32,
    pub _pad: [f32; 3],
}

impl InstanceData {
    pub fn new(model: Mat4, rgb: [f32; 3], opacity: f32, emissive: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], opacity],
            emissive,
            _pad: [0.0; 3],
        }
    }

    pub fn opacity(&self) -> f32 {
        self.color[3]
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_slice(&self.model[3][..3])
    }
}
