pub mod gpu_context;
pub mod mesh;
pub mod overlay_pass;
pub mod scene_pipeline;

pub use gpu_context::{GpuContext, SurfaceRecovery, WindowSurface};
pub use mesh::Mesh;
pub use overlay_pass::OverlayPass;
pub use scene_pipeline::ScenePipeline;
