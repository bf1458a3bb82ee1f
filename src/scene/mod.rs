pub mod builder;
pub mod graph;
pub mod palette;

pub use builder::SceneBuilder;
pub use graph::{
    AnimatedProps, InstanceBatches, Material, NodeId, NodeKind, Primitive, SceneGraph, SceneNode, Transform,
};
pub use palette::{Palette, PaletteSlot};
