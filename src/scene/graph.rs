use glam::{Mat4, Quat, Vec3};

use super::palette::{Palette, PaletteSlot};
use crate::math::color::Rgb;
use crate::types::InstanceData;

/// Below this alpha an instance is drawn in the blended pass
pub const OPAQUE_THRESHOLD: f32 = 0.999;
/// Below this alpha an instance is not drawn at all
pub const VISIBLE_THRESHOLD: f32 = 0.001;

/// Handle to a node in a `SceneGraph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Unit mesh shapes. Every mesh is authored at unit size and scaled by its transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Cube spanning [-0.5, 0.5] on every axis
    Cuboid,
    /// Radius 0.5, height 1, axis along +Y, centred on the origin
    Cylinder,
    /// Unit square in the XZ plane facing +Y
    Plane,
    /// Thin beam from z = 0 to z = 1
    Line,
}

impl Primitive {
    pub const ALL: [Primitive; 4] = [
        Primitive::Cuboid,
        Primitive::Cylinder,
        Primitive::Plane,
        Primitive::Line,
    ];

    pub const fn index(self) -> usize {
        match self {
            Primitive::Cuboid => 0,
            Primitive::Cylinder => 1,
            Primitive::Plane => 2,
            Primitive::Line => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Box-like placement: centre and full extents
    pub fn placed(center: Vec3, size: Vec3) -> Self {
        Self {
            translation: center,
            rotation: Quat::IDENTITY,
            scale: size,
        }
    }

    /// Transform that stretches a `Primitive::Line` from `start` to `end`
    pub fn segment(start: Vec3, end: Vec3, thickness: f32) -> Self {
        let delta = end - start;
        let length = delta.length();
        let rotation = if length > f32::EPSILON {
            Quat::from_rotation_arc(Vec3::Z, delta / length)
        } else {
            Quat::IDENTITY
        };
        Self {
            translation: start,
            rotation,
            scale: Vec3::new(thickness, thickness, length),
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Palette entry the colour is refreshed from on theme change; `None` keeps `color` fixed
    pub slot: Option<PaletteSlot>,
    pub color: Rgb,
    pub emissive: f32,
    pub opacity: f32,
}

impl Material {
    pub fn solid(slot: PaletteSlot, palette: &Palette) -> Self {
        Self {
            slot: Some(slot),
            color: palette.color(slot),
            emissive: 0.0,
            opacity: 1.0,
        }
    }

    pub fn glowing(slot: PaletteSlot, palette: &Palette, emissive: f32) -> Self {
        Self {
            emissive,
            ..Self::solid(slot, palette)
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// The only node properties that change after construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedProps {
    pub opacity: f32,
    pub intensity: f32,
    pub scale: f32,
    pub offset: Vec3,
    pub rotation: Quat,
}

impl Default for AnimatedProps {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            intensity: 1.0,
            scale: 1.0,
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Mesh(Primitive),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    local: Transform,
    material: Material,
    pub animated: AnimatedProps,
}

impl SceneNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn local(&self) -> &Transform {
        &self.local
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    fn animated_local(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.local.scale * self.animated.scale,
            self.animated.rotation * self.local.rotation,
            self.local.translation + self.animated.offset,
        )
    }
}

/// Per-primitive instance lists, split by blending
#[derive(Debug, Default, Clone)]
pub struct InstanceBatches {
    pub opaque: [Vec<InstanceData>; 4],
    pub translucent: [Vec<InstanceData>; 4],
}

impl InstanceBatches {
    pub fn clear(&mut self) {
        self.opaque.iter_mut().for_each(Vec::clear);
        self.translucent.iter_mut().for_each(Vec::clear);
    }

    pub fn total(&self) -> usize {
        self.opaque.iter().chain(&self.translucent).map(Vec::len).sum()
    }
}

/// Flat scene graph. Parents are always inserted before their children,
/// so world transforms resolve in a single forward pass.
#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_group(&mut self, name: impl Into<String>, parent: Option<NodeId>, local: Transform) -> NodeId {
        self.push(SceneNode {
            name: name.into(),
            kind: NodeKind::Group,
            parent,
            local,
            material: Material {
                slot: None,
                color: [1.0; 3],
                emissive: 0.0,
                opacity: 1.0,
            },
            animated: AnimatedProps::default(),
        })
    }

    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        parent: Option<NodeId>,
        primitive: Primitive,
        local: Transform,
        material: Material,
    ) -> NodeId {
        self.push(SceneNode {
            name: name.into(),
            kind: NodeKind::Mesh(primitive),
            parent,
            local,
            material,
            animated: AnimatedProps::default(),
        })
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        debug_assert!(
            node.parent.map_or(true, |p| p.0 < self.nodes.len()),
            "parent must exist before child"
        );
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn props(&self, id: NodeId) -> Option<&AnimatedProps> {
        self.nodes.get(id.0).map(|n| &n.animated)
    }

    /// Mutable access to the animated subset of a node; `None` if the node is absent
    pub fn props_mut(&mut self, id: NodeId) -> Option<&mut AnimatedProps> {
        self.nodes.get_mut(id.0).map(|n| &mut n.animated)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes()
            .filter(move |(_, n)| n.parent == Some(parent))
            .map(|(id, _)| id)
    }

    /// Count of mesh nodes of one primitive kind
    pub fn mesh_count(&self, primitive: Primitive) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Mesh(primitive))
            .count()
    }

    /// Refresh palette-bound colours. Structure and animated state are untouched.
    /// Returns the number of recoloured nodes.
    pub fn recolor(&mut self, palette: &Palette) -> usize {
        let mut recolored = 0;
        for node in &mut self.nodes {
            if let Some(slot) = node.material.slot {
                node.material.color = palette.color(slot);
                recolored += 1;
            }
        }
        recolored
    }

    /// World matrices for every node, in node order
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = node
                .parent
                .and_then(|p| world.get(p.0).copied())
                .unwrap_or(Mat4::IDENTITY);
            world.push(parent * node.animated_local());
        }
        world
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.world_matrices().get(id.0).copied()
    }

    /// Flatten visible meshes into GPU instance batches
    pub fn collect_instances(&self, batches: &mut InstanceBatches) {
        batches.clear();
        let world = self.world_matrices();

        for (node, model) in self.nodes.iter().zip(world) {
            let NodeKind::Mesh(primitive) = node.kind else {
                continue;
            };
            let alpha = node.material.opacity * node.animated.opacity;
            if alpha < VISIBLE_THRESHOLD {
                continue;
            }
            let instance = InstanceData::new(
                model,
                node.material.color,
                alpha,
                node.material.emissive * node.animated.intensity,
            );
            let bucket = if alpha < OPAQUE_THRESHOLD {
                &mut batches.translucent
            } else {
                &mut batches.opaque
            };
            bucket[primitive.index()].push(instance);
        }
    }
}
