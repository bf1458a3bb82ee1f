use glam::{Quat, Vec2, Vec3};

use super::graph::{Material, NodeId, Primitive, SceneGraph, Transform};
use super::palette::{Palette, PaletteSlot};

/// Builder for scene graphs.
///
/// Meshes are attached to the innermost open group, so composition code reads
/// top-down like the hierarchy it produces.
///
/// ```
/// use glam::Vec3;
/// use server_room::scene::{PaletteSlot, SceneBuilder, palette::DARK};
///
/// let mut builder = SceneBuilder::new(&DARK);
/// builder.begin_group("rack", Vec3::ZERO);
/// builder.cuboid("body", Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.6, 2.0, 1.0), PaletteSlot::RackBody);
/// builder.end_group();
/// let graph = builder.build();
/// assert_eq!(graph.len(), 2);
/// ```
pub struct SceneBuilder<'p> {
    graph: SceneGraph,
    palette: &'p Palette,
    groups: Vec<NodeId>,
}

impl<'p> SceneBuilder<'p> {
    pub fn new(palette: &'p Palette) -> Self {
        Self {
            graph: SceneGraph::new(),
            palette,
            groups: Vec::new(),
        }
    }

    pub fn palette(&self) -> &'p Palette {
        self.palette
    }

    fn parent(&self) -> Option<NodeId> {
        self.groups.last().copied()
    }

    /// Open a group positioned relative to the current group
    pub fn begin_group(&mut self, name: impl Into<String>, origin: Vec3) -> NodeId {
        self.begin_group_with(name, Transform::from_translation(origin))
    }

    pub fn begin_group_with(&mut self, name: impl Into<String>, local: Transform) -> NodeId {
        let id = self.graph.add_group(name, self.parent(), local);
        self.groups.push(id);
        id
    }

    pub fn end_group(&mut self) -> Option<NodeId> {
        self.groups.pop()
    }

    /// Attach a mesh with an explicit material
    pub fn mesh(&mut self, name: impl Into<String>, primitive: Primitive, local: Transform, material: Material) -> NodeId {
        self.graph.add_mesh(name, self.parent(), primitive, local, material)
    }

    pub fn solid(&self, slot: PaletteSlot) -> Material {
        Material::solid(slot, self.palette)
    }

    pub fn glowing(&self, slot: PaletteSlot, emissive: f32) -> Material {
        Material::glowing(slot, self.palette, emissive)
    }

    pub fn cuboid(&mut self, name: impl Into<String>, center: Vec3, size: Vec3, slot: PaletteSlot) -> NodeId {
        let material = self.solid(slot);
        self.mesh(name, Primitive::Cuboid, Transform::placed(center, size), material)
    }

    /// Upright cylinder centred on `center`
    pub fn cylinder(&mut self, name: impl Into<String>, center: Vec3, radius: f32, height: f32, slot: PaletteSlot) -> NodeId {
        let material = self.solid(slot);
        self.mesh(
            name,
            Primitive::Cylinder,
            Transform::placed(center, Vec3::new(radius * 2.0, height, radius * 2.0)),
            material,
        )
    }

    /// Cylinder lying along the X axis (wheels, rails)
    pub fn axle(&mut self, name: impl Into<String>, center: Vec3, radius: f32, length: f32, slot: PaletteSlot) -> NodeId {
        let material = self.solid(slot);
        let local = Transform::placed(center, Vec3::new(radius * 2.0, length, radius * 2.0))
            .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
        self.mesh(name, Primitive::Cylinder, local, material)
    }

    /// Horizontal plane with the given XZ extents
    pub fn plane(&mut self, name: impl Into<String>, center: Vec3, size: Vec2, slot: PaletteSlot) -> NodeId {
        let material = self.solid(slot);
        self.mesh(
            name,
            Primitive::Plane,
            Transform::placed(center, Vec3::new(size.x, 1.0, size.y)),
            material,
        )
    }

    pub fn line(&mut self, name: impl Into<String>, start: Vec3, end: Vec3, thickness: f32, slot: PaletteSlot) -> NodeId {
        let material = self.solid(slot);
        self.mesh(name, Primitive::Line, Transform::segment(start, end, thickness), material)
    }

    /// Connected line segments through `points`
    pub fn polyline(&mut self, name: &str, points: &[Vec3], thickness: f32, slot: PaletteSlot) -> Vec<NodeId> {
        points
            .windows(2)
            .enumerate()
            .map(|(i, pair)| self.line(format!("{name}/{i}"), pair[0], pair[1], thickness, slot))
            .collect()
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn build(self) -> SceneGraph {
        self.graph
    }
}
