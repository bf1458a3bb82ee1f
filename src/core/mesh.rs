use glam::Vec3;

use crate::scene::Primitive;
use crate::types::Vertex;

const CYLINDER_SEGMENTS: u16 = 24;

/// Indexed triangle list with counter-clockwise outward faces
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn for_primitive(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Cuboid => Self::cuboid(Vec3::splat(-0.5), Vec3::splat(0.5)),
            Primitive::Cylinder => Self::cylinder(CYLINDER_SEGMENTS),
            Primitive::Plane => Self::plane(),
            Primitive::Line => Self::cuboid(Vec3::new(-0.5, -0.5, 0.0), Vec3::new(0.5, 0.5, 1.0)),
        }
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Axis-aligned box with per-face normals
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        // (normal, u, v) with u x v == normal
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5;
        let mut mesh = Mesh::default();

        for (normal, u, v) in FACES {
            let face_center = center + normal * half;
            let corners = [-u - v, u - v, u + v, -u + v].map(|c| face_center + c * half);
            mesh.push_quad(corners, normal);
        }
        mesh
    }

    /// Unit square in XZ, facing +Y
    pub fn plane() -> Self {
        let (u, v) = (Vec3::Z, Vec3::X);
        let mut mesh = Mesh::default();
        mesh.push_quad([-u - v, u - v, u + v, -u + v].map(|c| c * 0.5), Vec3::Y);
        mesh
    }

    /// Radius 0.5, height 1 along Y, with caps
    pub fn cylinder(segments: u16) -> Self {
        let segments = segments.max(3);
        let ring: Vec<Vec3> = (0..=segments)
            .map(|i| {
                let a = i as f32 / segments as f32 * std::f32::consts::TAU;
                // Negative z keeps the side winding outward
                Vec3::new(a.cos(), 0.0, -a.sin())
            })
            .collect();

        let mut mesh = Mesh::default();

        for pair in ring.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let bottom = Vec3::new(0.0, -0.5, 0.0);
            let top = Vec3::new(0.0, 0.5, 0.0);
            let base = mesh.vertices.len() as u16;
            for (p, n) in [(a * 0.5 + bottom, a), (b * 0.5 + bottom, b), (b * 0.5 + top, b), (a * 0.5 + top, a)] {
                mesh.vertices.push(Vertex::new(p.to_array(), n.to_array()));
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        for (y, normal) in [(0.5, Vec3::Y), (-0.5, Vec3::NEG_Y)] {
            let center = mesh.vertices.len() as u16;
            mesh.vertices.push(Vertex::new([0.0, y, 0.0], normal.to_array()));
            for p in &ring {
                let p = *p * 0.5 + Vec3::new(0.0, y, 0.0);
                mesh.vertices.push(Vertex::new(p.to_array(), normal.to_array()));
            }
            for i in 0..segments {
                let (a, b) = (center + 1 + i, center + 2 + i);
                if y > 0.0 {
                    mesh.indices.extend_from_slice(&[center, a, b]);
                } else {
                    mesh.indices.extend_from_slice(&[center, b, a]);
                }
            }
        }
        mesh
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.vertices.len() as u16;
        for corner in corners {
            self.vertices.push(Vertex::new(corner.to_array(), normal.to_array()));
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_normal(mesh: &Mesh, tri: &[u16]) -> Vec3 {
        let p = |i: u16| Vec3::from(mesh.vertices[i as usize].position);
        (p(tri[1]) - p(tri[0])).cross(p(tri[2]) - p(tri[0]))
    }

    fn assert_outward_winding(mesh: &Mesh) {
        for tri in mesh.indices.chunks(3) {
            let face = triangle_normal(mesh, tri);
            let stored = Vec3::from(mesh.vertices[tri[0] as usize].normal);
            assert!(face.dot(stored) > 0.0, "triangle {tri:?} winds inward");
        }
    }

    #[test]
    fn cube_is_unit_and_outward() {
        let mesh = Mesh::for_primitive(Primitive::Cuboid);
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.position.iter().all(|c| c.abs() <= 0.5 + 1e-6)));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn line_spans_zero_to_one() {
        let mesh = Mesh::for_primitive(Primitive::Line);
        let (lo, hi) = mesh.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[2]), hi.max(v.position[2]))
        });
        assert_eq!((lo, hi), (0.0, 1.0));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn plane_faces_up() {
        let mesh = Mesh::plane();
        assert_eq!(mesh.index_count(), 6);
        assert!(mesh.vertices.iter().all(|v| v.position[1] == 0.0));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn cylinder_has_unit_normals_and_caps() {
        let mesh = Mesh::cylinder(8);
        assert_eq!(mesh.index_count(), 8 * 6 + 2 * 8 * 3);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
        }
        assert_outward_winding(&mesh);
    }
}
