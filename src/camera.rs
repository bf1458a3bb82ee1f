use glam::{Mat4, Vec3};

use crate::scenes::{RoomGeometry, RACK_HEIGHT};
use crate::types::CameraUniform;
use crate::ui::Section;

pub const FOV_Y: f32 = 50.0 * std::f32::consts::PI / 180.0;
pub const Z_NEAR: f32 = 0.05;
pub const Z_FAR: f32 = 200.0;

/// Where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn lerp(self, other: CameraPose, t: f32) -> CameraPose {
        CameraPose {
            eye: self.eye.lerp(other.eye, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

pub struct Camera {
    pub pose: CameraPose,
    pub aspect: f32,
}

impl Camera {
    pub fn new(pose: CameraPose, aspect: f32) -> Self {
        Self { pose, aspect }
    }

    pub fn forward(&self) -> Vec3 {
        (self.pose.target - self.pose.eye).normalize_or_zero()
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.pose.eye, self.pose.target, Vec3::Y);
        let proj = Mat4::perspective_rh(FOV_Y, self.aspect.max(0.01), Z_NEAR, Z_FAR);
        proj * view
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn to_uniform(&self, time: f32) -> CameraUniform {
        CameraUniform::new(self.view_proj(), self.pose.eye, time)
    }
}

/// Eases the camera toward the pose of the active section
pub struct CameraRig {
    poses: [CameraPose; 4],
    active: Section,
    current: CameraPose,
    ease_rate: f32,
}

impl CameraRig {
    pub fn new(geometry: &RoomGeometry, section: Section, ease_rate: f32) -> Self {
        let poses = section_poses(geometry);
        let current = poses[section_index(section)];
        Self {
            poses,
            active: section,
            current,
            ease_rate,
        }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn pose_for(&self, section: Section) -> CameraPose {
        self.poses[section_index(section)]
    }

    pub fn current(&self) -> CameraPose {
        self.current
    }

    /// Retarget without jumping; the next updates ease toward the new pose
    pub fn focus(&mut self, section: Section) {
        self.active = section;
    }

    /// Frame-rate independent exponential approach
    pub fn update(&mut self, delta: f32) -> CameraPose {
        let target = self.pose_for(self.active);
        let t = 1.0 - (-self.ease_rate * delta.max(0.0)).exp();
        self.current = self.current.lerp(target, t);
        self.current
    }
}

fn section_index(section: Section) -> usize {
    match section {
        Section::Home => 0,
        Section::Projects => 1,
        Section::Tools => 2,
        Section::Contact => 3,
    }
}

/// Fixed framing per section, derived from the room layout
fn section_poses(geometry: &RoomGeometry) -> [CameraPose; 4] {
    let aisle = geometry.aisles_z.first().copied().unwrap_or(0.0);
    let half_len = geometry.row_length * 0.5;
    let mid_height = RACK_HEIGHT * 0.5;
    let cart = geometry.cart_origin;

    [
        // Home: wide three-quarter view down the aisle
        CameraPose {
            eye: Vec3::new(half_len + 3.0, 2.6, aisle + 4.5),
            target: Vec3::new(-0.5, mid_height * 0.8, aisle),
        },
        // Projects: close on the first row
        CameraPose {
            eye: Vec3::new(-half_len * 0.3, 1.4, aisle + 0.9),
            target: Vec3::new(-half_len * 0.5, mid_height, geometry.rows_z[0]),
        },
        // Tools: the crash cart
        CameraPose {
            eye: cart + Vec3::new(0.8, 1.5, 1.6),
            target: cart + Vec3::new(0.0, 0.9, 0.0),
        },
        // Contact: high, looking along the aisle from the far end
        CameraPose {
            eye: Vec3::new(-half_len - 2.5, 3.4, aisle),
            target: Vec3::new(half_len, 0.6, aisle),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    fn rig(section: Section) -> CameraRig {
        CameraRig::new(&RoomGeometry::new(&LayoutConfig::default()), section, 2.5)
    }

    #[test]
    fn starts_at_section_pose() {
        let rig = rig(Section::Tools);
        assert_eq!(rig.current(), rig.pose_for(Section::Tools));
    }

    #[test]
    fn eases_toward_new_section() {
        let mut rig = rig(Section::Home);
        let target = rig.pose_for(Section::Contact);
        rig.focus(Section::Contact);

        let start = rig.current().eye.distance(target.eye);
        rig.update(0.1);
        let after = rig.current().eye.distance(target.eye);
        assert!(after < start);

        for _ in 0..600 {
            rig.update(1.0 / 60.0);
        }
        assert!(rig.current().eye.distance(target.eye) < 1e-2);
    }

    #[test]
    fn zero_delta_does_not_move() {
        let mut rig = rig(Section::Home);
        let before = rig.current();
        rig.focus(Section::Projects);
        assert_eq!(rig.update(0.0), before);
    }

    #[test]
    fn poses_are_distinct() {
        let rig = rig(Section::Home);
        for a in Section::ALL {
            for b in Section::ALL {
                if a != b {
                    assert_ne!(rig.pose_for(a), rig.pose_for(b));
                }
            }
        }
    }

    #[test]
    fn view_proj_is_finite() {
        let camera = Camera::new(rig(Section::Home).current(), 16.0 / 9.0);
        assert!(camera.view_proj().is_finite());
        assert!(camera.forward().is_normalized());
    }
}
