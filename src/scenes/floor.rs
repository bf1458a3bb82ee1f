use glam::{Vec2, Vec3};

use super::RoomContext;
use crate::animation::{AnimatedInstance, Path};
use crate::scene::{PaletteSlot, Primitive, Transform};

/// Raised-floor tile pitch
pub const FLOOR_TILE: f32 = 0.6;

const GRID_LIFT: f32 = 0.002;
const GRID_THICKNESS: f32 = 0.012;
const PULSE_LIFT: f32 = 0.01;
const LANE_PITCH: f32 = 0.35;
const PULSE_SIZE: Vec3 = Vec3::new(0.28, 0.012, 0.06);
const PULSE_GLOW: f32 = 2.2;

/// Floor plane plus tile grid lines
pub(super) fn compose(ctx: &mut RoomContext) {
    let (width, depth) = ctx.geometry.floor_size;

    ctx.builder.begin_group("floor", Vec3::ZERO);
    ctx.builder.plane("floor/plane", Vec3::ZERO, Vec2::new(width, depth), PaletteSlot::Floor);

    let half_w = width * 0.5;
    let half_d = depth * 0.5;

    let along_x = (depth / FLOOR_TILE).floor() as usize + 1;
    for i in 0..along_x {
        let z = -half_d + i as f32 * FLOOR_TILE;
        ctx.builder.line(
            format!("floor/grid/x{i}"),
            Vec3::new(-half_w, GRID_LIFT, z),
            Vec3::new(half_w, GRID_LIFT, z),
            GRID_THICKNESS,
            PaletteSlot::FloorGrid,
        );
    }

    let along_z = (width / FLOOR_TILE).floor() as usize + 1;
    for i in 0..along_z {
        let x = -half_w + i as f32 * FLOOR_TILE;
        ctx.builder.line(
            format!("floor/grid/z{i}"),
            Vec3::new(x, GRID_LIFT, -half_d),
            Vec3::new(x, GRID_LIFT, half_d),
            GRID_THICKNESS,
            PaletteSlot::FloorGrid,
        );
    }

    ctx.stats.grid_lines += along_x + along_z;
    ctx.builder.end_group();
}

/// Light pulses running along every aisle. Odd lanes run the other way.
pub(super) fn compose_pulses(ctx: &mut RoomContext) {
    let lanes = ctx.layout.pulse_lanes;
    let per_lane = ctx.layout.pulses_per_lane;
    let half_len = ctx.geometry.row_length * 0.5;
    let speed = ctx.animation.pulse_speed;
    let aisles = ctx.geometry.aisles_z.clone();

    ctx.builder.begin_group("pulses", Vec3::ZERO);
    for (a, aisle_z) in aisles.into_iter().enumerate() {
        for lane in 0..lanes {
            let z = aisle_z + (lane as f32 - (lanes as f32 - 1.0) * 0.5) * LANE_PITCH;
            let (from, to) = if lane % 2 == 0 {
                (-half_len, half_len)
            } else {
                (half_len, -half_len)
            };
            let path = Path::new(Vec3::new(from, PULSE_LIFT, z), Vec3::new(to, PULSE_LIFT, z));

            for p in 0..per_lane {
                let material = ctx.builder.glowing(PaletteSlot::Pulse, PULSE_GLOW);
                let marker = ctx.builder.mesh(
                    format!("pulses/{a}/{lane}/{p}"),
                    Primitive::Cuboid,
                    // Position comes entirely from the animated offset
                    Transform::placed(Vec3::ZERO, PULSE_SIZE),
                    material,
                );
                let phase = ctx.source.pulse(speed);
                ctx.animate(AnimatedInstance::pulse(marker, phase, path));
                ctx.stats.pulses += 1;
            }
        }
    }
    ctx.builder.end_group();
}
