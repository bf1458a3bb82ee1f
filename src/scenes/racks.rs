use glam::Vec3;

use super::{RoomContext, RACK_DEPTH, RACK_HEIGHT, RACK_WIDTH};
use crate::animation::{AnimatedInstance, LightClass};
use crate::scene::{PaletteSlot, Primitive, Transform};

const TRIM_HEIGHT: f32 = 0.05;
const BLADE_FILL: f32 = 0.7;
const LIGHT_SIZE: Vec3 = Vec3::new(0.022, 0.022, 0.012);
const LIGHT_GLOW: f32 = 1.0;
const ACTIVITY_CHANCE: f64 = 0.7;
const ALERT_CHANCE: f64 = 0.04;

/// Rack rows: body, trims, evenly spaced blades, one or two lights per blade
pub(super) fn compose(ctx: &mut RoomContext) {
    let layout = ctx.layout;
    for row in 0..ctx.geometry.rows_z.len() {
        let z = ctx.geometry.rows_z[row];
        let facing = ctx.geometry.facing(row);

        for i in 0..layout.racks_per_row {
            let x = ctx.geometry.rack_x(layout, i);
            compose_rack(ctx, row, i, Vec3::new(x, 0.0, z), facing);
        }
    }
}

/// Y of blade `i`, with the stack centred vertically in the rack
pub fn blade_y(blades: usize, spacing: f32, i: usize) -> f32 {
    let stack = (blades.max(1) as f32 - 1.0) * spacing;
    (RACK_HEIGHT - stack) * 0.5 + i as f32 * spacing
}

fn compose_rack(ctx: &mut RoomContext, row: usize, index: usize, origin: Vec3, facing: f32) {
    let name = format!("rack/{row}/{index}");
    ctx.builder.begin_group(name.clone(), origin);

    ctx.builder.cuboid(
        format!("{name}/body"),
        Vec3::new(0.0, RACK_HEIGHT * 0.5, 0.0),
        Vec3::new(RACK_WIDTH, RACK_HEIGHT, RACK_DEPTH),
        PaletteSlot::RackBody,
    );
    for (label, y) in [("top", RACK_HEIGHT + TRIM_HEIGHT * 0.5), ("base", TRIM_HEIGHT * 0.5)] {
        ctx.builder.cuboid(
            format!("{name}/{label}"),
            Vec3::new(0.0, y, 0.0),
            Vec3::new(RACK_WIDTH + 0.02, TRIM_HEIGHT, RACK_DEPTH + 0.02),
            PaletteSlot::RackTrim,
        );
    }

    let face_z = facing * (RACK_DEPTH * 0.5 + 0.006);
    let light_z = facing * (RACK_DEPTH * 0.5 + 0.02);
    let blades = ctx.layout.blades_per_rack;
    let spacing = ctx.layout.blade_spacing;

    for b in 0..blades {
        let y = blade_y(blades, spacing, b);
        ctx.builder.cuboid(
            format!("{name}/blade/{b}"),
            Vec3::new(0.0, y, face_z),
            Vec3::new(RACK_WIDTH * 0.9, spacing * BLADE_FILL, 0.012),
            PaletteSlot::Blade,
        );
        ctx.stats.blades += 1;

        let status_class = if ctx.source.chance(ALERT_CHANCE) {
            LightClass::Alert
        } else {
            LightClass::Status
        };
        add_light(ctx, &name, b, "status", Vec3::new(-RACK_WIDTH * 0.36, y, light_z), status_class);

        if ctx.source.chance(ACTIVITY_CHANCE) {
            add_light(ctx, &name, b, "activity", Vec3::new(-RACK_WIDTH * 0.28, y, light_z), LightClass::Activity);
        }
    }

    ctx.stats.racks += 1;
    ctx.builder.end_group();
}

fn add_light(ctx: &mut RoomContext, rack: &str, blade: usize, kind: &str, center: Vec3, class: LightClass) {
    let slot = match class {
        LightClass::Alert => PaletteSlot::AlertLight,
        LightClass::Activity => PaletteSlot::ActivityLight,
        _ => PaletteSlot::StatusLight,
    };
    let material = ctx.builder.glowing(slot, LIGHT_GLOW);
    let light = ctx.builder.mesh(
        format!("{rack}/blade/{blade}/{kind}"),
        Primitive::Cuboid,
        Transform::placed(center, LIGHT_SIZE),
        material,
    );
    let speed = ctx.blink_speed();
    let phase = ctx.source.blink(speed);
    ctx.animate(AnimatedInstance::blink(light, phase, class));
    ctx.stats.lights += 1;
}
