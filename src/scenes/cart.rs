use glam::{Quat, Vec3};

use super::RoomContext;
use crate::animation::{AnimatedInstance, LightClass};
use crate::scene::{PaletteSlot, Primitive, Transform};

/// Top, shelf, four legs, four wheels, laptop base, laptop screen
pub const CART_PARTS: usize = 12;

const TOP: Vec3 = Vec3::new(0.9, 0.04, 0.55);
const TOP_Y: f32 = 0.95;
const SHELF_Y: f32 = 0.35;
const LEG_RADIUS: f32 = 0.02;
const WHEEL_RADIUS: f32 = 0.05;
const SCREEN: Vec3 = Vec3::new(0.34, 0.22, 0.012);
const SCREEN_GLOW: f32 = 0.9;

/// Crash cart with a laptop parked at the end of the first aisle
pub(super) fn compose(ctx: &mut RoomContext) {
    let origin = ctx.geometry.cart_origin;
    // Angled a little toward the aisle
    let local = Transform::from_translation(origin).with_rotation(Quat::from_rotation_y(-0.35));
    ctx.builder.begin_group_with("cart", local);

    let before = ctx.builder.graph().len();

    ctx.builder.cuboid("cart/top", Vec3::new(0.0, TOP_Y, 0.0), TOP, PaletteSlot::CartFrame);
    ctx.builder.cuboid(
        "cart/shelf",
        Vec3::new(0.0, SHELF_Y, 0.0),
        Vec3::new(TOP.x * 0.95, TOP.y, TOP.z * 0.95),
        PaletteSlot::CartFrame,
    );

    let leg_height = TOP_Y - WHEEL_RADIUS * 2.0;
    let leg_y = WHEEL_RADIUS * 2.0 + leg_height * 0.5;
    for (i, (sx, sz)) in corners().into_iter().enumerate() {
        let x = sx * (TOP.x * 0.5 - 0.04);
        let z = sz * (TOP.z * 0.5 - 0.04);
        ctx.builder.cylinder(
            format!("cart/leg/{i}"),
            Vec3::new(x, leg_y, z),
            LEG_RADIUS,
            leg_height,
            PaletteSlot::CartFrame,
        );
        ctx.builder.axle(
            format!("cart/wheel/{i}"),
            Vec3::new(x, WHEEL_RADIUS, z),
            WHEEL_RADIUS,
            0.03,
            PaletteSlot::CartWheel,
        );
    }

    ctx.builder.cuboid(
        "cart/laptop/base",
        Vec3::new(0.0, TOP_Y + 0.03, 0.05),
        Vec3::new(SCREEN.x, 0.015, 0.24),
        PaletteSlot::Laptop,
    );
    let material = ctx.builder.glowing(PaletteSlot::Screen, SCREEN_GLOW);
    let screen = ctx.builder.mesh(
        "cart/laptop/screen",
        Primitive::Cuboid,
        Transform::placed(Vec3::new(0.0, TOP_Y + 0.15, -0.08), SCREEN).with_rotation(Quat::from_rotation_x(-0.25)),
        material,
    );
    let phase = ctx.source.blink(1.0);
    ctx.animate(AnimatedInstance::blink(screen, phase, LightClass::Screen));

    ctx.stats.cart_parts += ctx.builder.graph().len() - before;
    ctx.builder.end_group();
}

fn corners() -> [(f32, f32); 4] {
    [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
}
