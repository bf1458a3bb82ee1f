use glam::Vec3;

use super::{RoomContext, CABLE_HEIGHT};
use crate::scene::PaletteSlot;

const STRAND_PITCH: f32 = 0.07;
const STRAND_THICKNESS: f32 = 0.025;

/// Parallel sagging cable strands over every aisle
pub(super) fn compose(ctx: &mut RoomContext) {
    let strands = ctx.layout.cable_strands;
    let segments = ctx.layout.cable_segments.max(1);
    let sag = ctx.layout.cable_sag;
    let jitter = ctx.layout.cable_jitter;
    let half_len = ctx.geometry.row_length * 0.5;
    let aisles = ctx.geometry.aisles_z.clone();

    ctx.builder.begin_group("cables", Vec3::ZERO);
    for (a, aisle_z) in aisles.into_iter().enumerate() {
        for s in 0..strands {
            let lane = (s as f32 - (strands as f32 - 1.0) * 0.5) * STRAND_PITCH;
            // Drawn once per strand; the whole strand shifts together
            let z = aisle_z + lane + ctx.source.jitter(jitter);
            let lift = ctx.source.jitter(jitter * 0.5);
            let points = strand_points(half_len, CABLE_HEIGHT + lift, z, sag, segments);
            let ids = ctx
                .builder
                .polyline(&format!("cables/{a}/{s}"), &points, STRAND_THICKNESS, PaletteSlot::Cable);
            ctx.stats.cable_segments += ids.len();
            ctx.stats.cable_strands += 1;
        }
    }
    ctx.builder.end_group();
}

/// Parabolic droop from `-half_len` to `half_len`, lowest at the middle
pub fn strand_points(half_len: f32, height: f32, z: f32, sag: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let u = i as f32 / segments as f32;
            let centred = 2.0 * u - 1.0;
            let x = -half_len + u * 2.0 * half_len;
            let y = height - sag * (1.0 - centred * centred);
            Vec3::new(x, y, z)
        })
        .collect()
}
