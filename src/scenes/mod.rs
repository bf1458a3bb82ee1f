//! Server room composition.
//!
//! Every count and spacing comes from `LayoutConfig`; the only randomness is
//! drawn from the `PhaseSource` while composing, so nothing is re-rolled later.

mod cables;
mod cart;
mod floor;
mod racks;

use glam::Vec3;

use crate::animation::{AnimatedInstance, Animator, PhaseSource};
use crate::config::{AnimationConfig, LayoutConfig};
use crate::scene::{NodeId, Palette, SceneBuilder, SceneGraph};

pub use cables::strand_points;
pub use cart::CART_PARTS;
pub use floor::FLOOR_TILE;
pub use racks::blade_y;

pub const RACK_WIDTH: f32 = 0.6;
pub const RACK_HEIGHT: f32 = 2.0;
pub const RACK_DEPTH: f32 = 1.0;
/// Height of the overhead cable run
pub const CABLE_HEIGHT: f32 = 2.45;

/// Object counts of a composed room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomStats {
    pub racks: usize,
    pub blades: usize,
    pub lights: usize,
    pub cable_strands: usize,
    pub cable_segments: usize,
    pub pulses: usize,
    pub grid_lines: usize,
    pub cart_parts: usize,
}

/// Derived placement shared by composition and the camera rig
#[derive(Debug, Clone, PartialEq)]
pub struct RoomGeometry {
    pub row_length: f32,
    /// Z of each rack row's centre line
    pub rows_z: Vec<f32>,
    /// Z of each aisle's centre line
    pub aisles_z: Vec<f32>,
    pub cart_origin: Vec3,
    pub floor_size: (f32, f32),
}

impl RoomGeometry {
    pub fn new(layout: &LayoutConfig) -> Self {
        let rows = layout.rack_rows.max(1);
        let row_pitch = RACK_DEPTH + layout.aisle_width;
        let rows_z: Vec<f32> = (0..rows)
            .map(|r| (r as f32 - (rows as f32 - 1.0) * 0.5) * row_pitch)
            .collect();

        let aisles_z = if rows == 1 {
            vec![rows_z[0] + row_pitch * 0.5]
        } else {
            rows_z.windows(2).map(|w| (w[0] + w[1]) * 0.5).collect()
        };

        let row_length = layout.racks_per_row as f32 * layout.rack_spacing + 1.0;
        let depth_span = rows_z.last().copied().unwrap_or(0.0) - rows_z[0] + row_pitch;
        let cart_origin = Vec3::new(row_length * 0.5 + 0.9, 0.0, aisles_z[0] + 0.25);

        Self {
            row_length,
            rows_z,
            aisles_z,
            cart_origin,
            floor_size: (row_length + 6.0, depth_span + 6.0),
        }
    }

    /// X of rack `i` in a row
    pub fn rack_x(&self, layout: &LayoutConfig, i: usize) -> f32 {
        (i as f32 - (layout.racks_per_row as f32 - 1.0) * 0.5) * layout.rack_spacing
    }

    /// +1 when a row faces +Z, -1 when it faces -Z. Rows face the nearest aisle.
    pub fn facing(&self, row: usize) -> f32 {
        let z = self.rows_z[row];
        let nearest = self
            .aisles_z
            .iter()
            .copied()
            .min_by(|a, b| (a - z).abs().total_cmp(&(b - z).abs()))
            .unwrap_or(z + 1.0);
        if nearest >= z {
            1.0
        } else {
            -1.0
        }
    }
}

/// A composed room: scene graph plus the animator that drives it
pub struct ServerRoom {
    pub graph: SceneGraph,
    pub animator: Animator,
    /// Group carrying the idle sway
    pub root: NodeId,
    pub stats: RoomStats,
    pub geometry: RoomGeometry,
}

/// The static half of a `ServerRoom` once its animator has been handed off
pub struct RoomScene {
    pub graph: SceneGraph,
    pub root: NodeId,
    pub stats: RoomStats,
    pub geometry: RoomGeometry,
}

impl ServerRoom {
    /// Splits off the animator so it can be registered as a frame callback
    pub fn into_parts(self) -> (RoomScene, Animator) {
        let scene = RoomScene {
            graph: self.graph,
            root: self.root,
            stats: self.stats,
            geometry: self.geometry,
        };
        (scene, self.animator)
    }
}

/// Shared state threaded through the sub-composers
pub(crate) struct RoomContext<'a, 'p> {
    pub builder: SceneBuilder<'p>,
    pub animator: Animator,
    pub source: &'a mut PhaseSource,
    pub layout: &'a LayoutConfig,
    pub animation: &'a AnimationConfig,
    pub geometry: RoomGeometry,
    pub stats: RoomStats,
}

impl RoomContext<'_, '_> {
    pub fn animate(&mut self, instance: AnimatedInstance) {
        self.animator.push(instance);
    }

    /// Blink speed drawn once from the configured range
    pub fn blink_speed(&mut self) -> f32 {
        let [lo, hi] = self.animation.blink_speed;
        let mid = (lo + hi) * 0.5;
        mid + self.source.jitter((hi - lo) * 0.5)
    }
}

pub fn compose_server_room(
    layout: &LayoutConfig,
    animation: &AnimationConfig,
    palette: &Palette,
    source: &mut PhaseSource,
) -> ServerRoom {
    let geometry = RoomGeometry::new(layout);
    let mut ctx = RoomContext {
        builder: SceneBuilder::new(palette),
        animator: Animator::new(),
        source,
        layout,
        animation,
        geometry,
        stats: RoomStats::default(),
    };

    let root = ctx.builder.begin_group("room", Vec3::ZERO);
    ctx.animate(AnimatedInstance::sway(
        root,
        animation.sway_frequency,
        animation.sway_amplitude,
    ));

    floor::compose(&mut ctx);
    racks::compose(&mut ctx);
    cables::compose(&mut ctx);
    cart::compose(&mut ctx);
    floor::compose_pulses(&mut ctx);

    ctx.builder.end_group();

    let graph = ctx.builder.build();
    log::info!(
        "Server room composed: {} nodes, {} animated ({} racks, {} blades, {} lights, {} pulses)",
        graph.len(),
        ctx.animator.len(),
        ctx.stats.racks,
        ctx.stats.blades,
        ctx.stats.lights,
        ctx.stats.pulses,
    );

    ServerRoom {
        graph,
        animator: ctx.animator,
        root,
        stats: ctx.stats,
        geometry: ctx.geometry,
    }
}
