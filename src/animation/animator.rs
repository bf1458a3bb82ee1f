use glam::Quat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::curves::{blink_level, pulse_opacity, pulse_progress, sway_angle, LightClass, Path, Phase};
use crate::frame::{FrameCallback, FrameInfo};
use crate::scene::{AnimatedProps, NodeId, SceneGraph};

/// Blink offsets are spread over this many seconds of local time
pub const BLINK_OFFSET_SPAN: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Two-level link light
    Blink { class: LightClass },
    /// Marker travelling along a path, fading out near the end
    Pulse { path: Path },
    /// Whole-group idle rotation about +Y
    Sway { frequency: f32, amplitude: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedInstance {
    pub target: NodeId,
    pub phase: Phase,
    pub animation: Animation,
}

impl AnimatedInstance {
    pub fn blink(target: NodeId, phase: Phase, class: LightClass) -> Self {
        Self {
            target,
            phase,
            animation: Animation::Blink { class },
        }
    }

    pub fn pulse(target: NodeId, phase: Phase, path: Path) -> Self {
        Self {
            target,
            phase,
            animation: Animation::Pulse { path },
        }
    }

    pub fn sway(target: NodeId, frequency: f32, amplitude: f32) -> Self {
        Self {
            target,
            phase: Phase::STILL,
            animation: Animation::Sway { frequency, amplitude },
        }
    }

    /// Write this frame's value into `props`
    pub fn apply(&self, t: f32, props: &mut AnimatedProps) {
        match self.animation {
            Animation::Blink { class } => {
                let level = blink_level(t, self.phase, class);
                props.opacity = level.opacity;
                props.intensity = level.intensity;
                props.scale = level.scale;
            }
            Animation::Pulse { path } => {
                let progress = pulse_progress(t, self.phase);
                props.offset = path.point_at(progress);
                props.opacity = pulse_opacity(progress);
            }
            Animation::Sway { frequency, amplitude } => {
                let angle = sway_angle(self.phase.local_time(t), frequency, amplitude);
                props.rotation = Quat::from_rotation_y(angle);
            }
        }
    }
}

/// Per-frame animator: owns every animated instance of a scene
#[derive(Debug, Default, Clone)]
pub struct Animator {
    instances: Vec<AnimatedInstance>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instance: AnimatedInstance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[AnimatedInstance] {
        &self.instances
    }

    /// Update every instance for elapsed time `t`.
    /// Instances whose node is missing are skipped; returns how many were written.
    pub fn update(&self, t: f32, graph: &mut SceneGraph) -> usize {
        let mut applied = 0;
        for instance in &self.instances {
            if let Some(props) = graph.props_mut(instance.target) {
                instance.apply(t, props);
                applied += 1;
            }
        }
        applied
    }
}

impl FrameCallback for Animator {
    fn on_frame(&mut self, frame: &FrameInfo, scene: &mut SceneGraph) {
        self.update(frame.time, scene);
    }
}

/// Source of per-instance randomness: phase offsets and layout jitter.
/// Seeded so a given seed reproduces the same room.
#[derive(Debug, Clone)]
pub struct PhaseSource {
    rng: StdRng,
}

impl PhaseSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Offset in `[0, BLINK_OFFSET_SPAN)`
    pub fn blink(&mut self, speed: f32) -> Phase {
        Phase::new(self.rng.gen_range(0.0..BLINK_OFFSET_SPAN), speed)
    }

    /// Offset in `[0, 1)`, i.e. anywhere in the pulse cycle
    pub fn pulse(&mut self, speed: f32) -> Phase {
        Phase::new(self.rng.gen_range(0.0..1.0), speed)
    }

    /// Uniform value in `[-span, span]`
    pub fn jitter(&mut self, span: f32) -> f32 {
        if span <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-span..=span)
    }

    /// Pick `true` with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transform;
    use glam::Vec3;

    #[test]
    fn blink_writes_discrete_level() {
        let mut props = AnimatedProps::default();
        let instance = AnimatedInstance::blink(any_node(), Phase::STILL, LightClass::Status);
        instance.apply(0.3, &mut props);
        let levels = LightClass::Status.levels();
        assert!(props.intensity == levels.on.intensity || props.intensity == levels.off.intensity);
    }

    #[test]
    fn pulse_writes_offset_on_path() {
        let path = Path::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -8.0));
        let mut props = AnimatedProps::default();
        AnimatedInstance::pulse(any_node(), Phase::new(0.25, 1.0), path).apply(0.0, &mut props);
        assert!((props.offset - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        assert_eq!(props.opacity, 1.0);
    }

    #[test]
    fn update_skips_missing_nodes() {
        let mut graph = SceneGraph::new();
        let present = graph.add_group("present", None, Transform::IDENTITY);

        let mut other = SceneGraph::new();
        other.add_group("x", None, Transform::IDENTITY);
        let absent = other.add_group("y", None, Transform::IDENTITY);

        let mut animator = Animator::new();
        animator.push(AnimatedInstance::sway(present, 0.5, 0.1));
        animator.push(AnimatedInstance::sway(absent, 0.5, 0.1));

        assert_eq!(animator.update(1.0, &mut graph), 1);
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut a = PhaseSource::seeded(7);
        let mut b = PhaseSource::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.blink(1.0), b.blink(1.0));
            assert_eq!(a.jitter(0.2), b.jitter(0.2));
        }
    }

    #[test]
    fn offsets_stay_in_range() {
        let mut source = PhaseSource::seeded(99);
        for _ in 0..256 {
            let blink = source.blink(1.0);
            assert!((0.0..BLINK_OFFSET_SPAN).contains(&blink.offset));
            let pulse = source.pulse(0.3);
            assert!((0.0..1.0).contains(&pulse.offset));
            assert!(source.jitter(0.5).abs() <= 0.5);
        }
        assert_eq!(source.jitter(0.0), 0.0);
    }

    fn any_node() -> NodeId {
        let mut graph = SceneGraph::new();
        graph.add_group("n", None, Transform::IDENTITY)
    }
}
