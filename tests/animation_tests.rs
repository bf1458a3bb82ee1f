use glam::Vec3;
use server_room::animation::{
    blink_level, pulse_opacity, pulse_progress, sway_angle, AnimatedInstance, Animation, LightClass, Path, Phase,
    PhaseSource, BLINK_OFFSET_SPAN,
};
use server_room::config::{AnimationConfig, LayoutConfig};
use server_room::scene::palette::DARK;
use server_room::scene::AnimatedProps;
use server_room::scenes::compose_server_room;

fn sample_times() -> impl Iterator<Item = f32> {
    (0..4000).map(|i| i as f32 * 0.0173)
}

#[cfg(test)]
mod blink_tests {
    use super::*;

    #[test]
    fn test_blink_only_takes_two_levels() {
        for class in [LightClass::Status, LightClass::Activity, LightClass::Alert, LightClass::Screen] {
            let levels = class.levels();
            let phase = Phase::new(3.7, 1.2);
            for t in sample_times() {
                let level = blink_level(t, phase, class);
                assert!(level == levels.on || level == levels.off, "{class:?} at t={t}");
            }
        }
    }

    #[test]
    fn test_blink_visits_both_levels() {
        let levels = LightClass::Status.levels();
        let seen: Vec<_> = sample_times().map(|t| blink_level(t, Phase::STILL, LightClass::Status)).collect();
        assert!(seen.contains(&levels.on));
        assert!(seen.contains(&levels.off));
    }

    #[test]
    fn test_offsets_desynchronise_lights() {
        let a = Phase::new(0.0, 1.0);
        let b = Phase::new(1.3, 1.0);
        let differs = sample_times().any(|t| {
            blink_level(t, a, LightClass::Status) != blink_level(t, b, LightClass::Status)
        });
        assert!(differs);
    }

    #[test]
    fn test_blink_is_deterministic() {
        let phase = Phase::new(2.2, 0.9);
        for t in sample_times().take(200) {
            assert_eq!(
                blink_level(t, phase, LightClass::Activity),
                blink_level(t, phase, LightClass::Activity)
            );
        }
    }
}

#[cfg(test)]
mod pulse_tests {
    use super::*;

    #[test]
    fn test_progress_stays_in_unit_interval() {
        for phase in [Phase::new(0.0, 0.22), Phase::new(0.99, 3.0), Phase::new(0.5, -1.0)] {
            for t in sample_times() {
                let p = pulse_progress(t, phase);
                assert!((0.0..1.0).contains(&p), "progress {p} at t={t}");
            }
        }
    }

    #[test]
    fn test_progress_repeats_every_period() {
        let phase = Phase::new(0.3, 0.25);
        let period = 1.0 / phase.speed;
        for t in [0.4, 1.0, 2.2] {
            let a = pulse_progress(t, phase);
            let b = pulse_progress(t + period, phase);
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_opacity_is_full_then_fades() {
        assert_eq!(pulse_opacity(0.0), 1.0);
        assert_eq!(pulse_opacity(0.5), 1.0);
        assert_eq!(pulse_opacity(0.8), 1.0);
        assert!((pulse_opacity(0.9) - 0.5).abs() < 1e-5);
        assert!(pulse_opacity(0.999) < 0.01);
    }

    #[test]
    fn test_opacity_never_increases_in_fade() {
        let mut last = 1.0;
        for i in 0..100 {
            let p = 0.8 + i as f32 * 0.00199;
            let o = pulse_opacity(p);
            assert!(o <= last + 1e-6);
            last = o;
        }
    }

    #[test]
    fn test_marker_follows_path() {
        let path = Path::new(Vec3::new(-2.0, 0.0, 1.0), Vec3::new(2.0, 0.0, 1.0));
        let instance = AnimatedInstance {
            target: server_room::scene::SceneGraph::new().add_group("g", None, Default::default()),
            phase: Phase::new(0.75, 1.0),
            animation: Animation::Pulse { path },
        };
        let mut props = AnimatedProps::default();
        instance.apply(0.0, &mut props);
        assert!((props.offset - Vec3::new(1.0, 0.0, 1.0)).length() < 1e-5);
        assert_eq!(props.opacity, 1.0);
    }
}

#[cfg(test)]
mod sway_tests {
    use super::*;

    #[test]
    fn test_sway_is_bounded_by_amplitude() {
        for t in sample_times() {
            assert!(sway_angle(t, 0.25, 0.035).abs() <= 0.035 + 1e-7);
        }
    }

    #[test]
    fn test_sway_starts_at_rest() {
        assert_eq!(sway_angle(0.0, 0.25, 0.035), 0.0);
    }
}

#[cfg(test)]
mod phase_source_tests {
    use super::*;

    #[test]
    fn test_offsets_fall_in_their_ranges() {
        let mut source = PhaseSource::seeded(11);
        for _ in 0..500 {
            let blink = source.blink(1.0);
            assert!((0.0..BLINK_OFFSET_SPAN).contains(&blink.offset));
            let pulse = source.pulse(0.2);
            assert!((0.0..1.0).contains(&pulse.offset));
            assert_eq!(pulse.speed, 0.2);
        }
    }

    #[test]
    fn test_composed_room_animates_every_light_discretely() {
        let mut source = PhaseSource::seeded(5);
        let mut room = compose_server_room(
            &LayoutConfig::default(),
            &AnimationConfig::default(),
            &DARK,
            &mut source,
        );

        for t in [0.0, 0.37, 4.2, 19.9] {
            let applied = room.animator.update(t, &mut room.graph);
            assert_eq!(applied, room.animator.len());

            for instance in room.animator.instances() {
                if let Animation::Blink { class } = instance.animation {
                    let props = room.graph.props(instance.target).copied().unwrap_or_default();
                    let levels = class.levels();
                    assert!(props.intensity == levels.on.intensity || props.intensity == levels.off.intensity);
                }
            }
        }
    }
}
