//! Time curves behind every animated value in the room.
//!
//! All functions here are total and deterministic: the same elapsed time and
//! phase always produce the same value.

use glam::Vec3;

/// Pulse opacity stays full until this fraction of the cycle, then fades to zero
pub const PULSE_FADE_START: f32 = 0.8;

/// Per-instance time shift and rate. The offset is drawn once when the
/// instance is created and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase {
    pub offset: f32,
    pub speed: f32,
}

impl Phase {
    /// Zero offset, unit speed
    pub const STILL: Phase = Phase {
        offset: 0.0,
        speed: 1.0,
    };

    pub const fn new(offset: f32, speed: f32) -> Self {
        Self { offset, speed }
    }

    /// `t * speed + offset`
    pub fn local_time(&self, t: f32) -> f32 {
        t * self.speed + self.offset
    }
}

/// One discrete output level of a blinking light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightLevel {
    pub opacity: f32,
    pub intensity: f32,
    pub scale: f32,
}

/// The two levels a blinking light alternates between. Never eased.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkLevels {
    pub on: LightLevel,
    pub off: LightLevel,
}

impl BlinkLevels {
    pub const LINK: BlinkLevels = BlinkLevels {
        on: LightLevel {
            opacity: 1.0,
            intensity: 2.5,
            scale: 1.0,
        },
        off: LightLevel {
            opacity: 0.3,
            intensity: 0.2,
            scale: 0.8,
        },
    };

    pub const SCREEN: BlinkLevels = BlinkLevels {
        on: LightLevel {
            opacity: 1.0,
            intensity: 1.6,
            scale: 1.0,
        },
        off: LightLevel {
            opacity: 1.0,
            intensity: 1.1,
            scale: 1.0,
        },
    };

    pub const fn level(&self, on: bool) -> LightLevel {
        if on {
            self.on
        } else {
            self.off
        }
    }
}

/// Light families, each with a fixed blink rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightClass {
    /// Slow steady heartbeat
    Status,
    /// Fast flicker, like a busy link
    Activity,
    /// Slow warning blink
    Alert,
    /// Laptop screen refresh shimmer
    Screen,
}

impl LightClass {
    pub const fn rate(self) -> f32 {
        match self {
            LightClass::Status => 1.5,
            LightClass::Activity => 9.0,
            LightClass::Alert => 0.8,
            LightClass::Screen => 0.35,
        }
    }

    pub const fn levels(self) -> BlinkLevels {
        match self {
            LightClass::Screen => BlinkLevels::SCREEN,
            _ => BlinkLevels::LINK,
        }
    }
}

/// `sin((t * s + o) * rate) > 0`
pub fn blink_on(t: f32, phase: Phase, rate: f32) -> bool {
    (phase.local_time(t) * rate).sin() > 0.0
}

pub fn blink_level(t: f32, phase: Phase, class: LightClass) -> LightLevel {
    class.levels().level(blink_on(t, phase, class.rate()))
}

/// `(t * s + o) mod 1`, always in `[0, 1)`
pub fn pulse_progress(t: f32, phase: Phase) -> f32 {
    let progress = phase.local_time(t).rem_euclid(1.0);
    // rem_euclid can round tiny negative inputs up to exactly 1.0
    if progress >= 1.0 {
        0.0
    } else {
        progress
    }
}

/// Full opacity, then a linear fade over the last fifth of the cycle
pub fn pulse_opacity(progress: f32) -> f32 {
    if progress <= PULSE_FADE_START {
        1.0
    } else {
        ((1.0 - progress) / (1.0 - PULSE_FADE_START)).clamp(0.0, 1.0)
    }
}

/// Straight track a pulse marker travels along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    pub start: Vec3,
    pub end: Vec3,
}

impl Path {
    pub const fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn point_at(&self, progress: f32) -> Vec3 {
        self.start.lerp(self.end, progress)
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// `sin(t * k) * amplitude`
pub fn sway_angle(t: f32, frequency: f32, amplitude: f32) -> f32 {
    (t * frequency).sin() * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink_switches_at_half_period() {
        let phase = Phase::STILL;
        let rate = std::f32::consts::PI;
        assert!(blink_on(0.5, phase, rate));
        assert!(!blink_on(1.5, phase, rate));
    }

    #[test]
    fn offset_shifts_blink() {
        let rate = std::f32::consts::PI;
        assert_ne!(
            blink_on(0.5, Phase::new(0.0, 1.0), rate),
            blink_on(0.5, Phase::new(1.0, 1.0), rate)
        );
    }

    #[test]
    fn pulse_progress_handles_negative_time() {
        let p = pulse_progress(-0.25, Phase::STILL);
        assert!((p - 0.75).abs() < 1e-6);
        let tiny = pulse_progress(-1e-9, Phase::STILL);
        assert!((0.0..1.0).contains(&tiny));
    }

    #[test]
    fn pulse_opacity_edges() {
        assert_eq!(pulse_opacity(0.0), 1.0);
        assert_eq!(pulse_opacity(PULSE_FADE_START), 1.0);
        assert!((pulse_opacity(0.9) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn path_endpoints() {
        let path = Path::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(path.point_at(0.0), Vec3::ZERO);
        assert_eq!(path.point_at(0.5), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(path.length(), 10.0);
    }

    #[test]
    fn sway_is_bounded() {
        for i in 0..200 {
            let angle = sway_angle(i as f32 * 0.37, 0.4, 0.05);
            assert!(angle.abs() <= 0.05 + 1e-6);
        }
    }
}
