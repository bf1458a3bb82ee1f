pub mod animator;
pub mod curves;

pub use animator::{AnimatedInstance, Animation, Animator, PhaseSource, BLINK_OFFSET_SPAN};
pub use curves::{
    blink_level, blink_on, pulse_opacity, pulse_progress, sway_angle, BlinkLevels, LightClass, LightLevel, Path, Phase,
    PULSE_FADE_START,
};
