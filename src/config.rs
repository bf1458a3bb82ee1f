//! Application configuration
//!
//! Defaults are built in. An optional JSON file overrides any subset of
//! fields, and command-line flags override the file (see `cli.rs`).

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::ui::{Section, Theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub animation: AnimationConfig,
    /// Fixed seed for phase offsets and jitter; random per session when absent
    pub seed: Option<u64>,
    pub theme: Theme,
    pub section: Section,
    /// Hide the overlay and show only the 3D layer
    pub no_ui: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            layout: LayoutConfig::default(),
            animation: AnimationConfig::default(),
            seed: None,
            theme: Theme::Dark,
            section: Section::Home,
            no_ui: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Logical width below which the overlay switches to the hamburger menu
    pub mobile_breakpoint: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Server Room".to_string(),
            width: 1280,
            height: 800,
            mobile_breakpoint: 768.0,
        }
    }
}

/// Object counts and spacing for the composed room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub rack_rows: usize,
    pub racks_per_row: usize,
    /// Centre-to-centre distance between racks in a row
    pub rack_spacing: f32,
    /// Width of the aisle between rows
    pub aisle_width: f32,
    pub blades_per_rack: usize,
    /// Vertical pitch between blades
    pub blade_spacing: f32,
    pub cable_strands: usize,
    pub cable_segments: usize,
    /// Max lateral offset of a strand from its nominal lane
    pub cable_jitter: f32,
    pub cable_sag: f32,
    pub pulse_lanes: usize,
    pub pulses_per_lane: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rack_rows: 2,
            racks_per_row: 5,
            rack_spacing: 0.9,
            aisle_width: 2.4,
            blades_per_rack: 10,
            blade_spacing: 0.17,
            cable_strands: 6,
            cable_segments: 10,
            cable_jitter: 0.08,
            cable_sag: 0.35,
            pulse_lanes: 3,
            pulses_per_lane: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Speed multiplier range for blinking lights
    pub blink_speed: [f32; 2],
    /// Pulse cycles per second
    pub pulse_speed: f32,
    pub sway_frequency: f32,
    /// Max sway angle in radians
    pub sway_amplitude: f32,
    /// Camera easing rate toward the active section's pose
    pub camera_ease: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            blink_speed: [0.6, 1.4],
            pulse_speed: 0.22,
            sway_frequency: 0.25,
            sway_amplitude: 0.035,
            camera_ease: 2.5,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file, or defaults when `path` is `None`
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let layout = &self.layout;
        let anim = &self.animation;
        let floats = [
            ("layout.rack_spacing", layout.rack_spacing),
            ("layout.aisle_width", layout.aisle_width),
            ("layout.blade_spacing", layout.blade_spacing),
            ("layout.cable_jitter", layout.cable_jitter),
            ("layout.cable_sag", layout.cable_sag),
            ("animation.blink_speed[0]", anim.blink_speed[0]),
            ("animation.blink_speed[1]", anim.blink_speed[1]),
            ("animation.pulse_speed", anim.pulse_speed),
            ("animation.sway_frequency", anim.sway_frequency),
            ("animation.sway_amplitude", anim.sway_amplitude),
            ("animation.camera_ease", anim.camera_ease),
            ("window.mobile_breakpoint", self.window.mobile_breakpoint),
        ];
        for (name, value) in floats {
            ensure!(value.is_finite(), "{name} must be a finite number, got {value}");
        }

        ensure!(layout.rack_rows > 0 && layout.racks_per_row > 0, "layout needs at least one rack");
        ensure!(layout.blade_spacing > 0.0, "blade_spacing must be positive");
        ensure!(layout.cable_segments > 0, "cable_segments must be at least 1");
        ensure!(layout.cable_jitter >= 0.0, "cable_jitter must not be negative");

        ensure!(
            anim.blink_speed[0] > 0.0 && anim.blink_speed[0] <= anim.blink_speed[1],
            "blink_speed must be an increasing positive range"
        );
        ensure!(anim.pulse_speed > 0.0, "pulse_speed must be positive");
        ensure!(anim.camera_ease > 0.0, "camera_ease must be positive");

        ensure!(self.window.width > 0 && self.window.height > 0, "window size must be non-zero");
        Ok(())
    }
}
