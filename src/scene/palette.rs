use crate::math::color::{hex, Rgb};
use crate::ui::Theme;

/// Which palette entry a node takes its colour from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteSlot {
    Floor,
    FloorGrid,
    RackBody,
    RackTrim,
    Blade,
    Cable,
    CartFrame,
    CartWheel,
    Laptop,
    Screen,
    StatusLight,
    ActivityLight,
    AlertLight,
    Pulse,
}

/// Cosmetic colours for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub fog: Rgb,
    pub ambient: f32,
    pub floor: Rgb,
    pub floor_grid: Rgb,
    pub rack_body: Rgb,
    pub rack_trim: Rgb,
    pub blade: Rgb,
    pub cable: Rgb,
    pub cart_frame: Rgb,
    pub cart_wheel: Rgb,
    pub laptop: Rgb,
    pub screen: Rgb,
    pub status_light: Rgb,
    pub activity_light: Rgb,
    pub alert_light: Rgb,
    pub pulse: Rgb,
}

pub const DARK: Palette = Palette {
    background: hex(0x070b14),
    fog: hex(0x0b1220),
    ambient: 0.25,
    floor: hex(0x10151f),
    floor_grid: hex(0x1d2a3d),
    rack_body: hex(0x1a1f29),
    rack_trim: hex(0x2b3342),
    blade: hex(0x242b38),
    cable: hex(0x2f6fb0),
    cart_frame: hex(0x3a4250),
    cart_wheel: hex(0x14171c),
    laptop: hex(0x2a2f38),
    screen: hex(0x4ac3ff),
    status_light: hex(0x39ff88),
    activity_light: hex(0xffb347),
    alert_light: hex(0xff4d4d),
    pulse: hex(0x4ac3ff),
};

pub const LIGHT: Palette = Palette {
    background: hex(0xe8edf3),
    fog: hex(0xdfe6ee),
    ambient: 0.55,
    floor: hex(0xc9d1db),
    floor_grid: hex(0xaab5c3),
    rack_body: hex(0x5b6472),
    rack_trim: hex(0x7b8594),
    blade: hex(0x8a93a1),
    cable: hex(0x1f5f9e),
    cart_frame: hex(0x9aa3b0),
    cart_wheel: hex(0x3a3f47),
    laptop: hex(0x6d7480),
    screen: hex(0x2a8fd6),
    status_light: hex(0x17b85d),
    activity_light: hex(0xe08a1e),
    alert_light: hex(0xd93636),
    pulse: hex(0x2a8fd6),
};

impl Palette {
    pub const fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    pub const fn color(&self, slot: PaletteSlot) -> Rgb {
        match slot {
            PaletteSlot::Floor => self.floor,
            PaletteSlot::FloorGrid => self.floor_grid,
            PaletteSlot::RackBody => self.rack_body,
            PaletteSlot::RackTrim => self.rack_trim,
            PaletteSlot::Blade => self.blade,
            PaletteSlot::Cable => self.cable,
            PaletteSlot::CartFrame => self.cart_frame,
            PaletteSlot::CartWheel => self.cart_wheel,
            PaletteSlot::Laptop => self.laptop,
            PaletteSlot::Screen => self.screen,
            PaletteSlot::StatusLight => self.status_light,
            PaletteSlot::ActivityLight => self.activity_light,
            PaletteSlot::AlertLight => self.alert_light,
            PaletteSlot::Pulse => self.pulse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_select_distinct_palettes() {
        assert_ne!(Palette::for_theme(Theme::Dark), Palette::for_theme(Theme::Light));
    }

    #[test]
    fn palette_selection_is_stable() {
        assert_eq!(Palette::for_theme(Theme::Dark), Palette::for_theme(Theme::Dark));
        assert_eq!(*Palette::for_theme(Theme::Light), LIGHT);
    }

    #[test]
    fn dark_background_is_darker_than_light() {
        let luma = |c: Rgb| c[0] + c[1] + c[2];
        assert!(luma(DARK.background) < luma(LIGHT.background));
    }
}
