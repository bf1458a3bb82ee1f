use egui::Color32;

use super::state::Theme;
use crate::math::color::{hex, mix, to_u8, Rgb};
use crate::scene::Palette;

/// Overlay colours derived from the active palette
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub bar: Color32,
    pub panel: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub danger: Color32,
}

impl OverlayStyle {
    pub fn for_theme(theme: Theme) -> Self {
        let palette = Palette::for_theme(theme);
        let (text, muted) = if theme.is_dark() {
            (hex(0xe6edf5), hex(0x8b98a9))
        } else {
            (hex(0x141a22), hex(0x4d5866))
        };
        Self {
            bar: translucent(palette.background, 0.82),
            panel: translucent(mix(palette.background, palette.rack_trim, 0.3), 0.88),
            text: opaque(text),
            muted: opaque(muted),
            accent: opaque(palette.screen),
            danger: opaque(palette.alert_light),
        }
    }

    /// Installs base visuals on the egui context so widgets match the theme
    pub fn install(&self, ctx: &egui::Context, theme: Theme) {
        let mut visuals = if theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        visuals.override_text_color = Some(self.text);
        visuals.selection.bg_fill = self.accent.gamma_multiply(0.35);
        visuals.hyperlink_color = self.accent;
        ctx.set_visuals(visuals);
    }
}

fn opaque(rgb: Rgb) -> Color32 {
    let [r, g, b] = to_u8(rgb);
    Color32::from_rgb(r, g, b)
}

fn translucent(rgb: Rgb, alpha: f32) -> Color32 {
    let [r, g, b] = to_u8(rgb);
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ() {
        assert_ne!(OverlayStyle::for_theme(Theme::Dark), OverlayStyle::for_theme(Theme::Light));
    }

    #[test]
    fn text_contrasts_with_bar() {
        for theme in [Theme::Dark, Theme::Light] {
            let style = OverlayStyle::for_theme(theme);
            let luma = |c: Color32| c.r() as i32 + c.g() as i32 + c.b() as i32;
            assert!((luma(style.text) - luma(style.bar)).abs() > 200);
        }
    }
}
