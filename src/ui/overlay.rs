//! egui overlay drawn over the 3D layer.
//!
//! The overlay never mutates `ViewState`; clicks come back as `UiEvent`s and
//! the shell applies them after the frame.

use egui::{Align2, Frame, Margin, RichText};

use super::content::content_for;
use super::state::{Section, UiEvent, ViewState};
use super::style::OverlayStyle;

const BRAND: &str = "server room";
const BAR_HEIGHT: f32 = 48.0;

/// What the user asked for during one overlay frame
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverlayOutput {
    pub events: Vec<UiEvent>,
    /// Reload clicked on the fallback panel
    pub reload: bool,
}

/// Parameters of one overlay frame
pub struct OverlayFrame<'a> {
    pub view: &'a ViewState,
    pub style: &'a OverlayStyle,
    /// Viewport width in logical points
    pub width: f32,
    pub breakpoint: f32,
    /// Set while the shell is in its failed state
    pub failure: Option<&'a str>,
}

/// Narrow viewports get the hamburger menu instead of inline navigation
pub fn is_compact(width: f32, breakpoint: f32) -> bool {
    width < breakpoint
}

pub fn show(ctx: &egui::Context, frame: &OverlayFrame<'_>) -> OverlayOutput {
    let mut output = OverlayOutput::default();
    let compact = is_compact(frame.width, frame.breakpoint);

    top_bar(ctx, frame, compact, &mut output.events);

    if compact && frame.view.menu_open {
        mobile_menu(ctx, frame, &mut output.events);
    }

    match frame.failure {
        Some(message) => output.reload = fallback_panel(ctx, frame.style, message),
        None => content_panel(ctx, frame, compact),
    }

    output
}

fn top_bar(ctx: &egui::Context, frame: &OverlayFrame<'_>, compact: bool, events: &mut Vec<UiEvent>) {
    let style = frame.style;
    egui::TopBottomPanel::top("nav")
        .exact_height(BAR_HEIGHT)
        .frame(Frame::NONE.fill(style.bar).inner_margin(Margin::symmetric(16, 8)))
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(RichText::new(BRAND).strong().size(18.0).color(style.accent));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_label = if frame.view.theme.is_dark() { "☀" } else { "☾" };
                    if ui
                        .button(RichText::new(theme_label).size(16.0))
                        .on_hover_text("Toggle theme")
                        .clicked()
                    {
                        events.push(UiEvent::ToggleTheme);
                    }

                    if compact {
                        let icon = if frame.view.menu_open { "✕" } else { "☰" };
                        if ui.button(RichText::new(icon).size(16.0)).clicked() {
                            events.push(UiEvent::ToggleMenu);
                        }
                    } else {
                        // right_to_left lays entries out in reverse
                        for section in Section::ALL.into_iter().rev() {
                            if nav_entry(ui, frame, section) {
                                events.push(UiEvent::Navigate(section));
                            }
                        }
                    }
                });
            });
        });
}

fn nav_entry(ui: &mut egui::Ui, frame: &OverlayFrame<'_>, section: Section) -> bool {
    let selected = frame.view.section == section;
    let color = if selected { frame.style.accent } else { frame.style.muted };
    ui.selectable_label(selected, RichText::new(section.label()).color(color))
        .clicked()
}

fn mobile_menu(ctx: &egui::Context, frame: &OverlayFrame<'_>, events: &mut Vec<UiEvent>) {
    egui::Area::new(egui::Id::new("mobile-menu"))
        .anchor(Align2::RIGHT_TOP, [-12.0, BAR_HEIGHT + 4.0])
        .show(ctx, |ui| {
            Frame::NONE
                .fill(frame.style.panel)
                .corner_radius(6)
                .inner_margin(Margin::same(12))
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        for section in Section::ALL {
                            if nav_entry(ui, frame, section) {
                                events.push(UiEvent::MobileNavigate(section));
                            }
                        }
                    });
                });
        });
}

fn content_panel(ctx: &egui::Context, frame: &OverlayFrame<'_>, compact: bool) {
    let content = content_for(frame.view.section);
    let max_width = if compact { frame.width - 32.0 } else { 420.0 };

    egui::Window::new("content")
        .id(egui::Id::new("content"))
        .title_bar(false)
        .resizable(false)
        .movable(false)
        .anchor(Align2::LEFT_BOTTOM, [16.0, -16.0])
        .max_width(max_width.max(120.0))
        .frame(
            Frame::NONE
                .fill(frame.style.panel)
                .corner_radius(8)
                .inner_margin(Margin::same(16)),
        )
        .show(ctx, |ui| {
            ui.label(RichText::new(content.heading).size(22.0).strong().color(frame.style.text));
            ui.add_space(6.0);
            ui.label(RichText::new(content.body).color(frame.style.muted));
        });
}

/// Replaces the content panel once rendering has failed. Returns true when Reload is clicked.
pub fn fallback_panel(ctx: &egui::Context, style: &OverlayStyle, message: &str) -> bool {
    let mut reload = false;
    egui::Window::new("fallback")
        .id(egui::Id::new("fallback"))
        .title_bar(false)
        .resizable(false)
        .movable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            Frame::NONE
                .fill(style.panel)
                .corner_radius(8)
                .inner_margin(Margin::same(20)),
        )
        .show(ctx, |ui| {
            ui.label(RichText::new("The 3D view stopped").size(20.0).strong().color(style.danger));
            ui.add_space(4.0);
            ui.label(RichText::new(message).color(style.muted));
            ui.add_space(10.0);
            reload = ui.button("Reload").clicked();
        });
    reload
}
