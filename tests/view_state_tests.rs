use server_room::scene::Palette;
use server_room::ui::{content_for, Section, Theme, UiEvent, ViewState};

fn home() -> ViewState {
    ViewState::new(Section::Home, Theme::Dark)
}

#[cfg(test)]
mod navigation_tests {
    use super::*;

    #[test]
    fn test_projects_navigation_shows_projects_content() {
        let view = home().apply(UiEvent::Navigate(Section::Projects));
        assert_eq!(view.section, Section::Projects);
        assert_eq!(view.section.label(), "PROJECTS");
        assert_eq!(content_for(view.section).heading, "Projects");
    }

    #[test]
    fn test_navigation_labels_are_fixed() {
        let labels: Vec<_> = Section::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["HOME", "PROJECTS", "TOOLS", "CONTACT"]);
    }

    #[test]
    fn test_navigate_is_idempotent() {
        let once = home().apply(UiEvent::Navigate(Section::Tools));
        let twice = once.apply(UiEvent::Navigate(Section::Tools));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_desktop_navigation_leaves_menu_alone() {
        let view = home()
            .apply(UiEvent::ToggleMenu)
            .apply(UiEvent::Navigate(Section::Contact));
        assert!(view.menu_open);
    }
}

#[cfg(test)]
mod theme_tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_theme() {
        let view = home().apply_all([UiEvent::ToggleTheme, UiEvent::ToggleTheme]);
        assert_eq!(view, home());
    }

    #[test]
    fn test_toggle_only_changes_theme() {
        let before = home().apply(UiEvent::Navigate(Section::Tools));
        let after = before.apply(UiEvent::ToggleTheme);
        assert_eq!(after.theme, Theme::Light);
        assert_eq!(after.section, before.section);
        assert_eq!(after.menu_open, before.menu_open);
    }

    #[test]
    fn test_palette_follows_theme() {
        let dark = Palette::for_theme(Theme::Dark);
        let light = Palette::for_theme(Theme::Light);
        assert_ne!(dark.background, light.background);
        assert_eq!(Palette::for_theme(Theme::Dark.toggled().toggled()), dark);
    }
}

#[cfg(test)]
mod mobile_menu_tests {
    use super::*;

    #[test]
    fn test_mobile_navigate_sets_section_and_closes_menu() {
        let open = home().apply(UiEvent::ToggleMenu);
        assert!(open.menu_open);

        let view = open.apply(UiEvent::MobileNavigate(Section::Tools));
        assert_eq!(view.section, Section::Tools);
        assert!(!view.menu_open);
    }

    #[test]
    fn test_mobile_navigate_with_closed_menu_keeps_it_closed() {
        let view = home().apply(UiEvent::MobileNavigate(Section::Contact));
        assert_eq!(view.section, Section::Contact);
        assert!(!view.menu_open);
    }

    #[test]
    fn test_every_event_is_valid_in_every_state() {
        let events = [
            UiEvent::ToggleTheme,
            UiEvent::ToggleMenu,
            UiEvent::Navigate(Section::Projects),
            UiEvent::MobileNavigate(Section::Home),
        ];
        let mut states = vec![home()];
        for event in events {
            let next: Vec<_> = states.iter().map(|s| s.apply(event)).collect();
            states.extend(next);
        }
        for state in &states {
            for event in events {
                let _ = state.apply(event);
            }
        }
        assert_eq!(states.len(), 16);
    }
}
