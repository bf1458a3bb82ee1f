use server_room::config::AppConfig;
use server_room::frame::FrameInfo;
use server_room::scene::palette::{DARK, LIGHT};
use server_room::scene::{PaletteSlot, SceneGraph};
use server_room::shell::BoundaryStatus;
use server_room::ui::{OverlayOutput, Section, Theme, UiEvent};
use server_room::{RenderError, Session};

fn session() -> Session {
    Session::new(AppConfig {
        seed: Some(3),
        ..AppConfig::default()
    })
}

fn frame(number: u64, time: f32) -> FrameInfo {
    FrameInfo::new(number, time, 1.0 / 60.0)
}

fn clicks(events: impl IntoIterator<Item = UiEvent>) -> OverlayOutput {
    OverlayOutput {
        events: events.into_iter().collect(),
        reload: false,
    }
}

fn rack_body_color(session: &Session) -> [f32; 3] {
    let graph = session.graph();
    let id = graph.find("rack/0/0/body").expect("rack body");
    graph.get(id).expect("node").material().color
}

#[cfg(test)]
mod boundary_tests {
    use super::*;

    #[test]
    fn test_frames_fill_instance_batches() {
        let mut session = session();
        assert!(session.advance_to(frame(0, 0.5)).is_some());
        assert!(session.batches().total() > 0);
        assert_eq!(*session.shell().status(), BoundaryStatus::Running);
    }

    #[test]
    fn test_panicking_callback_fails_the_shell() {
        let mut session = session();
        session.register(|frame: &FrameInfo, _: &mut SceneGraph| {
            if frame.time > 1.0 {
                panic!("frame callback blew up");
            }
        });

        assert!(session.advance_to(frame(0, 0.5)).is_some());
        assert!(session.advance_to(frame(1, 1.5)).is_none());
        assert!(session.shell().is_failed());
        assert!(session
            .shell()
            .failure_message()
            .is_some_and(|m| m.contains("frame callback blew up")));

        // Stays down until reload
        assert!(session.advance_to(frame(2, 2.0)).is_none());
    }

    #[test]
    fn test_reload_recomposes_and_recovers() {
        let mut session = session();
        let stats = session.stats();
        session.register(|_: &FrameInfo, _: &mut SceneGraph| panic!("always"));
        assert_eq!(session.callback_count(), 2);
        assert!(session.advance_to(frame(0, 0.1)).is_none());

        session.apply_overlay(OverlayOutput {
            events: Vec::new(),
            reload: true,
        });

        assert!(!session.shell().is_failed());
        assert_eq!(session.callback_count(), 1);
        assert_eq!(session.stats(), stats);
        assert!(session.advance_to(frame(1, 0.2)).is_some());
    }

    #[test]
    fn test_render_error_fails_the_shell() {
        let mut session = session();
        let drawn = session.render_scene(800, 600, |_, _, _| Err(RenderError::Panic("pipeline".into())));
        assert!(!drawn);
        assert!(session.shell().is_failed());

        let mut called = false;
        let drawn = session.render_scene(800, 600, |_, _, _| {
            called = true;
            Ok(())
        });
        assert!(!drawn);
        assert!(!called);
    }

    #[test]
    fn test_overlay_keeps_working_while_failed() {
        let mut session = session();
        session.report_failure(&RenderError::Panic("down".into()));
        session.apply_overlay(clicks([UiEvent::Navigate(Section::Tools)]));
        assert_eq!(session.view().section, Section::Tools);
        assert!(session.shell().is_failed());
    }
}

#[cfg(test)]
mod view_change_tests {
    use super::*;

    #[test]
    fn test_theme_toggle_recolours_in_place() {
        let mut session = session();
        let stats = session.stats();
        let nodes = session.graph().len();
        assert_eq!(rack_body_color(&session), DARK.color(PaletteSlot::RackBody));

        let changes = session.apply_overlay(clicks([UiEvent::ToggleTheme]));
        assert!(changes.theme);
        assert_eq!(session.view().theme, Theme::Light);
        assert_eq!(rack_body_color(&session), LIGHT.color(PaletteSlot::RackBody));
        assert_eq!(session.graph().len(), nodes);
        assert_eq!(session.stats(), stats);
    }

    #[test]
    fn test_section_change_retargets_camera() {
        let mut session = session();
        let start = session.rig().current();
        session.apply_overlay(clicks([UiEvent::Navigate(Section::Projects)]));
        assert_eq!(session.rig().active(), Section::Projects);

        for i in 0..30 {
            session.advance_to(frame(i, i as f32 / 60.0));
        }
        let target = session.rig().pose_for(Section::Projects);
        let now = session.rig().current();
        assert!(now.eye.distance(target.eye) < start.eye.distance(target.eye));
    }

    #[test]
    fn test_camera_uniform_uses_theme_environment() {
        let mut session = session();
        let dark = session.camera_uniform(1280, 800);
        assert_eq!(dark.fog_color, DARK.fog);

        session.apply_overlay(clicks([UiEvent::ToggleTheme]));
        let light = session.camera_uniform(1280, 800);
        assert_eq!(light.fog_color, LIGHT.fog);
        assert_eq!(light.ambient, LIGHT.ambient);
    }

    #[test]
    fn test_start_section_comes_from_config() {
        let session = Session::new(AppConfig {
            seed: Some(1),
            section: Section::Contact,
            theme: Theme::Light,
            ..AppConfig::default()
        });
        assert_eq!(session.view().section, Section::Contact);
        assert_eq!(session.rig().current(), session.rig().pose_for(Section::Contact));
        assert_eq!(rack_body_color(&session), LIGHT.color(PaletteSlot::RackBody));
    }
}
