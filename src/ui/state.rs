use serde::{Deserialize, Serialize};

/// Content section selected in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Projects,
    Tools,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Home, Section::Projects, Section::Tools, Section::Contact];

    /// Label shown on the navigation entry
    pub const fn label(self) -> &'static str {
        match self {
            Section::Home => "HOME",
            Section::Projects => "PROJECTS",
            Section::Tools => "TOOLS",
            Section::Contact => "CONTACT",
        }
    }

    /// Lowercase identifier, as used on the command line and in config files
    pub const fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Projects => "projects",
            Section::Tools => "tools",
            Section::Contact => "contact",
        }
    }

    pub fn from_label(label: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}

/// Every state change the overlay can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// Desktop navigation entry clicked
    Navigate(Section),
    ToggleTheme,
    /// Hamburger button clicked
    ToggleMenu,
    /// Entry picked from the open mobile menu
    MobileNavigate(Section),
}

/// View-state owned by the shell. Children only read it and emit `UiEvent`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub section: Section,
    pub theme: Theme,
    pub menu_open: bool,
}

impl ViewState {
    pub fn new(section: Section, theme: Theme) -> Self {
        Self {
            section,
            theme,
            menu_open: false,
        }
    }

    /// Apply a single transition. Total: every event is valid in every state.
    pub fn apply(self, event: UiEvent) -> ViewState {
        match event {
            UiEvent::Navigate(section) => ViewState { section, ..self },
            UiEvent::ToggleTheme => ViewState {
                theme: self.theme.toggled(),
                ..self
            },
            UiEvent::ToggleMenu => ViewState {
                menu_open: !self.menu_open,
                ..self
            },
            UiEvent::MobileNavigate(section) => ViewState {
                section,
                menu_open: false,
                ..self
            },
        }
    }

    pub fn apply_all(self, events: impl IntoIterator<Item = UiEvent>) -> ViewState {
        events.into_iter().fold(self, ViewState::apply)
    }
}
