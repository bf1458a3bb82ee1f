pub mod content;
pub mod overlay;
pub mod state;
pub mod style;

pub use content::{content_for, SectionContent};
pub use overlay::{OverlayFrame, OverlayOutput};
pub use state::{Section, Theme, UiEvent, ViewState};
pub use style::OverlayStyle;
