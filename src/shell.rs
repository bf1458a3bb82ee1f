//! Failure boundary around the 3D layer.
//!
//! The shell owns the view state and decides whether the scene is drawn.
//! Once anything inside `guard` panics or returns a `RenderError`, the scene
//! stays off until `reload` is called; the overlay keeps working throughout.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::RenderError;
use crate::ui::{UiEvent, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryStatus {
    Running,
    Failed { message: String },
}

/// What changed after applying overlay events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewChanges {
    pub theme: bool,
    pub section: bool,
    pub menu: bool,
}

impl ViewChanges {
    pub fn any(&self) -> bool {
        self.theme || self.section || self.menu
    }
}

pub struct Shell {
    view: ViewState,
    status: BoundaryStatus,
    failures: u32,
}

impl Shell {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            status: BoundaryStatus::Running,
            failures: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn status(&self) -> &BoundaryStatus {
        &self.status
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, BoundaryStatus::Failed { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match &self.status {
            BoundaryStatus::Failed { message } => Some(message),
            BoundaryStatus::Running => None,
        }
    }

    /// Number of failures since start-up
    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn handle(&mut self, event: UiEvent) -> ViewChanges {
        let before = self.view;
        self.view = before.apply(event);
        ViewChanges {
            theme: before.theme != self.view.theme,
            section: before.section != self.view.section,
            menu: before.menu_open != self.view.menu_open,
        }
    }

    pub fn handle_all(&mut self, events: impl IntoIterator<Item = UiEvent>) -> ViewChanges {
        events.into_iter().fold(ViewChanges::default(), |acc, event| {
            let changed = self.handle(event);
            ViewChanges {
                theme: acc.theme || changed.theme,
                section: acc.section || changed.section,
                menu: acc.menu || changed.menu,
            }
        })
    }

    /// Runs `work` inside the boundary. Skipped entirely while failed.
    pub fn guard<T>(&mut self, work: impl FnOnce() -> Result<T, RenderError>) -> Option<T> {
        if self.is_failed() {
            return None;
        }
        let result = match catch_unwind(AssertUnwindSafe(work)) {
            Ok(result) => result,
            Err(payload) => Err(RenderError::from_panic(payload)),
        };
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report_failure(&err);
                None
            }
        }
    }

    pub fn report_failure(&mut self, err: &RenderError) {
        log::error!("3D layer failed: {err}");
        self.failures += 1;
        self.status = BoundaryStatus::Failed {
            message: err.to_string(),
        };
    }

    /// Back to `Running`. The caller is expected to recompose the scene first.
    pub fn reload(&mut self) -> bool {
        let was_failed = self.is_failed();
        if was_failed {
            log::info!("Reloading 3D layer");
        }
        self.status = BoundaryStatus::Running;
        was_failed
    }
}
