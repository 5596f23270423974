//! View selection state machine
//!
//! Tracks which producer is shown in single view and whether the display
//! is in single or grid mode. There is exactly one authoritative view
//! state per process; the renderer is a pure function of it.

use crate::registry::ClientId;

/// Display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Show exactly one selected producer's frame
    Single,
    /// Tile all known producers' frames
    Grid,
}

/// View selection state
///
/// Transitions happen only through explicit selection commands plus the
/// one-time auto-select of the first announced producer. The selection
/// survives mode switches.
#[derive(Debug, Clone)]
pub struct ViewSelector {
    mode: ViewMode,
    selected: Option<ClientId>,
}

impl ViewSelector {
    /// Create the initial state: single view, nothing selected
    pub fn new() -> Self {
        Self {
            mode: ViewMode::Single,
            selected: None,
        }
    }

    /// Current display mode
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Currently selected producer, if any
    pub fn selected(&self) -> Option<&ClientId> {
        self.selected.as_ref()
    }

    /// Switch display mode, preserving the selection
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            tracing::debug!(?mode, "View mode changed");
            self.mode = mode;
        }
    }

    /// Explicitly select a producer for single view
    pub fn select_client(&mut self, id: ClientId) {
        tracing::debug!(producer = %id, "Producer selected");
        self.selected = Some(id);
    }

    /// React to a first-frame announcement
    ///
    /// Auto-selects the producer if nothing is selected yet; returns
    /// whether the selection changed. Once anything is selected (by auto
    /// or by hand), later announcements never override it.
    pub fn on_new_client(&mut self, id: ClientId) -> bool {
        if self.selected.is_some() {
            return false;
        }
        self.selected = Some(id);
        true
    }
}

impl Default for ViewSelector {
    fn default() -> Self {
        Self::new()
    }
}
