//! Module trait for the per-tab views

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::Action;
use crate::state::ViewState;

/// A tab body that handles its own keys and draws itself from the view state.
pub trait Module {
    fn id(&self) -> &'static str;

    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, state: &ViewState) -> Action;

    /// Whether keys are currently going into a text field
    fn captures_text(&self) -> bool {
        false
    }

    fn render(&self, frame: &mut Frame, area: Rect, state: &ViewState);
}
