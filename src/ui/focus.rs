//! Focus and cursor state for the dashboard panels.

use crate::registry::PanelId;

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Which panel has focus, plus one cursor per panel.
///
/// Every transition is total. Cursors saturate at the ends of their panel and
/// are left alone when focus moves elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    focused: PanelId,
    cursors: [usize; 3],
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusState {
    pub fn new() -> Self {
        Self {
            focused: PanelId::ALL[0],
            cursors: [0; 3],
        }
    }

    pub fn focused(&self) -> PanelId {
        self.focused
    }

    pub fn cursor(&self, panel: PanelId) -> usize {
        self.cursors[panel.index()]
    }

    /// Cursor of the focused panel.
    pub fn current(&self) -> usize {
        self.cursor(self.focused)
    }

    pub fn cycle_focus(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn cycle_focus_back(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Move the focused panel's cursor; `len` is that panel's entry count.
    pub fn move_cursor(&mut self, direction: Direction, len: usize) {
        if len == 0 {
            return;
        }
        let cursor = &mut self.cursors[self.focused.index()];
        *cursor = match direction {
            Direction::Up => cursor.saturating_sub(1),
            Direction::Down => (*cursor + 1).min(len - 1),
        };
    }

    /// Pull a cursor back inside `0..len` after the panel's entries changed.
    pub fn clamp(&mut self, panel: PanelId, len: usize) {
        let cursor = &mut self.cursors[panel.index()];
        *cursor = (*cursor).min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let focus = FocusState::new();
        assert_eq!(focus.focused(), PanelId::Places);
        for id in PanelId::ALL {
            assert_eq!(focus.cursor(id), 0);
        }
    }

    #[test]
    fn test_move_down_saturates() {
        let mut focus = FocusState::new();
        for _ in 0..4 {
            focus.move_cursor(Direction::Down, 4);
        }
        assert_eq!(focus.current(), 3);
        focus.move_cursor(Direction::Down, 4);
        assert_eq!(focus.current(), 3);
    }

    #[test]
    fn test_move_up_saturates_at_zero() {
        let mut focus = FocusState::new();
        focus.move_cursor(Direction::Up, 3);
        assert_eq!(focus.current(), 0);
        focus.move_cursor(Direction::Down, 3);
        focus.move_cursor(Direction::Up, 3);
        focus.move_cursor(Direction::Up, 3);
        assert_eq!(focus.current(), 0);
    }

    #[test]
    fn test_move_on_empty_panel_is_noop() {
        let mut focus = FocusState::new();
        focus.move_cursor(Direction::Down, 0);
        focus.move_cursor(Direction::Up, 0);
        assert_eq!(focus.current(), 0);
    }

    #[test]
    fn test_cycle_focus_wraps_after_three() {
        let mut focus = FocusState::new();
        let start = focus.focused();
        focus.cycle_focus();
        assert_eq!(focus.focused(), PanelId::Applications);
        focus.cycle_focus();
        assert_eq!(focus.focused(), PanelId::Shortcuts);
        focus.cycle_focus();
        assert_eq!(focus.focused(), start);
    }

    #[test]
    fn test_cycle_focus_keeps_other_cursors() {
        let mut focus = FocusState::new();
        focus.move_cursor(Direction::Down, 5);
        focus.move_cursor(Direction::Down, 5);
        focus.cycle_focus();
        focus.move_cursor(Direction::Down, 5);
        focus.cycle_focus_back();
        assert_eq!(focus.current(), 2);
        assert_eq!(focus.cursor(PanelId::Applications), 1);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut focus = FocusState::new();
        for _ in 0..5 {
            focus.move_cursor(Direction::Down, 10);
        }
        focus.clamp(PanelId::Places, 2);
        assert_eq!(focus.cursor(PanelId::Places), 1);
        focus.clamp(PanelId::Places, 0);
        assert_eq!(focus.cursor(PanelId::Places), 0);
    }
}
