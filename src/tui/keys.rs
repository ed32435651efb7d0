/// Keyboard and mouse event to action mapping
///
/// This module handles converting crossterm events into Actions. Input goes
/// to the innermost open layer first: the go-to prompt, then the journal
/// modal, then the calendar itself.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, trace};

use super::action::Action;
use super::layout::{grid_hit, modal_area, ScreenLayout};
use super::state::AppState;

/// Handle keys while the go-to prompt is open
fn handle_prompt_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Enter => Some(Action::SubmitPrompt),
        KeyCode::Esc => Some(Action::CancelPrompt),
        KeyCode::Backspace => Some(Action::PromptBackspace),
        KeyCode::Char(c) => Some(Action::PromptInput(c)),
        _ => None,
    }
}

/// Handle keys while the journal modal is open
fn handle_modal_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::ModalPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::ModalNext),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::CloseModal),
        _ => None,
    }
}

fn handle_calendar_keys(key_code: KeyCode, state: &AppState) -> Option<Action> {
    let page = i64::from(state.calendar.viewport.height.max(1));
    match key_code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveSelection(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveSelection(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveSelection(-7)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveSelection(7)),
        KeyCode::PageUp => Some(Action::ScrollBy(-page)),
        KeyCode::PageDown => Some(Action::ScrollBy(page)),
        KeyCode::Char('t') | KeyCode::Home => Some(Action::GoToToday),
        KeyCode::Char('g') | KeyCode::Char('/') => Some(Action::OpenJumpPrompt),
        KeyCode::Enter => Some(Action::OpenJournal),
        KeyCode::Char('r') => Some(Action::ReloadJournals),
        _ => None,
    }
}

/// Convert a KeyEvent into an Action based on current application state
pub fn key_to_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    trace!(
        "KEY: {:?} (prompt={}, modal={})",
        key.code,
        state.ui.prompt.is_some(),
        state.ui.modal.is_some()
    );

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if state.ui.prompt.is_some() {
        return handle_prompt_keys(key.code);
    }
    if state.ui.modal.is_some() {
        return handle_modal_keys(key.code);
    }
    handle_calendar_keys(key.code, state)
}

/// Convert a MouseEvent into an Action; `area` is the whole terminal
pub fn mouse_to_action(mouse: MouseEvent, state: &AppState, area: Rect) -> Option<Action> {
    let row_height = i64::from(state.calendar.engine.layout().row_height);

    if let Some(modal) = state.ui.modal {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let modal_rect = modal_area(area);
        let position = Position {
            x: mouse.column,
            y: mouse.row,
        };
        if !modal_rect.contains(position) {
            debug!("KEY: click outside journal modal");
            return Some(Action::CloseModal);
        }
        // Left half steps back, right half steps forward
        let action = if mouse.column < modal_rect.x + modal_rect.width / 2 {
            Action::ModalPrev
        } else {
            Action::ModalNext
        };
        trace!("KEY: modal click at index {}: {:?}", modal.index, action);
        return Some(action);
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::ScrollBy(-row_height)),
        MouseEventKind::ScrollDown => Some(Action::ScrollBy(row_height)),
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = ScreenLayout::new(area);
            let (column, line) = grid_hit(layout.grid, mouse.column, mouse.row)?;
            let y = u64::from(state.calendar.viewport.offset) + u64::from(line);
            let engine = &state.calendar.engine;
            let index = engine.index_at(y, column)?;
            let date = engine.days().get(index)?.date;
            debug!("KEY: click on {}", date);
            Some(Action::SelectDate(date))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::ModalState;
    use crate::tui::testing::{date, initialized_state_at};

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 70,
        height: 28,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    #[test]
    fn test_calendar_keys() {
        let state = initialized_state_at(date(2024, 6, 15));

        assert!(matches!(key_to_action(key(KeyCode::Char('q')), &state), Some(Action::Quit)));
        assert!(matches!(
            key_to_action(key(KeyCode::Left), &state),
            Some(Action::MoveSelection(-1))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('j')), &state),
            Some(Action::MoveSelection(7))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::PageDown), &state),
            Some(Action::ScrollBy(24))
        ));
        assert!(matches!(key_to_action(key(KeyCode::Char('t')), &state), Some(Action::GoToToday)));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('g')), &state),
            Some(Action::OpenJumpPrompt)
        ));
        assert!(matches!(key_to_action(key(KeyCode::Enter), &state), Some(Action::OpenJournal)));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('r')), &state),
            Some(Action::ReloadJournals)
        ));
        assert!(key_to_action(key(KeyCode::Char('x')), &state).is_none());
    }

    #[test]
    fn test_ctrl_c_quits_from_any_layer() {
        let mut state = initialized_state_at(date(2024, 6, 15));
        state.ui.prompt = Some(String::new());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(key_to_action(ctrl_c, &state), Some(Action::Quit)));
    }

    #[test]
    fn test_prompt_captures_keys() {
        let mut state = initialized_state_at(date(2024, 6, 15));
        state.ui.prompt = Some("2024".to_string());

        assert!(matches!(
            key_to_action(key(KeyCode::Char('q')), &state),
            Some(Action::PromptInput('q'))
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Backspace), &state),
            Some(Action::PromptBackspace)
        ));
        assert!(matches!(key_to_action(key(KeyCode::Enter), &state), Some(Action::SubmitPrompt)));
        assert!(matches!(key_to_action(key(KeyCode::Esc), &state), Some(Action::CancelPrompt)));
    }

    #[test]
    fn test_modal_keys() {
        let mut state = initialized_state_at(date(2024, 6, 15));
        state.ui.modal = Some(ModalState { index: 0 });

        assert!(matches!(key_to_action(key(KeyCode::Left), &state), Some(Action::ModalPrev)));
        assert!(matches!(key_to_action(key(KeyCode::Right), &state), Some(Action::ModalNext)));
        assert!(matches!(key_to_action(key(KeyCode::Esc), &state), Some(Action::CloseModal)));
        assert!(key_to_action(key(KeyCode::Char('t')), &state).is_none());
    }

    #[test]
    fn test_wheel_scrolls_one_row() {
        let state = initialized_state_at(date(2024, 6, 15));
        assert!(matches!(
            mouse_to_action(mouse(MouseEventKind::ScrollDown, 5, 5), &state, SCREEN),
            Some(Action::ScrollBy(4))
        ));
        assert!(matches!(
            mouse_to_action(mouse(MouseEventKind::ScrollUp, 5, 5), &state, SCREEN),
            Some(Action::ScrollBy(-4))
        ));
    }

    #[test]
    fn test_click_selects_date_under_cursor() {
        let state = initialized_state_at(date(2024, 6, 15));

        // Grid starts at line 2; offset 8 puts the week of 2024-06-09 at grid line 8
        match mouse_to_action(click(65, 10), &state, SCREEN) {
            Some(Action::SelectDate(d)) => assert_eq!(d, date(2024, 6, 15)),
            other => panic!("unexpected {:?}", other),
        }
        match mouse_to_action(click(0, 6), &state, SCREEN) {
            Some(Action::SelectDate(d)) => assert_eq!(d, date(2024, 6, 2)),
            other => panic!("unexpected {:?}", other),
        }
        // Header and status lines are not part of the grid
        assert!(mouse_to_action(click(10, 0), &state, SCREEN).is_none());
        assert!(mouse_to_action(click(10, 27), &state, SCREEN).is_none());
    }

    #[test]
    fn test_modal_clicks() {
        let mut state = initialized_state_at(date(2024, 6, 15));
        state.ui.modal = Some(ModalState { index: 1 });

        // Modal spans x 3..67 and y 6..22 on a 70x28 screen
        assert!(matches!(mouse_to_action(click(10, 10), &state, SCREEN), Some(Action::ModalPrev)));
        assert!(matches!(mouse_to_action(click(60, 10), &state, SCREEN), Some(Action::ModalNext)));
        assert!(matches!(mouse_to_action(click(1, 1), &state, SCREEN), Some(Action::CloseModal)));
        assert!(mouse_to_action(mouse(MouseEventKind::ScrollDown, 10, 10), &state, SCREEN).is_none());
    }
}
