use tracing::{debug, warn};

use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::AppState;

/// Handle journal loading state
///
/// The fetch itself is started by the runtime; this only tracks progress and
/// stores the result.
pub fn reduce_journals(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::ReloadJournals => {
            let mut new_state = state;
            new_state.journals.loading = true;
            new_state.system.set_status_message("Loading journals...".to_string());
            Ok((new_state, Effect::None))
        }
        Action::JournalsLoaded(Ok(book)) => {
            let mut new_state = state;
            debug!("DATA: {} journal(s) loaded", book.len());
            let mut message = format!(
                "Loaded {} journal(s) from {}",
                book.len(),
                new_state.journals.source
            );
            if !book.rejected().is_empty() {
                message.push_str(&format!(", skipped {}", book.rejected().len()));
            }
            new_state.journals.book = std::sync::Arc::clone(book);
            new_state.journals.loading = false;
            // Indices refer to the previous book
            new_state.ui.modal = None;
            new_state.system.set_status_message(message);
            Ok((new_state, Effect::None))
        }
        Action::JournalsLoaded(Err(e)) => {
            let mut new_state = state;
            warn!("DATA: journal load failed: {}", e);
            new_state.journals.loading = false;
            new_state
                .system
                .set_status_error_message(format!("Failed to load journals: {}", e));
            Ok((new_state, Effect::None))
        }
        _ => Err(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{Journal, JournalBook};
    use crate::tui::state::ModalState;
    use crate::tui::testing::{date, sample_book};
    use std::sync::Arc;

    fn run(state: AppState, action: Action) -> AppState {
        match reduce_journals(state, &action) {
            Ok((state, _)) => state,
            Err(_) => panic!("action not handled"),
        }
    }

    #[test]
    fn test_loaded_book_replaces_previous() {
        let mut state = AppState::new(date(2024, 6, 15), Default::default());
        state.journals.source = "test".to_string();
        state.ui.modal = Some(ModalState { index: 0 });

        let state = run(state, Action::ReloadJournals);
        assert!(state.journals.loading);

        let state = run(state, Action::JournalsLoaded(Ok(Arc::new(sample_book()))));
        assert!(!state.journals.loading);
        assert_eq!(state.journals.book.len(), 3);
        assert!(state.ui.modal.is_none());
        assert_eq!(
            state.system.status_message.as_deref(),
            Some("Loaded 3 journal(s) from test")
        );
    }

    #[test]
    fn test_skipped_records_are_mentioned() {
        let book = JournalBook::from_journals(vec![Journal {
            img_url: String::new(),
            rating: 9.0,
            categories: Vec::new(),
            date: "01/01/2024".to_string(),
            description: String::new(),
        }]);
        let state = AppState::new(date(2024, 6, 15), Default::default());
        let state = run(state, Action::JournalsLoaded(Ok(Arc::new(book))));
        assert!(state.system.status_message.unwrap().ends_with(", skipped 1"));
    }

    #[test]
    fn test_failed_load_keeps_old_book() {
        let mut state = AppState::new(date(2024, 6, 15), Default::default());
        state.journals.book = Arc::new(sample_book());

        let state = run(state, Action::JournalsLoaded(Err("boom".to_string())));
        assert_eq!(state.journals.book.len(), 3);
        assert!(state.system.status_is_error);
    }
}
