use tracing::debug;

use crate::dates::iso_key;
use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::{AppState, ModalState};

/// Handle the journal detail modal
///
/// The modal walks [`JournalBook::ordered`](crate::journal::JournalBook::ordered)
/// without wrapping.
pub fn reduce_modal(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::OpenJournal => Ok(open(state)),
        Action::ModalPrev => {
            let mut new_state = state;
            if let Some(modal) = new_state.ui.modal.as_mut() {
                modal.index = modal.index.saturating_sub(1);
            }
            Ok((new_state, Effect::None))
        }
        Action::ModalNext => {
            let mut new_state = state;
            let len = new_state.journals.book.len();
            if let Some(modal) = new_state.ui.modal.as_mut() {
                if modal.index + 1 < len {
                    modal.index += 1;
                }
            }
            Ok((new_state, Effect::None))
        }
        Action::CloseModal => {
            let mut new_state = state;
            new_state.ui.modal = None;
            Ok((new_state, Effect::None))
        }
        _ => Err(state),
    }
}

fn open(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    let key = iso_key(new_state.ui.selected);
    match new_state.journals.book.index_of(&key) {
        Some(index) => {
            debug!("MODAL: opening journal {} ({})", index, key);
            new_state.ui.modal = Some(ModalState { index });
        }
        None => new_state.system.set_status_message(format!("No journal for {}", key)),
    }
    (new_state, Effect::None)
}
