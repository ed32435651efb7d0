use tracing::debug;

use super::action::Action;
use super::effects::Effect;
use super::reducers::{reduce_calendar, reduce_journals, reduce_modal, reduce_prompt};
use super::state::AppState;

/// Pure state reducer - like Redux reducer
///
/// Takes current state and an action, returns new state and an effect. No I/O
/// happens here; async work is returned as `Effect::Async`.
///
/// Ownership is passed through the sub-reducer chain to avoid cloning:
/// - Each sub-reducer returns Ok((state, effect)) if it handled the action
/// - Or Err(state) to pass ownership back for the next reducer to try
pub fn reduce(state: AppState, action: Action) -> (AppState, Effect) {
    let state = match reduce_calendar(state, &action) {
        Ok(result) => return result,
        Err(state) => state,
    };

    let state = match reduce_prompt(state, &action) {
        Ok(result) => return result,
        Err(state) => state,
    };

    let state = match reduce_modal(state, &action) {
        Ok(result) => return result,
        Err(state) => state,
    };

    let state = match reduce_journals(state, &action) {
        Ok(result) => return result,
        Err(state) => state,
    };

    match action {
        Action::SetStatusMessage { message, is_error } => {
            let mut new_state = state;
            if is_error {
                new_state.system.set_status_error_message(message);
            } else {
                new_state.system.set_status_message(message);
            }
            (new_state, Effect::None)
        }
        Action::Quit => {
            debug!("ACTION: quit requested");
            (state, Effect::None)
        }
        other => {
            debug!("ACTION: unhandled {:?}", other);
            (state, Effect::None)
        }
    }
}
