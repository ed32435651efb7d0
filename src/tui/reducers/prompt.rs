use tracing::debug;

use crate::dates::parse_user_date;
use crate::tui::action::Action;
use crate::tui::effects::Effect;
use crate::tui::state::AppState;

/// Longest accepted prompt input
const MAX_PROMPT_LEN: usize = 16;

/// Handle the go-to-date prompt
pub fn reduce_prompt(state: AppState, action: &Action) -> Result<(AppState, Effect), AppState> {
    match action {
        Action::OpenJumpPrompt => {
            let mut new_state = state;
            new_state.ui.prompt = Some(String::new());
            new_state
                .system
                .set_status_message("Go to date (YYYY-MM-DD or DD/MM/YYYY)".to_string());
            Ok((new_state, Effect::None))
        }
        Action::PromptInput(ch) => {
            let mut new_state = state;
            if let Some(prompt) = new_state.ui.prompt.as_mut() {
                if prompt.chars().count() < MAX_PROMPT_LEN && !ch.is_control() {
                    prompt.push(*ch);
                }
            }
            Ok((new_state, Effect::None))
        }
        Action::PromptBackspace => {
            let mut new_state = state;
            if let Some(prompt) = new_state.ui.prompt.as_mut() {
                prompt.pop();
            }
            Ok((new_state, Effect::None))
        }
        Action::CancelPrompt => {
            let mut new_state = state;
            new_state.ui.prompt = None;
            new_state.system.reset_status_message();
            Ok((new_state, Effect::None))
        }
        Action::SubmitPrompt => Ok(submit(state)),
        _ => Err(state),
    }
}

fn submit(state: AppState) -> (AppState, Effect) {
    let mut new_state = state;
    let Some(input) = new_state.ui.prompt.clone() else {
        return (new_state, Effect::None);
    };

    match parse_user_date(&input) {
        Ok(date) => {
            debug!("PROMPT: going to {}", date);
            new_state.ui.prompt = None;
            new_state.system.reset_status_message();
            (new_state, Effect::Action(Action::JumpTo(date)))
        }
        Err(e) => {
            // Keep the prompt open so the input can be corrected
            new_state
                .system
                .set_status_error_message(format!("Invalid date: {}", e));
            (new_state, Effect::None)
        }
    }
}
