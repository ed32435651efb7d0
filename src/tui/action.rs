use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::journal::JournalBook;

/// Global actions - like Redux actions
///
/// All state changes in the application happen through actions.
/// Actions are dispatched from:
/// - User input (key and mouse events)
/// - The main loop (ticks, resizes, layout commits)
/// - Effects (journal loading, jump cooldown timers)
#[derive(Debug, Clone)]
pub enum Action {
    /// Advance clocks and animations to `Instant`
    Tick(Instant),
    /// Grid viewport height changed, in terminal lines
    Resize(u16),
    /// The frame containing freshly merged rows has been drawn
    LayoutCommitted,

    // Calendar navigation
    ScrollBy(i64),
    MoveSelection(i64),
    SelectDate(NaiveDate),
    GoToToday,
    JumpTo(NaiveDate),

    // Jump prompt
    OpenJumpPrompt,
    PromptInput(char),
    PromptBackspace,
    SubmitPrompt,
    CancelPrompt,

    // Journal detail modal
    OpenJournal,
    ModalPrev,
    ModalNext,
    CloseModal,

    // Data actions
    ReloadJournals,
    JournalsLoaded(Result<Arc<JournalBook>, String>),

    SetStatusMessage { message: String, is_error: bool },
    Quit,
}
