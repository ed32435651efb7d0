use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use super::viewport::Viewport;
use crate::calendar::CalendarEngine;
use crate::config::Config;
use crate::journal::{JournalBook, JournalEntry};

/// Default help message shown in the status bar
pub const DEFAULT_STATUS_MESSAGE: &str = "t today  g go to  Enter journal  r reload  q quit";

/// Root application state - single source of truth
///
/// All state changes happen through the reducer. Widgets receive slices of
/// this state when drawing.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Windowing engine plus the scroll container it drives
    pub calendar: CalendarState,

    /// Journal data (from the provider)
    pub journals: JournalState,

    pub ui: UiState,

    pub system: SystemState,
}

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub engine: CalendarEngine,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Default)]
pub struct JournalState {
    pub book: Arc<JournalBook>,
    pub source: String,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub selected: NaiveDate,
    /// Text typed into the jump prompt, when open
    pub prompt: Option<String>,
    pub modal: Option<ModalState>,
}

/// Detail view over [`JournalBook::ordered`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalState {
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct SystemState {
    pub config: Config,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Time of the last tick
    pub clock: Instant,
}

impl AppState {
    pub fn new(today: NaiveDate, config: Config) -> Self {
        let engine = CalendarEngine::new(today, config.engine_config());
        Self {
            calendar: CalendarState {
                engine,
                viewport: Viewport::default(),
            },
            journals: JournalState::default(),
            ui: UiState {
                selected: today,
                prompt: None,
                modal: None,
            },
            system: SystemState {
                config,
                status_message: Some(DEFAULT_STATUS_MESSAGE.to_string()),
                status_is_error: false,
                clock: Instant::now(),
            },
        }
    }

    /// Journal shown by the open modal
    pub fn modal_entry(&self) -> Option<&JournalEntry> {
        let modal = self.ui.modal?;
        self.journals.book.ordered().get(modal.index)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive(), Config::default())
    }
}

impl SystemState {
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    pub fn set_status_error_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    pub fn reset_status_message(&mut self) {
        self.status_message = Some(DEFAULT_STATUS_MESSAGE.to_string());
        self.status_is_error = false;
    }
}
