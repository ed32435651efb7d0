use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the windowing engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Generation ran but the target never showed up in the store
    #[error("{target} still missing from the calendar after {attempts} generation attempt(s)")]
    GenerationInvariant { target: NaiveDate, attempts: usize },

    #[error("calendar is extending its window, try again")]
    Busy,
}

pub type CalendarResult<T> = Result<T, CalendarError>;
