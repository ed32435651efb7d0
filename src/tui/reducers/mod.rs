pub mod calendar;
pub mod journals;
pub mod modal;
pub mod prompt;

pub use calendar::reduce_calendar;
pub use journals::reduce_journals;
pub use modal::reduce_modal;
pub use prompt::reduce_prompt;
