//! Virtualized infinite-scroll calendar core
//!
//! Leaves first: [`day`] generates records, [`store`] keeps them,
//! [`tracker`] measures a scroll position against them, and [`engine`]
//! ties the three together with extension and jump-to-date logic.

pub mod day;
pub mod engine;
pub mod error;
pub mod store;
pub mod tracker;


pub use day::{CalendarDay, DayGenerator, MonthYear};
pub use engine::{
    CalendarEngine, EngineConfig, EngineStats, Phase, ScrollCommand, ScrollOutcome, SkipReason,
};
pub use error::{CalendarError, CalendarResult};
pub use store::{DayStore, Edge};
pub use tracker::{window_for, EdgeSignals, GridLayout, ScrollMetrics, Throttle, WindowFrame};
