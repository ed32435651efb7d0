pub mod calendar;
pub mod commands;
pub mod config;
pub mod dates;
pub mod formatting;
pub mod journal;
pub mod tui;
