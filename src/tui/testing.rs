//! General test utilities for TUI tests.
//!
//! For widget-specific rendering helpers, see `crate::tui::widgets::testing`.

use chrono::NaiveDate;
use ratatui::buffer::Buffer;

use super::action::Action;
use super::reducer::reduce;
use super::state::AppState;
use crate::config::Config;
use crate::journal::{Journal, JournalBook};

/// Grid viewport height used by state helpers
pub const VIEWPORT_LINES: u16 = 24;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Three journals in June 2024; the middle one falls on 2024-06-15
pub fn sample_book() -> JournalBook {
    let journal = |date: &str, rating: f32, category: &str| Journal {
        img_url: format!("https://images.example.com/{}.jpg", date.replace('/', "-")),
        rating,
        categories: vec![category.to_string()],
        date: date.to_string(),
        description: format!("Entry written on {}", date),
    };
    JournalBook::from_journals(vec![
        journal("10/06/2024", 3.0, "Work"),
        journal("15/06/2024", 4.0, "Travel"),
        journal("20/06/2024", 5.0, "Friends"),
    ])
}

/// State whose calendar was initialized by a first resize
pub fn initialized_state_at(today: NaiveDate) -> AppState {
    let state = AppState::new(today, Config::default());
    let (state, _) = reduce(state, Action::Resize(VIEWPORT_LINES));
    state
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}
