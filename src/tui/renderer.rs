use ratatui::{buffer::Buffer, layout::Rect};

use super::layout::{modal_area, ScreenLayout};
use super::state::AppState;
use super::widgets::{CalendarGrid, JournalModal, MonthHeader, RenderableWidget, StatusBar};
use crate::calendar::window_for;

/// Renders the whole screen from the current state
///
/// The grid slice is measured against the viewport at draw time, so drawn
/// rows always match the offset even while the engine ignores scroll events.
pub fn render(state: &AppState, area: Rect, buf: &mut Buffer) {
    let config = &state.system.config.display;
    let layout = ScreenLayout::new(area);
    let engine = &state.calendar.engine;

    MonthHeader {
        header: engine.header(),
        today: engine.today(),
        week_starts_on: engine.config().week_starts_on,
    }
    .render(layout.header, buf, config);

    let days = engine.days();
    let frame = window_for(state.calendar.viewport.metrics(), engine.layout(), days);
    let end = frame.range.end.min(days.len());
    let start = frame.range.start.min(end);
    CalendarGrid {
        days: &days[start..end],
        first_row_top: frame.top_spacer,
        offset: state.calendar.viewport.offset,
        row_height: engine.layout().row_height,
        selected: state.ui.selected,
        header: engine.header(),
        journals: &state.journals.book,
    }
    .render(layout.grid, buf, config);

    status_bar(state).render(layout.status, buf, config);

    if let Some(modal) = state.ui.modal {
        JournalModal {
            entries: state.journals.book.ordered(),
            index: modal.index,
        }
        .render(modal_area(area), buf, config);
    }
}

fn status_bar(state: &AppState) -> StatusBar {
    let right_text = if state.journals.loading {
        "Loading journals...".to_string()
    } else {
        match state.journals.book.len() {
            1 => "1 journal".to_string(),
            n => format!("{} journals", n),
        }
    };

    let bar = StatusBar::new()
        .with_prompt(state.ui.prompt.clone())
        .with_right_text(right_text);
    match &state.system.status_message {
        Some(message) if state.system.status_is_error => bar.with_error(message.clone()),
        Some(message) => bar.with_message(message.clone()),
        None => bar,
    }
}
