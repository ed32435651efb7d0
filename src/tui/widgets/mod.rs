/// Widget-based rendering for the calendar screen
///
/// Widgets render themselves directly into a ratatui Buffer from borrowed
/// slices of `AppState`, which keeps them cheap to build on every frame and
/// easy to test against a bare buffer.

#[cfg(test)]
pub mod testing;

pub mod calendar_grid;
pub use calendar_grid::CalendarGrid;

pub mod journal_modal;
pub use journal_modal::JournalModal;

pub mod month_header;
pub use month_header::MonthHeader;

pub mod status_bar;
pub use status_bar::StatusBar;

use ratatui::{buffer::Buffer, layout::Rect};

use crate::config::DisplayConfig;

/// Core trait for renderable widgets
pub trait RenderableWidget {
    /// Render this widget into the provided buffer
    ///
    /// # Arguments
    ///
    /// * `area` - The rectangular area to render into
    /// * `buf` - The buffer to write to
    /// * `config` - Display configuration (colors, unicode or ASCII glyphs)
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig);

    /// Get the preferred height of this widget
    ///
    /// Returns None if the widget can adapt to any height.
    fn preferred_height(&self) -> Option<u16> {
        None
    }
}
