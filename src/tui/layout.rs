use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::dates::DAYS_PER_WEEK;

/// Month title plus weekday labels
pub const HEADER_LINES: u16 = 2;
/// Separator plus message line
pub const STATUS_LINES: u16 = 2;

const MODAL_MAX_WIDTH: u16 = 64;
const MODAL_MAX_HEIGHT: u16 = 16;

/// Screen regions, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub grid: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [header, grid, status] = Layout::vertical([
            Constraint::Length(HEADER_LINES),
            Constraint::Min(0),
            Constraint::Length(STATUS_LINES),
        ])
        .areas(area);
        Self { header, grid, status }
    }
}

/// Width of one day column
pub fn cell_width(width: u16) -> u16 {
    (width / DAYS_PER_WEEK as u16).max(1)
}

/// Day column and grid line under a terminal position
pub fn grid_hit(grid: Rect, x: u16, y: u16) -> Option<(usize, u16)> {
    if !grid.contains(Position { x, y }) {
        return None;
    }
    let column = usize::from((x - grid.x) / cell_width(grid.width));
    (column < DAYS_PER_WEEK as usize).then_some((column, y - grid.y))
}

/// Centered rectangle for the journal modal
pub fn modal_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
    let height = area.height.saturating_sub(2).min(MODAL_MAX_HEIGHT);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
