/// MonthHeader widget - month title and weekday labels above the grid
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::RenderableWidget;
use crate::calendar::MonthYear;
use crate::config::DisplayConfig;
use crate::dates::{iso_key, weekday_labels};
use crate::tui::layout::cell_width;

#[derive(Debug, Clone, Copy)]
pub struct MonthHeader {
    pub header: MonthYear,
    pub today: NaiveDate,
    pub week_starts_on: u8,
}

impl RenderableWidget for MonthHeader {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = format!(" {}", self.header);
        let title_style = Style::default().fg(config.header_fg).add_modifier(Modifier::BOLD);
        buf.set_stringn(area.x, area.y, &title, area.width as usize, title_style);

        let today = format!("Today: {} ", iso_key(self.today));
        let today_width = today.chars().count() as u16;
        if area.width > title.chars().count() as u16 + today_width {
            let x = area.right() - today_width;
            buf.set_string(x, area.y, &today, Style::default().fg(config.today_fg));
        }

        if area.height < 2 {
            return;
        }
        let cell_w = cell_width(area.width);
        let label_style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
        for (column, label) in weekday_labels(self.week_starts_on).iter().enumerate() {
            // Labels sit over the two digit columns of each day cell
            let x = area.x + column as u16 * cell_w + 1;
            if x >= area.right() {
                break;
            }
            let width = usize::from(area.right() - x);
            buf.set_stringn(x, area.y + 1, label, width, label_style);
        }
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2)
    }
}
