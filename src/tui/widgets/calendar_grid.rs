/// CalendarGrid widget - the scrolling week rows
///
/// Draws the windowed slice of days at their content position minus the
/// scroll offset. Rows that fall partly outside the area are clipped line by
/// line, so a fractional offset scrolls smoothly.
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use super::RenderableWidget;
use crate::calendar::{CalendarDay, MonthYear};
use crate::config::DisplayConfig;
use crate::dates::{month_name, DAYS_PER_WEEK};
use crate::formatting::format_stars;
use crate::journal::JournalBook;
use crate::tui::layout::cell_width;

pub struct CalendarGrid<'a> {
    /// Days to draw, starting on a row boundary
    pub days: &'a [CalendarDay],
    /// Content position of the first row (the top spacer height)
    pub first_row_top: u64,
    pub offset: u32,
    pub row_height: u32,
    pub selected: NaiveDate,
    /// Month in the header; other months are dimmed
    pub header: MonthYear,
    pub journals: &'a JournalBook,
}

impl CalendarGrid<'_> {
    fn label_style(&self, day: &CalendarDay, config: &DisplayConfig) -> Style {
        let mut style = Style::default();
        if day.month_year() != self.header {
            style = style.fg(Color::DarkGray);
        }
        if day.is_today {
            style = style.fg(config.today_fg).add_modifier(Modifier::BOLD);
        }
        if day.date == self.selected {
            style = style
                .fg(config.selection_fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        style
    }

    /// Content lines of one cell, before the separator line
    fn cell_lines(&self, day: &CalendarDay, config: &DisplayConfig) -> Vec<(String, Style)> {
        let box_chars = config.box_chars();
        let marker = if day.date == self.selected {
            box_chars.selector.as_str()
        } else {
            " "
        };
        let mut label = format!("{}{:>2}", marker, day.day_number);
        if day.day_number == 1 {
            let month: String = month_name(day.month).chars().take(3).collect();
            label.push(' ');
            label.push_str(&month);
        }

        let mut lines = vec![(label, self.label_style(day, config))];
        if let Some(entry) = self.journals.lookup_date(day.date) {
            let journal_style = Style::default().fg(config.journal_fg);
            lines.push((format_stars(entry.stars(), &box_chars), journal_style));
            if let Some(category) = entry.journal.categories.first() {
                lines.push((format!(" {}", category), journal_style.add_modifier(Modifier::DIM)));
            }
        }
        lines
    }
}

impl RenderableWidget for CalendarGrid<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height == 0 || self.row_height == 0 {
            return;
        }
        let box_chars = config.box_chars();
        let cell_w = cell_width(area.width);
        let text_w = if cell_w > 1 { cell_w - 1 } else { cell_w };
        let row_height = i64::from(self.row_height);
        let content_lines = if self.row_height > 1 { row_height - 1 } else { 1 };
        let border_style = Style::default().fg(Color::DarkGray);
        let separator = format!(
            "{}{}",
            box_chars.horizontal.repeat(usize::from(text_w)),
            box_chars.cross
        );

        let first_top = self.first_row_top as i64 - i64::from(self.offset);
        for (row, week) in self.days.chunks(DAYS_PER_WEEK as usize).enumerate() {
            let row_y = first_top + row as i64 * row_height;
            if row_y >= i64::from(area.height) {
                break;
            }
            if row_y + row_height <= 0 {
                continue;
            }

            for (column, day) in week.iter().enumerate() {
                let x = area.x + column as u16 * cell_w;
                if x >= area.right() {
                    break;
                }
                let lines = self.cell_lines(day, config);

                for line in 0..row_height {
                    let y = row_y + line;
                    if y < 0 || y >= i64::from(area.height) {
                        continue;
                    }
                    let y = area.y + y as u16;

                    if line == row_height - 1 && self.row_height > 1 {
                        buf.set_stringn(x, y, &separator, usize::from(cell_w), border_style);
                        continue;
                    }
                    if line < content_lines {
                        if let Some((text, style)) = lines.get(line as usize) {
                            buf.set_stringn(x, y, text, usize::from(text_w), *style);
                        }
                    }
                    if cell_w > 1 {
                        buf.set_string(x + text_w, y, &box_chars.vertical, border_style);
                    }
                }
            }
        }
    }
}
