/// JournalModal widget - centered popup showing one journal
///
/// Features:
/// - Clear background behind modal
/// - Border with selection color and an `i/N` position title
/// - Wrapped description
/// - Previous/next hints, dimmed at either end
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::RenderableWidget;
use crate::config::DisplayConfig;
use crate::formatting::format_stars;
use crate::journal::JournalEntry;

const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y";

pub struct JournalModal<'a> {
    /// Journals in date order
    pub entries: &'a [JournalEntry],
    pub index: usize,
}

impl JournalModal<'_> {
    fn body_lines(&self, entry: &JournalEntry, config: &DisplayConfig) -> Vec<Line<'static>> {
        let box_chars = config.box_chars();
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    entry.date.format(LONG_DATE_FORMAT).to_string(),
                    Style::default().fg(config.header_fg).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format_stars(entry.stars(), &box_chars),
                    Style::default().fg(config.journal_fg),
                ),
            ]),
            Line::default(),
            Line::from(entry.journal.description.clone()),
            Line::default(),
        ];
        if !entry.journal.categories.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Categories: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    entry.journal.categories.join(", "),
                    Style::default().fg(config.journal_fg),
                ),
            ]));
        }
        if !entry.journal.img_url.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Image: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    entry.journal.img_url.clone(),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
        lines
    }

    fn render_hints(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let box_chars = config.box_chars();
        let active = Style::default().fg(config.selection_fg);
        let inactive = Style::default().fg(Color::DarkGray);

        let prev = format!("{} prev", box_chars.prev);
        let prev_style = if self.index > 0 { active } else { inactive };
        buf.set_stringn(area.x, area.y, &prev, area.width as usize, prev_style);

        let next = format!("next {}", box_chars.next);
        let next_width = next.chars().count() as u16;
        if area.width > prev.chars().count() as u16 + next_width {
            let next_style = if self.index + 1 < self.entries.len() {
                active
            } else {
                inactive
            };
            buf.set_string(area.right() - next_width, area.y, &next, next_style);
        }
    }
}

impl RenderableWidget for JournalModal<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        let Some(entry) = self.entries.get(self.index) else {
            return;
        };
        if area.width < 3 || area.height < 3 {
            return;
        }

        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(config.selection_fg))
            .title(format!(" {}/{} ", self.index + 1, self.entries.len()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }
        let body = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        Paragraph::new(self.body_lines(entry, config))
            .wrap(Wrap { trim: true })
            .render(body, buf);

        let hints = Rect {
            y: inner.bottom() - 1,
            height: 1,
            ..inner
        };
        self.render_hints(hints, buf, config);
    }
}
