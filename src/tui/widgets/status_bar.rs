/// StatusBar widget - displays status information at the bottom of the screen
///
/// This widget renders a two-line status bar with:
/// - Top line: horizontal separator with connector aligned to the vertical bar
/// - Bottom line: left status message, error or go-to prompt │ right journal summary
///
/// Error messages are displayed with the error color when present.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::config::DisplayConfig;
use crate::tui::widgets::RenderableWidget;

const PROMPT_LABEL: &str = "Go to date: ";

/// Widget for displaying the status line and journal summary
#[derive(Debug, Default)]
pub struct StatusBar {
    /// Message on the left side
    pub message: Option<String>,
    pub is_error: bool,
    /// Input of the go-to prompt; replaces the message while open
    pub prompt: Option<String>,
    /// Text right of the vertical bar
    pub right_text: String,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a status message (non-error)
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self.is_error = false;
        self
    }

    /// Set an error message
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.message = Some(error.into());
        self.is_error = true;
        self
    }

    pub fn with_prompt(mut self, input: Option<String>) -> Self {
        self.prompt = input;
        self
    }

    pub fn with_right_text(mut self, text: impl Into<String>) -> Self {
        self.right_text = text.into();
        self
    }

    /// Build the left side text and its style
    fn build_left_text(&self, config: &DisplayConfig) -> (String, Style) {
        if let Some(input) = &self.prompt {
            let style = Style::default().fg(config.selection_fg).add_modifier(Modifier::BOLD);
            return (format!("{}{}_", PROMPT_LABEL, input), style);
        }
        match &self.message {
            Some(msg) if self.is_error => {
                (format!("ERROR: {}", msg), Style::default().fg(config.error_fg))
            }
            Some(msg) => (msg.clone(), Style::default()),
            None => (String::new(), Style::default()),
        }
    }

    /// Build the top separator line with connector
    fn build_separator_line(&self, area_width: usize, bar_position: u16, config: &DisplayConfig) -> String {
        let box_chars = config.box_chars();
        let left_part = box_chars.horizontal.repeat(bar_position as usize);
        let right_part = box_chars
            .horizontal
            .repeat(area_width.saturating_sub(bar_position as usize + 1));
        format!("{}{}{}", left_part, box_chars.connector3, right_part)
    }
}

impl RenderableWidget for StatusBar {
    fn render(&self, area: Rect, buf: &mut Buffer, config: &DisplayConfig) {
        if area.width == 0 || area.height < 2 {
            return;
        }

        // Layout: [space] [left content] [padding] │ [space] [right_text] [space]
        let right_width = self.right_text.chars().count() as u16 + 3;
        let bar_position = area.width.saturating_sub(right_width);

        let separator_line = self.build_separator_line(area.width as usize, bar_position, config);
        buf.set_stringn(area.x, area.y, &separator_line, area.width as usize, Style::default());

        let y = area.y + 1;
        let (left_text, left_style) = self.build_left_text(config);
        if !left_text.is_empty() && bar_position > 1 {
            buf.set_stringn(
                area.x + 1,
                y,
                &left_text,
                usize::from(bar_position - 1),
                left_style,
            );
        }

        let right = format!(" {} ", self.right_text);
        let x = area.x + bar_position;
        let (x, _) = buf.set_stringn(x, y, &config.box_chars().vertical, 1, Style::default());
        let remaining = area.right().saturating_sub(x);
        buf.set_stringn(x, y, &right, usize::from(remaining), Style::default());
    }

    fn preferred_height(&self) -> Option<u16> {
        Some(2) // Separator line + status line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::buffer_lines;
    use crate::tui::widgets::testing::*;

    #[test]
    fn test_status_bar_message_and_summary() {
        let widget = StatusBar::new()
            .with_message("hello")
            .with_right_text("3 journals");
        let buf = render_widget(&widget, 40, 2);
        let lines = buffer_lines(&buf);

        assert_eq!(lines[0], "-".repeat(40));
        assert_eq!(lines[1], format!(" hello{}| 3 journals ", " ".repeat(21)));
    }

    #[test]
    fn test_status_bar_connector_alignment() {
        let widget = StatusBar::new().with_right_text("3 journals");
        let buf = render_widget_with_config(&widget, 40, 2, &test_config());

        assert_eq!(buf[(27, 0)].symbol(), "┬");
        assert_eq!(buf[(27, 1)].symbol(), "│");
        assert_eq!(buf[(26, 0)].symbol(), "─");
    }

    #[test]
    fn test_status_bar_error_message() {
        let config = test_config();
        let widget = StatusBar::new().with_error("Network timeout");
        let buf = render_widget_with_config(&widget, 60, 2, &config);
        let lines = buffer_lines(&buf);

        assert!(lines[1].starts_with(" ERROR: Network timeout"));
        assert_eq!(buf[(1, 1)].fg, config.error_fg);
    }

    #[test]
    fn test_status_bar_prompt_replaces_message() {
        let widget = StatusBar::new()
            .with_message("hello")
            .with_prompt(Some("2024-0".to_string()));
        let lines = buffer_lines(&render_widget(&widget, 60, 2));

        assert!(lines[1].starts_with(" Go to date: 2024-0_"));
        assert!(!lines[1].contains("hello"));
    }

    #[test]
    fn test_status_bar_truncates_long_message() {
        let widget = StatusBar::new()
            .with_message("a".repeat(100))
            .with_right_text("ok");
        let lines = buffer_lines(&render_widget(&widget, 20, 2));

        assert_eq!(lines[1], format!(" {}| ok ", "a".repeat(14)));
    }

    #[test]
    fn test_status_bar_zero_height() {
        let widget = StatusBar::new();
        let buf = render_widget(&widget, 80, 0);

        // Should not panic with zero height
        assert_eq!(buf.area.height, 0);
    }

    #[test]
    fn test_status_bar_small_area() {
        let widget = StatusBar::new().with_message("status").with_right_text("long summary text");
        let buf = render_widget(&widget, 10, 2);

        assert_eq!(buf.area.width, 10);
        assert!(buffer_lines(&buf)[1].starts_with("| long"));
    }

    #[test]
    fn test_status_bar_preferred_height() {
        assert_eq!(StatusBar::new().preferred_height(), Some(2));
    }
}
