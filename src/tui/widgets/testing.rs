/// Testing utilities for widget rendering

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

use super::RenderableWidget;
use crate::config::DisplayConfig;

/// DisplayConfig with unicode glyphs and fixed colors
pub fn test_config() -> DisplayConfig {
    DisplayConfig {
        use_unicode: true,
        selection_fg: Color::Rgb(255, 200, 0), // Gold
        unfocused_selection_fg: None,
        today_fg: Color::Cyan,
        journal_fg: Color::Rgb(159, 226, 191), // Seafoam
        header_fg: Color::White,
        error_fg: Color::Red,
    }
}

/// DisplayConfig with ASCII glyphs, for predictable output
pub fn test_config_ascii() -> DisplayConfig {
    DisplayConfig {
        use_unicode: false,
        ..test_config()
    }
}

/// Render a widget to a fresh buffer
pub fn render_widget_with_config(
    widget: &impl RenderableWidget,
    width: u16,
    height: u16,
    config: &DisplayConfig,
) -> Buffer {
    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(buf.area, &mut buf, config);
    buf
}

/// Render a widget with the ASCII test config
pub fn render_widget(widget: &impl RenderableWidget, width: u16, height: u16) -> Buffer {
    render_widget_with_config(widget, width, height, &test_config_ascii())
}
