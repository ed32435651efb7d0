use crate::config::DisplayConfig;
use crate::journal::MAX_RATING;

/// Box-drawing and marker characters for grid borders and ratings
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChars {
    pub horizontal: String,
    pub double_horizontal: String,
    pub vertical: String,
    pub cross: String,
    pub connector3: String,
    pub selector: String,
    pub star_filled: String,
    pub star_empty: String,
    pub prev: String,
    pub next: String,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            horizontal: "─".to_string(),
            double_horizontal: "═".to_string(),
            vertical: "│".to_string(),
            cross: "┼".to_string(),
            connector3: "┬".to_string(),
            selector: "►".to_string(),
            star_filled: "★".to_string(),
            star_empty: "☆".to_string(),
            prev: "◄".to_string(),
            next: "►".to_string(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: "-".to_string(),
            double_horizontal: "=".to_string(),
            vertical: "|".to_string(),
            cross: "+".to_string(),
            connector3: "-".to_string(),
            selector: ">".to_string(),
            star_filled: "*".to_string(),
            star_empty: ".".to_string(),
            prev: "<".to_string(),
            next: ">".to_string(),
        }
    }

    pub fn from_use_unicode(use_unicode: bool) -> Self {
        if use_unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Format a header with text and underline
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses double-line (═/=), otherwise single-line (─/-)
/// * `display` - Display configuration to determine unicode vs ASCII
pub fn format_header(text: &str, double_line: bool, display: &DisplayConfig) -> String {
    let box_chars = display.box_chars();
    let separator_char = if double_line {
        &box_chars.double_horizontal
    } else {
        &box_chars.horizontal
    };
    format!("{}\n{}\n", text, separator_char.repeat(text.chars().count()))
}

/// Five-slot rating strip, e.g. `★★★☆☆`
pub fn format_stars(filled: usize, box_chars: &BoxChars) -> String {
    let slots = MAX_RATING as usize;
    let filled = filled.min(slots);
    format!(
        "{}{}",
        box_chars.star_filled.repeat(filled),
        box_chars.star_empty.repeat(slots - filled)
    )
}
