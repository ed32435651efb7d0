use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use ratatui::style::Color;

use crate::calendar::{EngineConfig, GridLayout};
use crate::formatting::BoxChars;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    /// JSON file with journal records (bundled sample when unset)
    pub journals_file: Option<String>,
    /// First day of the week, 0 = Sunday
    pub week_starts_on: u8,
    pub calendar: CalendarConfig,
    pub display: DisplayConfig,
}

/// Windowing parameters, in terminal lines where a size is involved
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub row_height: u32,
    pub buffer_rows: u32,
    pub buffer_days: usize,
    pub edge_threshold: u32,
    pub throttle_ms: u64,
    pub jump_cooldown_ms: u64,
    pub initial_weeks: usize,
    pub lead_weeks: usize,
    pub max_days: Option<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub use_unicode: bool,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    pub unfocused_selection_fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_color")]
    pub today_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub journal_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub header_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub error_fg: Color,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            journals_file: None,
            week_starts_on: 0,
            calendar: CalendarConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            row_height: 4,
            buffer_rows: 4,
            buffer_days: 182,
            edge_threshold: 8,
            throttle_ms: 16,
            jump_cooldown_ms: 1000,
            initial_weeks: 12,
            lead_weeks: 4,
            max_days: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            use_unicode: true,
            selection_fg: Color::Rgb(255, 165, 0), // Orange
            unfocused_selection_fg: None,
            today_fg: Color::Rgb(0, 200, 255),
            journal_fg: Color::Rgb(159, 226, 191), // Seafoam
            header_fg: Color::White,
            error_fg: Color::Red,
        }
    }
}

impl Config {
    /// Engine parameters for this configuration
    pub fn engine_config(&self) -> EngineConfig {
        let calendar = &self.calendar;
        EngineConfig {
            layout: GridLayout {
                row_height: calendar.row_height.max(1),
                buffer_rows: calendar.buffer_rows,
                edge_threshold: calendar.edge_threshold,
            },
            week_starts_on: self.week_starts_on % 7,
            buffer_days: calendar.buffer_days.max(1),
            initial_weeks: calendar.initial_weeks.max(1),
            lead_weeks: calendar.lead_weeks,
            throttle: Duration::from_millis(calendar.throttle_ms),
            jump_cooldown: Duration::from_millis(calendar.jump_cooldown_ms),
            max_days: calendar.max_days,
        }
    }
}

impl DisplayConfig {
    /// Get the unfocused selection color, calculating 50% darker if not explicitly set
    pub fn unfocused_selection_fg(&self) -> Color {
        self.unfocused_selection_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }

    pub fn box_chars(&self) -> BoxChars {
        BoxChars::from_use_unicode(self.use_unicode)
    }
}

/// Darken a color by a given factor (0.0 = black, 1.0 = original)
fn darken_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let r = (r as f32 * factor) as u8;
            let g = (g as f32 * factor) as u8;
            let b = (b as f32 * factor) as u8;
            Color::Rgb(r, g, b)
        }
        // Named colors have no RGB value to scale
        other => other,
    }
}

/// Deserialize a color from a string (supports named colors, RGB hex, or RGB tuple)
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", s)))
}

/// Deserialize an optional color from a string
fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(color_str) => {
            let color = parse_color(&color_str)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", color_str)))?;
            Ok(Some(color))
        }
        None => Ok(None),
    }
}

/// Parse a color string into a ratatui Color
/// Supports:
/// - Named colors: "red", "blue", "cyan", "orange", etc.
/// - Hex colors: "#FF6600", "#f60"
/// - RGB tuples: "255,165,0"
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "black" => return Some(Color::Black),
        "red" => return Some(Color::Red),
        "green" => return Some(Color::Green),
        "yellow" => return Some(Color::Yellow),
        "blue" => return Some(Color::Blue),
        "magenta" => return Some(Color::Magenta),
        "cyan" => return Some(Color::Cyan),
        "gray" | "grey" => return Some(Color::Gray),
        "darkgray" | "darkgrey" => return Some(Color::DarkGray),
        "lightred" => return Some(Color::LightRed),
        "lightgreen" => return Some(Color::LightGreen),
        "lightyellow" => return Some(Color::LightYellow),
        "lightblue" => return Some(Color::LightBlue),
        "lightmagenta" => return Some(Color::LightMagenta),
        "lightcyan" => return Some(Color::LightCyan),
        "white" => return Some(Color::White),
        "orange" => return Some(Color::Rgb(255, 165, 0)),
        _ => {}
    }

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        } else if hex.len() == 3 {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    if s.contains(',') {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() == 3 {
            let r = parts[0].trim().parse::<u8>().ok()?;
            let g = parts[1].trim().parse::<u8>().ok()?;
            let b = parts[2].trim().parse::<u8>().ok()?;
            return Some(Color::Rgb(r, g, b));
        }
    }

    None
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

pub fn read() -> Config {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return Config::default(),
    };

    if !config_path.exists() {
        return Config::default();
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("CONFIG: failed to read {}: {}", config_path.display(), e);
            return Config::default();
        }
    };

    parse(&content)
}

/// Parse config file contents, falling back to defaults on error
pub fn parse(content: &str) -> Config {
    toml::from_str(content).unwrap_or_else(|e| {
        tracing::warn!("CONFIG: invalid config file, using defaults: {}", e);
        Config::default()
    })
}
