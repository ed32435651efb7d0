use anyhow::{Context, Result};
use unicode_width::UnicodeWidthStr;

use crate::config::DisplayConfig;
use crate::formatting::{format_header, format_stars};
use crate::journal::{load_book, JournalBook, JournalProvider};

const DESCRIPTION_WIDTH: usize = 48;

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 4 > max_width {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Journal listing followed by the records that were skipped at load time
pub fn format_journal_list(book: &JournalBook, display: &DisplayConfig) -> String {
    let box_chars = display.box_chars();
    let mut output = format_header(&format!("Journals ({})", book.len()), true, display);

    for entry in book.ordered() {
        output.push_str(&format!(
            "{}  {}  {:<20}  {}\n",
            entry.key,
            format_stars(entry.stars(), &box_chars),
            truncate(&entry.journal.categories.join(", "), 20),
            truncate(&entry.journal.description, DESCRIPTION_WIDTH)
        ));
    }

    if !book.rejected().is_empty() {
        output.push('\n');
        output.push_str(&format_header(
            &format!("Skipped ({})", book.rejected().len()),
            false,
            display,
        ));
        for err in book.rejected() {
            output.push_str(&format!("- {}\n", err));
        }
    }

    output
}

pub async fn run(provider: &dyn JournalProvider, display: &DisplayConfig) -> Result<()> {
    let book = load_book(provider)
        .await
        .with_context(|| format!("Failed to load journals from {}", provider.describe()))?;
    print!("{}", format_journal_list(&book, display));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Journal;

    fn journal(date: &str, rating: f32, description: &str) -> Journal {
        Journal {
            img_url: "x.jpg".to_string(),
            rating,
            categories: vec!["Home".to_string()],
            date: date.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a fairly long sentence", 10), "a fairl...");
    }

    #[test]
    fn test_list_shows_entries_and_rejects() {
        let book = JournalBook::from_journals(vec![
            journal("20/06/2024", 2.0, "Quiet day"),
            journal("31/02/2024", 3.0, "Impossible"),
        ]);
        let display = DisplayConfig {
            use_unicode: false,
            ..Default::default()
        };

        let output = format_journal_list(&book, &display);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Journals (1)");
        assert!(lines[2].starts_with("2024-06-20  **...  Home"));
        assert!(lines[2].ends_with("Quiet day"));
        assert_eq!(lines[4], "Skipped (1)");
        assert!(lines[6].starts_with("- journal #1:"));
    }
}
