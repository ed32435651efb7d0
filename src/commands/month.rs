use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

use crate::calendar::{DayGenerator, MonthYear};
use crate::config::Config;
use crate::dates::{add_days, start_of_week, weekday_labels, DAYS_PER_WEEK};
use crate::formatting::{format_header, format_stars};
use crate::journal::{load_book, JournalBook, JournalProvider};

const CELL_WIDTH: usize = 5;

/// First and last day of the month containing `date`
fn month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let first = date.with_day(1)?;
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    Some((first, add_days(next_month, -1)))
}

/// Plain-text month grid
///
/// Each cell is the day number followed by two markers: the filled star when
/// the day has a journal and `<` for today. Journals of the month are listed
/// under the grid.
pub fn format_month(
    date: NaiveDate,
    today: NaiveDate,
    week_starts_on: u8,
    book: &JournalBook,
    config: &Config,
) -> String {
    let display = &config.display;
    let box_chars = display.box_chars();
    let Some((first, last)) = month_bounds(date) else {
        return String::new();
    };

    let mut output = format_header(&MonthYear::of(first).to_string(), true, display);

    let labels: String = weekday_labels(week_starts_on)
        .iter()
        .map(|label| format!("{:>3}  ", label))
        .collect();
    output.push_str(labels.trim_end());
    output.push('\n');

    let grid_start = start_of_week(first, week_starts_on);
    let generator = DayGenerator::new(today);
    let days = generator.generate_between(grid_start, last);

    for week in days.chunks(DAYS_PER_WEEK as usize) {
        let mut line = String::new();
        for day in week {
            if day.date < first {
                line.push_str(&" ".repeat(CELL_WIDTH));
                continue;
            }
            let journal_mark = if book.lookup_date(day.date).is_some() {
                box_chars.star_filled.as_str()
            } else {
                " "
            };
            let today_mark = if day.is_today { "<" } else { " " };
            line.push_str(&format!("{:>3}{}{}", day.day_number, journal_mark, today_mark));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    let in_month: Vec<_> = book
        .ordered()
        .iter()
        .filter(|entry| entry.date >= first && entry.date <= last)
        .collect();
    if !in_month.is_empty() {
        output.push('\n');
        for entry in in_month {
            output.push_str(&format!(
                "{:>3} {}  {}\n",
                entry.date.day(),
                format_stars(entry.stars(), &box_chars),
                entry.journal.categories.join(", ")
            ));
        }
    }

    output
}

pub async fn run(
    provider: &dyn JournalProvider,
    date: Option<String>,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    let date = super::parse_date_arg(date.as_deref(), today)?;
    let book = load_book(provider)
        .await
        .with_context(|| format!("Failed to load journals from {}", provider.describe()))?;

    print!("{}", format_month(date, today, config.week_starts_on, &book, config));
    Ok(())
}
