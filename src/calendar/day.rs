use chrono::{Datelike, NaiveDate};

use crate::dates::{add_days, iso_key};

/// One calendar date in the scrolling window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day of month, 1-31
    pub day_number: u32,
    /// Zero-based month, 0-11
    pub month: u32,
    pub year: i32,
    pub is_today: bool,
}

impl CalendarDay {
    /// `YYYY-MM-DD` key of this day
    pub fn key(&self) -> String {
        iso_key(self.date)
    }

    pub fn month_year(&self) -> MonthYear {
        MonthYear {
            month: self.month,
            year: self.year,
        }
    }
}

/// Month/year pair shown in the calendar header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthYear {
    /// Zero-based month, 0-11
    pub month: u32,
    pub year: i32,
}

impl MonthYear {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", crate::dates::month_name(self.month), self.year)
    }
}

/// Produces runs of consecutive days
///
/// The generator only remembers the session's "today" so it can flag the
/// matching record.
#[derive(Debug, Clone)]
pub struct DayGenerator {
    today_key: String,
}

impl DayGenerator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today_key: iso_key(today),
        }
    }

    /// Build a single record for `date`
    pub fn day(&self, date: NaiveDate) -> CalendarDay {
        CalendarDay {
            date,
            day_number: date.day(),
            month: date.month0(),
            year: date.year(),
            is_today: iso_key(date) == self.today_key,
        }
    }

    /// `count` consecutive days beginning at `start`
    pub fn generate(&self, start: NaiveDate, count: usize) -> Vec<CalendarDay> {
        (0..count)
            .map(|offset| self.day(add_days(start, offset as i64)))
            .collect()
    }

    /// Every day in the inclusive range `first..=last` (empty when reversed)
    pub fn generate_between(&self, first: NaiveDate, last: NaiveDate) -> Vec<CalendarDay> {
        let span = (last - first).num_days();
        if span < 0 {
            return Vec::new();
        }
        self.generate(first, span as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_length_and_endpoints() {
        let generator = DayGenerator::new(date(2024, 6, 15));
        let days = generator.generate(date(2024, 2, 27), 5);

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, date(2024, 2, 27));
        assert_eq!(days[4].date, date(2024, 3, 2));
    }

    #[test]
    fn test_generate_is_contiguous() {
        let generator = DayGenerator::new(date(2024, 6, 15));
        let days = generator.generate(date(2023, 12, 1), 120);

        for pair in days.windows(2) {
            assert_eq!((pair[1].date - pair[0].date).num_days(), 1);
        }
    }

    #[test]
    fn test_generate_zero_count() {
        let generator = DayGenerator::new(date(2024, 6, 15));
        assert!(generator.generate(date(2024, 6, 15), 0).is_empty());
    }

    #[test]
    fn test_derived_fields() {
        let generator = DayGenerator::new(date(2024, 6, 15));
        let day = generator.day(date(2024, 1, 1));

        assert_eq!(day.day_number, 1);
        assert_eq!(day.month, 0);
        assert_eq!(day.year, 2024);
        assert!(!day.is_today);
        assert_eq!(day.key(), "2024-01-01");
    }

    #[test]
    fn test_only_today_is_flagged() {
        let generator = DayGenerator::new(date(2024, 6, 15));
        let days = generator.generate(date(2024, 6, 1), 30);

        let flagged: Vec<_> = days.iter().filter(|d| d.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, date(2024, 6, 15));
    }

    #[test]
    fn test_generate_between_inclusive() {
        let generator = DayGenerator::new(date(2024, 6, 15));
        let days = generator.generate_between(date(2024, 6, 1), date(2024, 6, 7));
        assert_eq!(days.len(), 7);
        assert!(generator
            .generate_between(date(2024, 6, 7), date(2024, 6, 1))
            .is_empty());
    }

    #[test]
    fn test_month_year_display() {
        let my = MonthYear::of(date(2024, 6, 15));
        assert_eq!(my, MonthYear { month: 5, year: 2024 });
        assert_eq!(my.to_string(), "June 2024");
    }
}
