//! Windowed day store
//!
//! Holds every generated day keyed by date. Merges are first-writer-wins, so
//! re-generating a date keeps the record created at session start (and its
//! `is_today` flag). The sorted snapshot is rebuilt after each mutation so the
//! tracker can index rows directly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::day::CalendarDay;
use crate::dates::DAYS_PER_WEEK;

/// Side of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Default)]
pub struct DayStore {
    days: BTreeMap<NaiveDate, CalendarDay>,
    sorted: Vec<CalendarDay>,
    /// Upper bound on stored days (None = grow without limit)
    max_days: Option<usize>,
}

impl DayStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that evicts whole weeks once it holds more than `max_days`
    ///
    /// The cap is rounded up to whole weeks.
    pub fn with_max_days(max_days: usize) -> Self {
        let weeks = max_days.div_ceil(DAYS_PER_WEEK as usize).max(1);
        Self {
            max_days: Some(weeks * DAYS_PER_WEEK as usize),
            ..Self::default()
        }
    }

    /// Insert days that are not yet present; returns how many were inserted
    pub fn merge<I>(&mut self, new_days: I) -> usize
    where
        I: IntoIterator<Item = CalendarDay>,
    {
        let mut inserted = 0;
        for day in new_days {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.days.entry(day.date) {
                slot.insert(day);
                inserted += 1;
            }
        }
        if inserted > 0 {
            self.rebuild_snapshot();
        }
        trace!("STORE: merged {} new day(s), {} total", inserted, self.days.len());
        inserted
    }

    /// All days ascending by date
    pub fn sorted(&self) -> &[CalendarDay] {
        &self.sorted
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> Option<&CalendarDay> {
        self.sorted.first()
    }

    pub fn last(&self) -> Option<&CalendarDay> {
        self.sorted.last()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.get(&date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.days.contains_key(&date)
    }

    /// Index of `date` within [`sorted`](Self::sorted)
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.sorted.binary_search_by_key(&date, |day| day.date).ok()
    }

    pub fn max_days(&self) -> Option<usize> {
        self.max_days
    }

    /// Drop whole weeks from the side opposite `keep` until the cap holds
    ///
    /// Returns the number of days removed. Nothing happens for an uncapped store.
    pub fn evict_far_side(&mut self, keep: Edge) -> usize {
        let Some(max_days) = self.max_days else {
            return 0;
        };
        let excess = self.days.len().saturating_sub(max_days);
        if excess == 0 {
            return 0;
        }

        let week = DAYS_PER_WEEK as usize;
        let to_remove = (excess.div_ceil(week) * week).min(self.days.len());
        for _ in 0..to_remove {
            let evicted = match keep {
                Edge::Bottom => self.days.pop_first(),
                Edge::Top => self.days.pop_last(),
            };
            if evicted.is_none() {
                break;
            }
        }
        self.rebuild_snapshot();
        debug!(
            "STORE: evicted {} day(s) from the {:?} side, {} remain",
            to_remove,
            match keep {
                Edge::Bottom => Edge::Top,
                Edge::Top => Edge::Bottom,
            },
            self.days.len()
        );
        to_remove
    }

    /// Remove every day
    pub fn clear(&mut self) {
        self.days.clear();
        self.sorted.clear();
    }

    fn rebuild_snapshot(&mut self) {
        self.sorted = self.days.values().copied().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::day::DayGenerator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn generator() -> DayGenerator {
        DayGenerator::new(date(2024, 6, 15))
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = DayStore::new();
        assert!(store.is_empty());
        assert!(store.sorted().is_empty());
        assert!(store.first().is_none());
    }

    #[test]
    fn test_merge_counts_distinct_keys() {
        let mut store = DayStore::new();
        let g = generator();

        assert_eq!(store.merge(g.generate(date(2024, 6, 1), 10)), 10);
        // Overlaps 5 existing days
        assert_eq!(store.merge(g.generate(date(2024, 6, 6), 10)), 5);
        assert_eq!(store.len(), 15);
    }

    #[test]
    fn test_merge_first_writer_wins() {
        let mut store = DayStore::new();
        let today = date(2024, 6, 15);
        store.merge(DayGenerator::new(today).generate(today, 1));

        // A later generator with a different "today" must not clear the flag
        store.merge(DayGenerator::new(date(2030, 1, 1)).generate(today, 1));

        assert!(store.get(today).unwrap().is_today);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sorted_after_out_of_order_merges() {
        let mut store = DayStore::new();
        let g = generator();

        store.merge(g.generate(date(2024, 6, 9), 21));
        // Append run
        store.merge(g.generate(date(2024, 6, 30), 14));
        // Prepend run
        store.merge(g.generate(date(2024, 5, 12), 28));

        let sorted = store.sorted();
        assert_eq!(sorted.len(), 63);
        assert!(sorted.windows(2).all(|p| p[0].date < p[1].date));
        assert_eq!(sorted[0].date, date(2024, 5, 12));
        assert_eq!(store.last().unwrap().date, date(2024, 7, 13));
    }

    #[test]
    fn test_position() {
        let mut store = DayStore::new();
        store.merge(generator().generate(date(2024, 6, 9), 21));

        assert_eq!(store.position(date(2024, 6, 9)), Some(0));
        assert_eq!(store.position(date(2024, 6, 15)), Some(6));
        assert_eq!(store.position(date(2024, 8, 1)), None);
    }

    #[test]
    fn test_uncapped_store_never_evicts() {
        let mut store = DayStore::new();
        store.merge(generator().generate(date(2024, 1, 7), 700));
        assert_eq!(store.evict_far_side(Edge::Top), 0);
        assert_eq!(store.len(), 700);
    }

    #[test]
    fn test_evict_far_side_whole_weeks() {
        let mut store = DayStore::with_max_days(20);
        assert_eq!(store.max_days(), Some(21));
        store.merge(generator().generate(date(2024, 6, 2), 35));

        // Growing at the bottom drops the oldest weeks
        let removed = store.evict_far_side(Edge::Bottom);
        assert_eq!(removed, 14);
        assert_eq!(store.len(), 21);
        assert_eq!(store.first().unwrap().date, date(2024, 6, 16));
    }

    #[test]
    fn test_evict_keeps_top() {
        let mut store = DayStore::with_max_days(14);
        store.merge(generator().generate(date(2024, 6, 2), 28));

        assert_eq!(store.evict_far_side(Edge::Top), 14);
        assert_eq!(store.first().unwrap().date, date(2024, 6, 2));
        assert_eq!(store.last().unwrap().date, date(2024, 6, 15));
    }
}
