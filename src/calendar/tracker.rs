//! Scroll-position tracker
//!
//! Turns a scroll offset and viewport height into the slice of days to render,
//! the header month/year, and the edge signals that drive window extension.
//! Everything here is a pure function of its inputs; rate limiting lives in
//! [`Throttle`] so callers decide when a measurement is taken.

use std::ops::Range;
use std::time::{Duration, Instant};

use super::day::{CalendarDay, MonthYear};
use crate::dates::DAYS_PER_WEEK;

/// Column sampled when picking the header day (mid-week)
pub const HEADER_SAMPLE_COLUMN: usize = 3;

/// Fixed geometry of the calendar grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Height of one week row in scroll units
    pub row_height: u32,
    /// Rows rendered beyond each edge of the viewport
    pub buffer_rows: u32,
    /// Distance from either end that triggers extension
    pub edge_threshold: u32,
}

impl GridLayout {
    pub fn columns(&self) -> usize {
        DAYS_PER_WEEK as usize
    }

    pub fn total_rows(&self, total_days: usize) -> usize {
        total_days.div_ceil(self.columns())
    }

    /// Scrollable height of `total_days` days
    pub fn total_height(&self, total_days: usize) -> u64 {
        self.total_rows(total_days) as u64 * u64::from(self.row_height)
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns()
    }

    /// Offset of the top of a row
    pub fn row_top(&self, row: usize) -> u64 {
        row as u64 * u64::from(self.row_height)
    }
}

/// Scroll position as reported by the host view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub offset: u32,
    pub viewport_height: u32,
}

impl ScrollMetrics {
    pub fn new(offset: u32, viewport_height: u32) -> Self {
        Self {
            offset,
            viewport_height,
        }
    }
}

/// Edge-proximity signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSignals {
    pub near_top: bool,
    pub near_bottom: bool,
}

/// Result of one measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    /// Half-open index range into the sorted days
    pub range: Range<usize>,
    /// Collapsed height above the rendered rows
    pub top_spacer: u64,
    /// Collapsed height below the rendered rows
    pub bottom_spacer: u64,
    /// Nearest representative day's month/year, if any day is under the midpoint
    pub header: Option<MonthYear>,
    pub edges: EdgeSignals,
}

impl WindowFrame {
    pub fn empty() -> Self {
        Self {
            range: 0..0,
            top_spacer: 0,
            bottom_spacer: 0,
            header: None,
            edges: EdgeSignals::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Rows `[start, end)` to render for the given position
pub fn visible_rows(metrics: ScrollMetrics, layout: &GridLayout, total_days: usize) -> Range<usize> {
    if total_days == 0 || metrics.viewport_height == 0 || layout.row_height == 0 {
        return 0..0;
    }
    let row_height = u64::from(layout.row_height);
    let offset = u64::from(metrics.offset);
    let bottom = offset + u64::from(metrics.viewport_height);
    let buffer = layout.buffer_rows as usize;
    let total_rows = layout.total_rows(total_days);

    let first = (offset / row_height) as usize;
    let last = bottom.div_ceil(row_height) as usize;

    let start = first.saturating_sub(buffer).min(total_rows);
    let end = last.saturating_add(buffer).min(total_rows);
    start..end.max(start)
}

/// Day indices `[start, end)` to render
pub fn visible_range(metrics: ScrollMetrics, layout: &GridLayout, total_days: usize) -> Range<usize> {
    let rows = visible_rows(metrics, layout, total_days);
    let columns = layout.columns();
    let start = (rows.start * columns).min(total_days);
    let end = (rows.end * columns).min(total_days);
    start..end
}

/// Index of the day used for the header
///
/// Samples the middle column of the row at the viewport midpoint. At small
/// viewport heights this can disagree with the month that covers most of the
/// screen; it is the nearest representative day, not a majority vote.
pub fn header_index(metrics: ScrollMetrics, layout: &GridLayout) -> Option<usize> {
    if layout.row_height == 0 {
        return None;
    }
    let row_height = u64::from(layout.row_height);
    let rows_visible = u64::from(metrics.viewport_height).div_ceil(row_height);
    let middle_row = u64::from(metrics.offset) / row_height + rows_visible / 2;
    usize::try_from(middle_row)
        .ok()?
        .checked_mul(layout.columns())?
        .checked_add(HEADER_SAMPLE_COLUMN)
}

pub fn header_month(
    metrics: ScrollMetrics,
    layout: &GridLayout,
    days: &[CalendarDay],
) -> Option<MonthYear> {
    header_index(metrics, layout)
        .and_then(|index| days.get(index))
        .map(CalendarDay::month_year)
}

pub fn edge_signals(metrics: ScrollMetrics, layout: &GridLayout, total_days: usize) -> EdgeSignals {
    if total_days == 0 {
        return EdgeSignals::default();
    }
    let offset = i64::from(metrics.offset);
    let threshold = i64::from(layout.edge_threshold);
    let total_height = layout.total_height(total_days) as i64;
    EdgeSignals {
        near_top: offset < threshold,
        near_bottom: offset + i64::from(metrics.viewport_height) > total_height - threshold,
    }
}

/// Measure the window for a scroll position against a sorted day slice
pub fn window_for(metrics: ScrollMetrics, layout: &GridLayout, days: &[CalendarDay]) -> WindowFrame {
    let total_days = days.len();
    let edges = edge_signals(metrics, layout, total_days);
    let rows = visible_rows(metrics, layout, total_days);
    if rows.is_empty() {
        return WindowFrame {
            header: header_month(metrics, layout, days),
            edges,
            ..WindowFrame::empty()
        };
    }

    let total_rows = layout.total_rows(total_days);
    WindowFrame {
        range: visible_range(metrics, layout, total_days),
        top_spacer: layout.row_top(rows.start),
        bottom_spacer: layout.row_top(total_rows - rows.end),
        header: header_month(metrics, layout, days),
        edges,
    }
}

/// Drops measurements that arrive closer together than `min_interval`
///
/// The most recent dropped measurement is kept so it can be replayed once the
/// interval has passed.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last_accepted: Option<Instant>,
    deferred: Option<ScrollMetrics>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
            deferred: None,
        }
    }

    /// Whether a measurement at `now` may proceed
    pub fn admit(&mut self, metrics: ScrollMetrics, now: Instant) -> bool {
        let admitted = match self.last_accepted {
            Some(last) => now.saturating_duration_since(last) >= self.min_interval,
            None => true,
        };
        if admitted {
            self.last_accepted = Some(now);
            self.deferred = None;
        } else {
            self.deferred = Some(metrics);
        }
        admitted
    }

    /// A dropped measurement that is now due
    pub fn take_due(&mut self, now: Instant) -> Option<ScrollMetrics> {
        let last = self.last_accepted?;
        if now.saturating_duration_since(last) < self.min_interval {
            return None;
        }
        self.deferred.take()
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Forget the last accepted time so the next measurement runs immediately
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::day::DayGenerator;
    use chrono::NaiveDate;

    const LAYOUT: GridLayout = GridLayout {
        row_height: 100,
        buffer_rows: 2,
        edge_threshold: 200,
    };

    fn days(count: usize) -> Vec<CalendarDay> {
        let start = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        DayGenerator::new(start).generate(start, count)
    }

    #[test]
    fn test_visible_range_includes_buffer() {
        // 50 rows of content, viewport covers rows 10..15
        let range = visible_range(ScrollMetrics::new(1000, 500), &LAYOUT, 350);
        assert_eq!(range, 56..119);
    }

    #[test]
    fn test_visible_range_clamps_at_top() {
        let range = visible_range(ScrollMetrics::new(0, 250), &LAYOUT, 350);
        // rows 0..ceil(2.5)+2 = 0..5
        assert_eq!(range, 0..35);
    }

    #[test]
    fn test_visible_range_clamps_partial_last_row() {
        // 10 days = 2 rows, the second row partially filled
        let range = visible_range(ScrollMetrics::new(0, 1000), &LAYOUT, 10);
        assert_eq!(range, 0..10);
    }

    #[test]
    fn test_visible_range_past_end_is_empty() {
        let range = visible_range(ScrollMetrics::new(100_000, 500), &LAYOUT, 70);
        assert!(range.is_empty());
        assert!(range.end <= 70);
    }

    #[test]
    fn test_zero_viewport_or_empty_store() {
        assert_eq!(visible_range(ScrollMetrics::new(300, 0), &LAYOUT, 70), 0..0);
        assert_eq!(visible_range(ScrollMetrics::new(300, 400), &LAYOUT, 0), 0..0);
        let zero_rows = GridLayout { row_height: 0, ..LAYOUT };
        assert_eq!(visible_range(ScrollMetrics::new(300, 400), &zero_rows, 70), 0..0);
    }

    #[test]
    fn test_window_bounds_hold_for_grid_of_inputs() {
        for total in [0usize, 1, 6, 7, 8, 70, 365] {
            for offset in (0..8000).step_by(137) {
                for height in [0u32, 1, 99, 100, 640, 5000] {
                    let r = visible_range(ScrollMetrics::new(offset, height), &LAYOUT, total);
                    assert!(r.start <= r.end, "{:?}", r);
                    assert!(r.end <= total, "{:?} total={}", r, total);
                }
            }
        }
    }

    #[test]
    fn test_spacers_cover_collapsed_rows() {
        let days = days(350);
        let frame = window_for(ScrollMetrics::new(1000, 500), &LAYOUT, &days);

        // rows 8..17 rendered
        assert_eq!(frame.top_spacer, 800);
        assert_eq!(frame.bottom_spacer, (50 - 17) * 100);
        let rendered = (frame.range.len() as u64).div_ceil(7) * 100;
        assert_eq!(frame.top_spacer + rendered + frame.bottom_spacer, LAYOUT.total_height(350));
    }

    #[test]
    fn test_header_samples_mid_week_of_middle_row() {
        // Days start Sunday 2024-06-02; row 4 starts 2024-06-30,
        // its Wednesday is 2024-07-03
        let days = days(70);
        let metrics = ScrollMetrics::new(200, 500);
        assert_eq!(header_index(metrics, &LAYOUT), Some(4 * 7 + 3));
        assert_eq!(
            header_month(metrics, &LAYOUT, &days),
            Some(MonthYear { month: 6, year: 2024 })
        );
    }

    #[test]
    fn test_header_none_outside_store() {
        let days = days(7);
        assert_eq!(header_month(ScrollMetrics::new(5000, 500), &LAYOUT, &days), None);
    }

    #[test]
    fn test_edge_signals() {
        // 10 rows = 1000 units of content
        let near_top = edge_signals(ScrollMetrics::new(150, 300), &LAYOUT, 70);
        assert!(near_top.near_top);
        assert!(!near_top.near_bottom);

        let middle = edge_signals(ScrollMetrics::new(400, 300), &LAYOUT, 70);
        assert_eq!(middle, EdgeSignals::default());

        let near_bottom = edge_signals(ScrollMetrics::new(600, 300), &LAYOUT, 70);
        assert!(near_bottom.near_bottom);
        assert!(!near_bottom.near_top);
    }

    #[test]
    fn test_edge_signals_empty_store() {
        assert_eq!(edge_signals(ScrollMetrics::new(0, 300), &LAYOUT, 0), EdgeSignals::default());
    }

    #[test]
    fn test_throttle_drops_and_replays() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(16));

        assert!(throttle.admit(ScrollMetrics::new(0, 10), start));
        assert!(!throttle.admit(ScrollMetrics::new(5, 10), start + Duration::from_millis(5)));
        assert!(throttle.has_deferred());

        // Not due yet
        assert_eq!(throttle.take_due(start + Duration::from_millis(10)), None);
        assert_eq!(
            throttle.take_due(start + Duration::from_millis(20)),
            Some(ScrollMetrics::new(5, 10))
        );
        assert!(!throttle.has_deferred());
    }

    #[test]
    fn test_throttle_admits_after_interval() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(16));
        assert!(throttle.admit(ScrollMetrics::default(), start));
        assert!(throttle.admit(ScrollMetrics::default(), start + Duration::from_millis(16)));
    }
}
