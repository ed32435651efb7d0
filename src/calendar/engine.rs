//! Windowing engine
//!
//! Owns the day store and decides when to grow it. The engine never touches a
//! real scroll container: callers feed it [`ScrollMetrics`] plus the current
//! time and apply the [`ScrollCommand`]s it hands back.
//!
//! Only one operation runs at a time. [`Phase`] makes that explicit:
//!
//! - `Idle` accepts scroll-driven extension and jumps
//! - `Extending` holds until the renderer reports the new rows were laid out
//!   ([`CalendarEngine::layout_committed`]); scroll events are dropped
//! - `JumpingTo` lets scroll events update the window but suppresses
//!   extension until the cooldown deadline passes

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::{debug, error, trace};

use super::day::{CalendarDay, DayGenerator, MonthYear};
use super::error::{CalendarError, CalendarResult};
use super::store::{DayStore, Edge};
use super::tracker::{window_for, GridLayout, ScrollMetrics, Throttle, WindowFrame};
use crate::dates::{add_days, checked_add_days, start_of_week, DAYS_PER_WEEK};

/// Generation attempts before a jump gives up
pub const MAX_JUMP_ATTEMPTS: usize = 3;

/// Tunables for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub layout: GridLayout,
    /// 0 = Sunday
    pub week_starts_on: u8,
    /// Days added per extension (rounded up to whole weeks)
    pub buffer_days: usize,
    /// Weeks generated at startup
    pub initial_weeks: usize,
    /// Weeks of the initial span placed before today's week
    pub lead_weeks: usize,
    pub throttle: Duration,
    pub jump_cooldown: Duration,
    /// Cap on stored days; None grows without limit
    pub max_days: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: GridLayout {
                row_height: 100,
                buffer_rows: 20,
                edge_threshold: 200,
            },
            week_starts_on: 0,
            buffer_days: 182,
            initial_weeks: 12,
            lead_weeks: 4,
            throttle: Duration::from_millis(16),
            jump_cooldown: Duration::from_secs(1),
            max_days: None,
        }
    }
}

impl EngineConfig {
    fn buffer_weeks(&self) -> usize {
        self.buffer_days.div_ceil(DAYS_PER_WEEK as usize).max(1)
    }

    /// Extension size in days, always whole weeks
    pub fn extension_days(&self) -> usize {
        self.buffer_weeks() * DAYS_PER_WEEK as usize
    }
}

/// What the engine is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// New days were merged at `edge`; `shift` is applied once layout catches up
    Extending { edge: Edge, shift: i64 },
    /// A programmatic scroll is animating toward `target`
    JumpingTo { target: NaiveDate, deadline: Instant },
}

/// Instruction for the host scroll container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Move the current offset by a signed amount, without animation
    Shift(i64),
    /// Move to an absolute offset
    MoveTo { offset: u32, smooth: bool },
}

/// Why a scroll event was not measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Throttled,
    Extending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollOutcome {
    Skipped(SkipReason),
    Measured {
        /// Header month/year when it changed with this measurement
        header_changed: Option<MonthYear>,
        /// Edge that started extending, if any
        extended: Option<Edge>,
    },
}

/// Counters for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub prepends: usize,
    pub appends: usize,
    pub jumps: usize,
    pub evicted_days: usize,
}

#[derive(Debug, Clone)]
pub struct CalendarEngine {
    config: EngineConfig,
    today: NaiveDate,
    generator: DayGenerator,
    store: DayStore,
    phase: Phase,
    throttle: Throttle,
    frame: WindowFrame,
    header: MonthYear,
    last_metrics: ScrollMetrics,
    stats: EngineStats,
}

impl CalendarEngine {
    /// Create an engine for a session whose "today" is `today`
    ///
    /// The store starts empty; call [`initialize`](Self::initialize) before
    /// scroll events arrive.
    pub fn new(today: NaiveDate, config: EngineConfig) -> Self {
        let store = match config.max_days {
            // The cap must leave room for a full jump window
            Some(max) => DayStore::with_max_days(max.max(2 * config.extension_days() + 7)),
            None => DayStore::new(),
        };
        Self {
            throttle: Throttle::new(config.throttle),
            generator: DayGenerator::new(today),
            config,
            today,
            store,
            phase: Phase::Idle,
            frame: WindowFrame::empty(),
            header: MonthYear::of(today),
            last_metrics: ScrollMetrics::default(),
            stats: EngineStats::default(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.config.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn store(&self) -> &DayStore {
        &self.store
    }

    pub fn days(&self) -> &[CalendarDay] {
        self.store.sorted()
    }

    /// Last measured window
    pub fn frame(&self) -> &WindowFrame {
        &self.frame
    }

    /// Days of the last measured window
    pub fn visible_days(&self) -> &[CalendarDay] {
        let days = self.store.sorted();
        let end = self.frame.range.end.min(days.len());
        let start = self.frame.range.start.min(end);
        &days[start..end]
    }

    pub fn header(&self) -> MonthYear {
        self.header
    }

    pub fn set_header(&mut self, header: MonthYear) {
        self.header = header;
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn total_height(&self) -> u64 {
        self.config.layout.total_height(self.store.len())
    }

    pub fn is_initialized(&self) -> bool {
        !self.store.is_empty()
    }

    /// Generate the initial span around today and place today's row in view
    pub fn initialize(&mut self, metrics: ScrollMetrics) -> ScrollCommand {
        let week_start = start_of_week(self.today, self.config.week_starts_on);
        let lead_days = (self.config.lead_weeks * DAYS_PER_WEEK as usize) as i64;
        let start = add_days(week_start, -lead_days);
        let count = self.config.initial_weeks.max(self.config.lead_weeks + 1) * DAYS_PER_WEEK as usize;

        let inserted = self.store.merge(self.generator.generate(start, count));
        debug!("ENGINE: initialized with {} day(s) starting {}", inserted, start);

        self.header = MonthYear::of(self.today);
        self.throttle.reset();
        let offset = self.offset_for(self.today, metrics).unwrap_or(0);
        self.measure(ScrollMetrics::new(offset, metrics.viewport_height));
        ScrollCommand::MoveTo {
            offset,
            smooth: false,
        }
    }

    /// Handle a scroll event from the host
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now: Instant) -> ScrollOutcome {
        self.last_metrics = metrics;
        if matches!(self.phase, Phase::Extending { .. }) {
            trace!("ENGINE: scroll dropped while extending");
            return ScrollOutcome::Skipped(SkipReason::Extending);
        }
        if !self.throttle.admit(metrics, now) {
            return ScrollOutcome::Skipped(SkipReason::Throttled);
        }
        self.evaluate(metrics, now)
    }

    /// Advance timers: settle a finished jump and replay a throttled event
    pub fn tick(&mut self, now: Instant) -> Option<ScrollOutcome> {
        if let Phase::JumpingTo { target, deadline } = self.phase {
            if now >= deadline {
                debug!("ENGINE: jump to {} settled", target);
                self.phase = Phase::Idle;
                self.throttle.reset();
                let metrics = self.last_metrics;
                self.throttle.admit(metrics, now);
                return Some(self.evaluate(metrics, now));
            }
        }
        if matches!(self.phase, Phase::Extending { .. }) {
            return None;
        }
        let metrics = self.throttle.take_due(now)?;
        self.throttle.admit(metrics, now);
        Some(self.evaluate(metrics, now))
    }

    /// Called by the renderer once it has drawn the rows merged by an extension
    ///
    /// Returns the offset correction that keeps the previously visible rows in
    /// place. The engine is idle again afterwards.
    pub fn layout_committed(&mut self) -> Option<ScrollCommand> {
        let Phase::Extending { edge, shift } = self.phase else {
            return None;
        };
        self.phase = Phase::Idle;
        debug!("ENGINE: {:?} extension committed, shift={}", edge, shift);
        (shift != 0).then_some(ScrollCommand::Shift(shift))
    }

    /// Grow the window upward by one buffer run
    ///
    /// Returns false when the engine is busy or the store is empty.
    pub fn prepend(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(first) = self.store.first().map(|day| day.date) else {
            return false;
        };
        let count = self.config.extension_days();
        let Some(start) = checked_add_days(first, -(count as i64)) else {
            debug!("ENGINE: cannot prepend before {}", first);
            return false;
        };
        let inserted = self.store.merge(self.generator.generate(start, count));
        if inserted == 0 {
            return false;
        }

        let evicted = self.store.evict_far_side(Edge::Top);
        self.stats.evicted_days += evicted;
        self.stats.prepends += 1;

        // Rows inserted above push visible content down by exactly their height
        let new_rows = (inserted / DAYS_PER_WEEK as usize) as i64;
        let shift = new_rows * i64::from(self.config.layout.row_height);
        self.phase = Phase::Extending {
            edge: Edge::Top,
            shift,
        };
        debug!("ENGINE: prepended {} day(s) from {}, pending shift {}", inserted, start, shift);
        true
    }

    /// Grow the window downward by one buffer run
    pub fn append(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let Some(last) = self.store.last().map(|day| day.date) else {
            return false;
        };
        let count = self.config.extension_days();
        let Some(start) = checked_add_days(last, 1)
            .filter(|start| checked_add_days(*start, count as i64 - 1).is_some())
        else {
            debug!("ENGINE: cannot append after {}", last);
            return false;
        };
        let inserted = self.store.merge(self.generator.generate(start, count));
        if inserted == 0 {
            return false;
        }

        // Evicting rows above the viewport pulls content up
        let evicted = self.store.evict_far_side(Edge::Bottom);
        self.stats.evicted_days += evicted;
        self.stats.appends += 1;

        let evicted_rows = (evicted / DAYS_PER_WEEK as usize) as i64;
        let shift = -evicted_rows * i64::from(self.config.layout.row_height);
        self.phase = Phase::Extending {
            edge: Edge::Bottom,
            shift,
        };
        debug!("ENGINE: appended {} day(s) from {}", inserted, start);
        true
    }

    /// Bring `target` into view, generating days around it if needed
    ///
    /// The returned command animates to an offset that puts the target's row
    /// about one third down the viewport. Extension is suppressed until the
    /// cooldown expires.
    pub fn scroll_to_date(
        &mut self,
        target: NaiveDate,
        metrics: ScrollMetrics,
        now: Instant,
    ) -> CalendarResult<ScrollCommand> {
        if matches!(self.phase, Phase::Extending { .. }) {
            return Err(CalendarError::Busy);
        }

        let mut attempts = 0;
        let offset = loop {
            if let Some(offset) = self.offset_for(target, metrics) {
                break offset;
            }
            if attempts == MAX_JUMP_ATTEMPTS {
                error!(
                    "ENGINE: {} missing after {} generation attempt(s), store has {} day(s)",
                    target,
                    attempts,
                    self.store.len()
                );
                return Err(CalendarError::GenerationInvariant { target, attempts });
            }
            attempts += 1;
            self.generate_around(target);
        };

        self.stats.jumps += 1;
        self.phase = Phase::JumpingTo {
            target,
            deadline: now + self.config.jump_cooldown,
        };
        self.last_metrics = metrics;
        debug!("ENGINE: jumping to {} at offset {}", target, offset);
        Ok(ScrollCommand::MoveTo {
            offset,
            smooth: true,
        })
    }

    /// Show today's month in the header and scroll back to today
    pub fn reset_to_today(
        &mut self,
        metrics: ScrollMetrics,
        now: Instant,
    ) -> CalendarResult<ScrollCommand> {
        self.header = MonthYear::of(self.today);
        self.scroll_to_date(self.today, metrics, now)
    }

    /// Scroll offset that puts `date`'s row a third of the way down
    pub fn offset_for(&self, date: NaiveDate, metrics: ScrollMetrics) -> Option<u32> {
        let index = self.store.position(date)?;
        let layout = &self.config.layout;
        let row_top = layout.row_top(layout.row_of(index)) as i64;
        let offset = row_top - i64::from(metrics.viewport_height / 3);
        Some(offset.clamp(0, i64::from(u32::MAX)) as u32)
    }

    /// Day index under a point of the grid, where `y` is measured in scroll
    /// units from the top of the content
    pub fn index_at(&self, y: u64, column: usize) -> Option<usize> {
        let layout = &self.config.layout;
        if layout.row_height == 0 || column >= layout.columns() {
            return None;
        }
        let row = usize::try_from(y / u64::from(layout.row_height)).ok()?;
        let index = row.checked_mul(layout.columns())?.checked_add(column)?;
        (index < self.store.len()).then_some(index)
    }

    fn evaluate(&mut self, metrics: ScrollMetrics, now: Instant) -> ScrollOutcome {
        let header_changed = self.measure(metrics);

        if let Phase::JumpingTo { deadline, .. } = self.phase {
            if now < deadline {
                return ScrollOutcome::Measured {
                    header_changed,
                    extended: None,
                };
            }
            self.phase = Phase::Idle;
        }

        let edges = self.frame.edges;
        let extended = if edges.near_top && self.prepend() {
            Some(Edge::Top)
        } else if edges.near_bottom && self.append() {
            Some(Edge::Bottom)
        } else {
            None
        };
        if extended.is_some() {
            // Indices moved; re-measure against the grown store
            self.frame = window_for(metrics, &self.config.layout, self.store.sorted());
        }

        ScrollOutcome::Measured {
            header_changed,
            extended,
        }
    }

    fn measure(&mut self, metrics: ScrollMetrics) -> Option<MonthYear> {
        self.frame = window_for(metrics, &self.config.layout, self.store.sorted());
        match self.frame.header {
            Some(header) if header != self.header => {
                trace!("ENGINE: header {} -> {}", self.header, header);
                self.header = header;
                Some(header)
            }
            _ => None,
        }
    }

    /// Generate the jump window for `target` and bridge it to existing days
    ///
    /// A window further away than the bridge limit replaces the store.
    fn generate_around(&mut self, target: NaiveDate) {
        let buffer = self.config.extension_days() as i64;
        let week_start = start_of_week(target, self.config.week_starts_on);
        let (Some(first), Some(last)) = (
            checked_add_days(week_start, -buffer),
            checked_add_days(week_start, DAYS_PER_WEEK as i64 - 1 + buffer),
        ) else {
            debug!("ENGINE: jump window around {} is out of range", target);
            return;
        };

        let gap = match (self.store.first(), self.store.last()) {
            (_, Some(hi)) if first > hi.date => (first - hi.date).num_days() - 1,
            (Some(lo), _) if last < lo.date => (lo.date - last).num_days() - 1,
            _ => 0,
        };
        if gap > self.bridge_limit() as i64 {
            debug!("ENGINE: {} day(s) from the stored span, reseeding", gap);
            self.stats.evicted_days += self.store.len();
            self.store.clear();
        }

        let mut inserted = self.store.merge(self.generator.generate_between(first, last));

        let keep = match (self.store.first(), self.store.last()) {
            (Some(lo), Some(hi)) => {
                let lo = lo.date;
                let hi = hi.date;
                // Fill any hole between the jump window and what was already there
                inserted += self.bridge_gaps(lo, hi);
                if (target - lo).num_days() <= (hi - target).num_days() {
                    Edge::Top
                } else {
                    Edge::Bottom
                }
            }
            _ => Edge::Top,
        };
        self.stats.evicted_days += self.store.evict_far_side(keep);
        debug!("ENGINE: generated {} day(s) around {}", inserted, target);
    }

    /// Largest hole a jump fills instead of reseeding the store
    fn bridge_limit(&self) -> usize {
        self.store
            .max_days()
            .unwrap_or(2 * self.config.extension_days())
    }

    /// Make `lo..=hi` contiguous; returns the number of days inserted
    fn bridge_gaps(&mut self, lo: NaiveDate, hi: NaiveDate) -> usize {
        let expected = (hi - lo).num_days() as usize + 1;
        if self.store.len() >= expected {
            return 0;
        }
        let missing: Vec<CalendarDay> = self
            .generator
            .generate_between(lo, hi)
            .into_iter()
            .filter(|day| !self.store.contains(day.date))
            .collect();
        self.store.merge(missing)
    }
}
