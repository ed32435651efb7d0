//! Scroll container for the calendar grid
//!
//! Plays the part of a scrollable element: it owns the offset, clamps it to
//! the content height, and animates smooth moves with an ease-out curve
//! stepped by ticks.

use std::time::{Duration, Instant};

use crate::calendar::{ScrollCommand, ScrollMetrics};

/// Length of a smooth scroll animation
pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(240);

/// Cubic ease-out over `0.0..=1.0`
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnimation {
    pub from: u32,
    pub to: u32,
    pub started: Instant,
    pub duration: Duration,
}

impl ScrollAnimation {
    pub fn position(&self, now: Instant) -> u32 {
        if self.is_finished(now) {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        (from + (to - from) * ease_out_cubic(t)).round() as u32
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.duration.is_zero() || now.saturating_duration_since(self.started) >= self.duration
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset: u32,
    /// Visible lines
    pub height: u32,
    pub animation: Option<ScrollAnimation>,
}

fn shift_by(value: u32, delta: i64) -> u32 {
    (i64::from(value) + delta).clamp(0, i64::from(u32::MAX)) as u32
}

impl Viewport {
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.offset, self.height)
    }

    pub fn max_offset(&self, content_height: u64) -> u32 {
        content_height
            .saturating_sub(u64::from(self.height))
            .min(u64::from(u32::MAX)) as u32
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Jump to `offset` immediately, cancelling any animation
    pub fn scroll_to(&mut self, offset: u32, content_height: u64) {
        self.animation = None;
        self.offset = offset.min(self.max_offset(content_height));
    }

    pub fn scroll_by(&mut self, delta: i64, content_height: u64) {
        self.scroll_to(shift_by(self.offset, delta), content_height);
    }

    /// Apply an engine command
    pub fn apply(&mut self, command: ScrollCommand, content_height: u64, now: Instant) {
        match command {
            ScrollCommand::Shift(delta) => {
                // Content moved under the viewport; an animation keeps aiming at the same rows
                if let Some(animation) = self.animation.as_mut() {
                    animation.from = shift_by(animation.from, delta);
                    animation.to = shift_by(animation.to, delta);
                }
                self.offset = shift_by(self.offset, delta).min(self.max_offset(content_height));
            }
            ScrollCommand::MoveTo { offset, smooth: false } => self.scroll_to(offset, content_height),
            ScrollCommand::MoveTo { offset, smooth: true } => {
                let to = offset.min(self.max_offset(content_height));
                self.animation = Some(ScrollAnimation {
                    from: self.offset,
                    to,
                    started: now,
                    duration: SMOOTH_SCROLL_DURATION,
                });
            }
        }
    }

    /// Advance the animation; true when the offset moved
    pub fn step(&mut self, now: Instant, content_height: u64) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };
        let next = animation.position(now).min(self.max_offset(content_height));
        if animation.is_finished(now) {
            self.animation = None;
        }
        let moved = next != self.offset;
        self.offset = next;
        moved
    }
}
