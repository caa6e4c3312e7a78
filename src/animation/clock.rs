//! Animation clock
//!
//! Elapsed time since a reference instant, read once per frame. The clock
//! is never reset. Pausing freezes it: time spent paused is excluded, so
//! the reading never jumps and never runs backwards.
//!
//! Readings are `Duration`s. An `f32` count of seconds loses sub-frame
//! resolution after a few days, so callers wrap the reading into the loop
//! (see `PathAnimator::loop_time`) before narrowing it.

use std::time::{Duration, Instant};

/// Monotonic elapsed-time source for animation
#[derive(Clone, Debug)]
pub struct AnimationClock {
    /// Reference instant (t = 0)
    start: Instant,
    /// Total time spent in completed pauses
    paused_total: Duration,
    /// When the current pause began, if paused
    paused_at: Option<Instant>,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    /// Start a clock now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a clock at a given instant
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            paused_total: Duration::ZERO,
            paused_at: None,
        }
    }

    /// Animation time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Animation time elapsed at `now`
    ///
    /// Instants before the start read as zero.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let now = match self.paused_at {
            Some(paused_at) => paused_at.min(now),
            None => now,
        };

        now.saturating_duration_since(self.start)
            .saturating_sub(self.paused_total)
    }

    /// Whether the clock is frozen
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Freeze the clock now
    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Resume the clock now
    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    /// Freeze the clock at `now` (no-op if already paused)
    pub fn pause_at(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now.max(self.start));
            log::debug!("Animation paused at {:.2?}", self.elapsed_at(now));
        }
    }

    /// Resume the clock at `now` (no-op if running)
    pub fn resume_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
            log::debug!("Animation resumed at {:.2?}", self.elapsed_at(now));
        }
    }

    /// Toggle between paused and running
    pub fn toggle(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }
}
