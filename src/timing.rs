//! How long everything takes, plus a small helper for pacing a frontend's loop.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::schedule::Instant;

/// Every delay the engine schedules. All values are in milliseconds, so they're easy to write in config.
///
/// Missing fields deserialize to their defaults.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long a pad stays lit while the sequence is replayed.
    pub flash: u64,
    /// Dark time between two replayed flashes.
    pub gap: u64,
    /// How long a pad stays lit after the player presses it.
    pub press_flash: u64,
    /// Pause between finishing a round and the next replay starting.
    pub round_pause: u64,
    /// How long the error visual stays up before the game resets.
    pub fail_pause: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            flash: 300,
            gap: 300,
            press_flash: 100,
            round_pause: 1000,
            fail_pause: 200,
        }
    }
}

impl Timings {
    /// Longest any one delay can be: an hour.
    pub const MAX_MS: u64 = 60 * 60 * 1000;

    /// Multiply every duration by `factor`, e.g. `0.5` for a game twice as fast.
    ///
    /// Results saturate at `u64::MAX` rather than wrapping; use [`Self::too_long`] or [`Self::clamped`] after.
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |ms: u64| (ms as f32 * factor).round().max(0.0) as u64;
        Self {
            flash: scale(self.flash),
            gap: scale(self.gap),
            press_flash: scale(self.press_flash),
            round_pause: scale(self.round_pause),
            fail_pause: scale(self.fail_pause),
        }
    }

    /// The first field longer than [`Self::MAX_MS`], by name, if there is one.
    pub fn too_long(&self) -> Option<(&'static str, u64)> {
        [
            ("flash", self.flash),
            ("gap", self.gap),
            ("press_flash", self.press_flash),
            ("round_pause", self.round_pause),
            ("fail_pause", self.fail_pause),
        ]
        .into_iter()
        .find(|&(_, ms)| ms > Self::MAX_MS)
    }

    /// Cap every field at [`Self::MAX_MS`].
    pub fn clamped(self) -> Self {
        let clamp = |ms: u64| ms.min(Self::MAX_MS);
        Self {
            flash: clamp(self.flash),
            gap: clamp(self.gap),
            press_flash: clamp(self.press_flash),
            round_pause: clamp(self.round_pause),
            fail_pause: clamp(self.fail_pause),
        }
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash)
    }

    pub fn press_flash(&self) -> Duration {
        Duration::from_millis(self.press_flash)
    }

    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause)
    }

    pub fn fail_pause(&self) -> Duration {
        Duration::from_millis(self.fail_pause)
    }

    /// Time from one replayed flash starting to the next one starting.
    pub fn replay_stride(&self) -> Duration {
        Duration::from_millis(self.flash.saturating_add(self.gap))
    }
}

/// Keeps track of time between relatively steady pulses.
///
/// Ticks try to stay lined up with the original tick, but if [`Self::tick`] is called more than half a period
/// delayed, the next tick will be reset relative to the current time instead. If called early it will always advance
/// by exactly one tick.
#[derive(Debug)]
pub struct Timer {
    next: Instant,
    period: Duration,
}

impl Timer {
    /// Create a new timer with the given period. The first tick is right now.
    pub fn new(period: Duration) -> Self {
        Self {
            next: Instant::now(),
            period,
        }
    }

    /// How much time is left before the timer ticks over. Minimum zero.
    pub fn remaining(&self) -> Duration {
        self.next
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::ZERO)
    }

    /// Move on to the next tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        if now < self.next + self.period / 2 {
            self.next = self.next + self.period;
        } else {
            self.next = now + self.period;
        }
    }

    /// Check whether we've ticked yet; if so, reset the timer. Useful for ratelimiting.
    pub fn tick_ready(&mut self) -> bool {
        if Instant::now() >= self.next {
            self.tick();
            true
        } else {
            false
        }
    }
}
