//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is a monotonically increasing `u64` counter in the
//! canonical internal unit, the **millisecond**.  Configuration may express
//! the tick length in any [`TimeUnit`]; it is converted exactly once, at
//! build time, through [`TimeUnit::to_internal`]:
//!
//!   internal_tick_length = tick_length * unit.millis()
//!
//! So a tick length of `1` with [`TimeUnit::Second`] advances the clock by
//! 1000 per tick, and 3 ticks end at time 3000.
//!
//! Integer arithmetic keeps all time comparisons exact (no floating-point
//! drift between listeners that compare timestamps).

use std::fmt;

use crate::{CoreError, CoreResult};

// ── TimeUnit ──────────────────────────────────────────────────────────────────

/// The unit a configured tick length is expressed in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeUnit {
    #[default]
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    /// Number of internal time units (milliseconds) in one of `self`.
    #[inline]
    pub const fn millis(self) -> u64 {
        match self {
            TimeUnit::Millisecond => 1,
            TimeUnit::Second      => 1_000,
            TimeUnit::Minute      => 60_000,
            TimeUnit::Hour        => 3_600_000,
        }
    }

    /// Convert `length` of this unit into the internal unit.
    ///
    /// This is the only place a configured tick length is scaled.  A zero
    /// length and an overflowing product are both configuration errors.
    pub fn to_internal(self, length: u64) -> CoreResult<u64> {
        if length == 0 {
            return Err(CoreError::InvalidTickLength(self));
        }
        length
            .checked_mul(self.millis())
            .ok_or(CoreError::TickLengthOverflow { length, unit: self })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Millisecond => "ms",
            TimeUnit::Second      => "s",
            TimeUnit::Minute      => "min",
            TimeUnit::Hour        => "h",
        };
        f.write_str(s)
    }
}

// ── TimeLapse ─────────────────────────────────────────────────────────────────

/// The half-open interval `[start, end)` of simulated time covered by one tick.
///
/// Handed by reference to every tick listener.  Listeners must not keep it
/// past the callback; the next tick gets a fresh value.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TimeLapse {
    start: u64,
    end:   u64,
}

impl TimeLapse {
    /// The lapse starting at `start` and lasting `step` internal units.
    ///
    /// # Panics
    /// Panics in debug mode if `start + step` overflows.
    #[inline]
    pub fn new(start: u64, step: u64) -> Self {
        Self { start, end: start + step }
    }

    /// Simulation time at the start of this tick.
    #[inline]
    pub fn time(&self) -> u64 {
        self.start
    }

    /// Simulation time at the end of this tick (exclusive).
    #[inline]
    pub fn end_time(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn time_step(&self) -> u64 {
        self.end - self.start
    }

    /// `true` if `t` falls inside `[time(), end_time())`.
    #[inline]
    pub fn contains(&self, t: u64) -> bool {
        (self.start..self.end).contains(&t)
    }
}

impl fmt::Display for TimeLapse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
