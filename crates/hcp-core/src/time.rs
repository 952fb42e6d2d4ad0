//! Simulated campaign time.
//!
//! # Design
//!
//! Time is represented as integer **milliseconds** since campaign start.
//! Using an integer as the canonical time unit means event-queue ordering
//! and timestamp comparisons are exact (no floating-point drift), while a
//! millisecond resolution is far finer than any machine transition the
//! planner schedules.  Durations derived from fractional seconds (working
//! rates, unload rates, transit oracles) are rounded half-up at the
//! conversion boundary so a machine is never scheduled early.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute instant of simulated campaign time, in milliseconds since the
/// campaign start.
///
/// Stored as `u64`: at millisecond resolution a u64 lasts ~584 million years,
/// far longer than any conceivable campaign.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Construct from whole seconds.
    #[inline]
    pub const fn from_secs(secs: u64) -> SimTime {
        SimTime(secs * 1_000)
    }

    /// This instant expressed in (possibly fractional) seconds.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    /// Duration elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> SimDuration {
        SimDuration(self.0 - earlier.0)
    }
}

impl std::ops::Add<SimDuration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl std::ops::Sub for SimTime {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimDuration {
        SimDuration(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T+{}s", self.0 as f64 / 1_000.0)
    }
}

// ── SimDuration ───────────────────────────────────────────────────────────────

/// A span of simulated time, in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimDuration(pub u64);

impl SimDuration {
    pub const ZERO: SimDuration = SimDuration(0);

    /// Construct from whole seconds.
    #[inline]
    pub const fn from_secs(secs: u64) -> SimDuration {
        SimDuration(secs * 1_000)
    }

    /// Construct from fractional seconds, rounding half-up to the nearest
    /// millisecond.
    ///
    /// Negative inputs clamp to zero: transit oracles are contractually
    /// non-negative, but a defect upstream must not wrap the clock backwards.
    #[inline]
    pub fn from_secs_f64(secs: f64) -> SimDuration {
        SimDuration((secs.max(0.0) * 1_000.0).round() as u64)
    }

    /// This span expressed in (possibly fractional) seconds.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn add(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0 + rhs.0)
    }
}

impl std::ops::Sub for SimDuration {
    type Output = SimDuration;
    #[inline]
    fn sub(self, rhs: SimDuration) -> SimDuration {
        SimDuration(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for SimDuration {
    fn sum<I: Iterator<Item = SimDuration>>(iter: I) -> SimDuration {
        SimDuration(iter.map(|d| d.0).sum())
    }
}

impl fmt::Display for SimDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0 as f64 / 1_000.0)
    }
}
