//! Refresh-cycle counter.
//!
//! The simulator has no simulated calendar: wall-clock time drives the
//! cadence and the peak-hour predicate.  `Tick` only counts completed refresh
//! cycles so observers and output rows can be ordered.

use std::fmt;

/// Number of refresh cycles completed since the clock started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// `true` if this tick falls on an `every`-tick boundary.  `every == 0`
    /// never matches.
    #[inline]
    pub fn is_every(self, every: u64) -> bool {
        every > 0 && self.0.is_multiple_of(every)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
