//! Virtual time model.
//!
//! # Design
//!
//! Time is a real number of simulated minutes since the run started.  Load
//! draws may be fractional, so an integer tick would not do.  `SimTime` wraps
//! an `f64` that is guaranteed finite, which lets it implement `Ord` via
//! `f64::total_cmp` and key a `BTreeMap` directly.
//!
//! `-0.0` is normalised to `0.0` on construction so that `Eq` and `Ord`
//! agree.

use std::cmp::Ordering;
use std::fmt;

/// An absolute point on the virtual clock, in minutes.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Wrap `minutes`, or `None` if it is NaN or infinite.
    #[inline]
    pub fn new(minutes: f64) -> Option<SimTime> {
        // `+ 0.0` turns -0.0 into +0.0.
        minutes.is_finite().then_some(SimTime(minutes + 0.0))
    }

    /// Raw minutes since the start of the run.
    #[inline]
    pub fn minutes(self) -> f64 {
        self.0
    }

    /// The time `duration` minutes after `self`, or `None` if the result is
    /// not finite.
    #[inline]
    pub fn checked_add(self, duration: f64) -> Option<SimTime> {
        SimTime::new(self.0 + duration)
    }

    /// Minutes elapsed from `earlier` to `self`.  Negative if `earlier` is
    /// actually later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
