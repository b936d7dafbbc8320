//! Round counter.
//!
//! A round is one synchronous update of every node: observe, score, adopt,
//! then resample activity.  Rounds are counted from zero.

use std::fmt;

/// An absolute round counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round(pub u64);

impl Round {
    pub const ZERO: Round = Round(0);

    /// The round after `self`.
    #[inline]
    pub fn next(self) -> Round {
        Round(self.0 + 1)
    }

    /// Rounds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Round) -> u64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}
