//! Monotonic time budget for the bisection search.

use std::time::{Duration, Instant};

/// An absolute point on the monotonic clock after which the bisection search
/// stops refining and returns its best-known answer, or no limit at all.
///
/// A deadline only ever trades optimality for latency: every diff computed
/// under an elapsed deadline still reconstructs both texts exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No time limit. Half-match is skipped and the result is minimal.
    pub fn none() -> Self {
        Self(None)
    }

    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        // Budgets too large to represent are treated as unlimited.
        Self(Instant::now().checked_add(budget))
    }

    /// A deadline at a fixed instant.
    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// A deadline that has already elapsed.
    pub fn expired() -> Self {
        Self(Some(Instant::now()))
    }

    /// Returns `true` if a time limit is configured.
    pub fn is_limited(&self) -> bool {
        self.0.is_some()
    }

    /// Returns `true` once the deadline has passed.
    pub fn is_expired(&self) -> bool {
        match self.0 {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }

    /// Time left before expiry, `None` when unlimited.
    pub fn remaining(&self) -> Option<Duration> {
        self.0.map(|at| at.saturating_duration_since(Instant::now()))
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Option<Duration>> for Deadline {
    fn from(budget: Option<Duration>) -> Self {
        match budget {
            Some(budget) => Self::after(budget),
            None => Self::none(),
        }
    }
}
