//! Per-call worker budget.

use std::num::NonZeroUsize;

/// Number of workers a single join call may use.
///
/// Always at least one: requests of zero or below are clamped instead of
/// rejected, so a budget can never divide by zero or spawn nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadBudget(NonZeroUsize);

impl ThreadBudget {
    pub const SINGLE: Self = Self(NonZeroUsize::MIN);

    #[must_use]
    pub fn new(requested: usize) -> Self {
        NonZeroUsize::new(requested).map_or(Self::SINGLE, Self)
    }

    /// Clamp a signed request, as handed over by harnesses and bindings.
    #[must_use]
    pub fn from_signed(requested: i64) -> Self {
        usize::try_from(requested).map_or(Self::SINGLE, Self::new)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }

    /// Workers worth spawning for `units` independent pieces of work.
    #[must_use]
    pub fn workers_for(self, units: usize) -> usize {
        self.get().min(units).max(1)
    }
}

impl Default for ThreadBudget {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl From<usize> for ThreadBudget {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<i32> for ThreadBudget {
    fn from(value: i32) -> Self {
        Self::from_signed(i64::from(value))
    }
}

impl From<NonZeroUsize> for ThreadBudget {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}
