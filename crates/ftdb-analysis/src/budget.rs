//! Explicit lookup budget for batch runs.

/// A fixed allowance of provider lookups for one run.
///
/// Replaces the implicit global request counters of earlier tooling: the
/// batch loop takes from the budget before each lookup and stops issuing new
/// ones when it runs dry. Every take is counted, including lookups that end
/// up failing.
#[derive(Debug, Clone, Copy)]
pub struct LookupBudget {
    remaining: u32,
    used: u32,
}

impl LookupBudget {
    #[must_use]
    pub fn new(max_lookups: u32) -> Self {
        Self {
            remaining: max_lookups,
            used: 0,
        }
    }

    /// Take one lookup from the budget. Returns `false` when exhausted.
    pub fn try_take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.used += 1;
        true
    }

    #[must_use]
    pub fn used(&self) -> u32 {
        self.used
    }

    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_until_exhausted() {
        let mut budget = LookupBudget::new(2);
        assert!(budget.try_take());
        assert!(budget.try_take());
        assert!(!budget.try_take());
        assert_eq!(budget.used(), 2);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn zero_budget_allows_nothing() {
        let mut budget = LookupBudget::new(0);
        assert!(!budget.try_take());
        assert_eq!(budget.used(), 0);
    }
}
