//! Score ledger
//!
//! The score doubles as the currency abilities are bought with, so it can
//! only go down through `try_spend`, which refuses anything unaffordable.

/// Kill tally and ability currency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    value: u64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Add a kill reward
    pub fn award(&mut self, points: u64) {
        self.value = self.value.saturating_add(points);
    }

    #[inline]
    pub fn can_afford(&self, cost: u64) -> bool {
        self.value >= cost
    }

    /// Deduct `cost` if affordable. Leaves the score untouched and returns
    /// false otherwise.
    pub fn try_spend(&mut self, cost: u64) -> bool {
        match self.value.checked_sub(cost) {
            Some(rest) => {
                self.value = rest;
                true
            }
            None => false,
        }
    }
}
