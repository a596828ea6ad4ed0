//! Health Module
//!
//! Handles clamped resource pools (hit points, mana) and life state for combatants.
use std::cmp;

use serde::{Deserialize, Serialize};

/// A resource that saturates at zero and at its maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    max: u32,
    current: u32,
}
impl Pool {
    /// Create a full pool with the specified maximum.
    pub fn new_at_max(max: u32) -> Pool {
        Pool { max, current: max }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Remove up to `amount` from the pool. Saturates at zero; returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Add up to `amount` to the pool. Saturates at max; returns the amount actually added.
    pub fn fill(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = cmp::min(self.max, self.current.saturating_add(amount));
        self.current - before
    }

    /// Remove exactly `amount` if available, leaving the pool untouched otherwise.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current >= amount {
            self.current -= amount;
            true
        } else {
            false
        }
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Possible life states for combatants.
/// Derived from hit points, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    Dead,
}
