// Shared goal claims for cooperating agents
//
// One board per episode, created by whoever drives the agents and handed to
// every decision call. Claims are soft hints: two agents can briefly hold the
// same goal when one reaches and releases it in the same tick another plans
// toward it. Nothing here is a mutual-exclusion guarantee.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

/// Cloneable handle to a single shared set of claimed goals
#[derive(Debug)]
pub struct ClaimBoard<P> {
    goals: Arc<Mutex<HashSet<P>>>,
}

impl<P> Clone for ClaimBoard<P> {
    fn clone(&self) -> Self {
        ClaimBoard {
            goals: Arc::clone(&self.goals),
        }
    }
}

impl<P: Eq + Hash + Clone> ClaimBoard<P> {
    pub fn new() -> Self {
        ClaimBoard {
            goals: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Records `goal` as targeted; returns false if it was already claimed
    pub fn claim(&self, goal: P) -> bool {
        self.goals.lock().insert(goal)
    }

    /// Drops the claim on `goal`; returns false if nobody held it
    pub fn release(&self, goal: &P) -> bool {
        self.goals.lock().remove(goal)
    }

    pub fn contains(&self, goal: &P) -> bool {
        self.goals.lock().contains(goal)
    }

    pub fn len(&self) -> usize {
        self.goals.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.lock().is_empty()
    }

    /// Copy of the current claims, for use as a search exclusion set
    pub fn snapshot(&self) -> HashSet<P> {
        self.goals.lock().clone()
    }

    pub fn clear(&self) {
        self.goals.lock().clear();
    }
}

impl<P: Eq + Hash + Clone> Default for ClaimBoard<P> {
    fn default() -> Self {
        ClaimBoard::new()
    }
}
