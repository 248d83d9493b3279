//! Todo id generation.
//!
//! Ids are decimal epoch-millisecond strings so date ordering can compare
//! them numerically. Two todos created in the same millisecond get
//! consecutive values instead of colliding.
//!
//! Clock readings and seeds are capped at `MAX_ID_MS`, the largest integer
//! a JavaScript number holds exactly. Stored ids above it cannot be real
//! creation times and do not seed the generator.

use crate::model::todo::{Todo, TodoId};
use std::time::{SystemTime, UNIX_EPOCH};

/// `Number.MAX_SAFE_INTEGER`; about 285,000 years after the epoch.
pub const MAX_ID_MS: u64 = 9_007_199_254_740_991;

/// Source of epoch milliseconds.
pub type Clock = fn() -> u64;

/// Wall-clock epoch milliseconds. A clock before the epoch reads as 0.
pub fn system_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Strictly increasing timestamp ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    clock: Clock,
    last: u64,
}

impl IdGenerator {
    pub fn new(clock: Clock) -> Self {
        Self { clock, last: 0 }
    }

    /// Makes sure future ids sort after every numeric id in `todos` up to
    /// `MAX_ID_MS`.
    pub fn observe(&mut self, todos: &[Todo]) {
        let max = todos
            .iter()
            .filter_map(Todo::created_at_ms)
            .filter(|ms| *ms <= MAX_ID_MS)
            .max();
        if let Some(max) = max {
            self.last = self.last.max(max);
        }
    }

    /// Returns `max(now, last + 1)` as a string.
    pub fn next_id(&mut self) -> TodoId {
        let now = (self.clock)().min(MAX_ID_MS);
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(system_clock_ms)
    }
}
