//! Movie id generation.
//!
//! # Design Decisions
//! - Ids are drawn while the store lock is held, so the generator can see
//!   every id in use
//! - `random` keeps the historical `[0, 1_000_000)` decimal format but
//!   redraws on collision

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound (exclusive) for `random` ids.
pub const RANDOM_ID_CEILING: u32 = 1_000_000;

/// How new movie ids are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Monotonic decimal counter.
    #[default]
    Counter,
    /// UUID v4.
    Uuid,
    /// Random decimal in `[0, 1_000_000)`.
    Random,
}

/// Stateful id generator owned by a store.
#[derive(Debug)]
pub struct IdGenerator {
    strategy: IdStrategy,
    next: u64,
}

impl IdGenerator {
    /// Create a generator whose counter starts past every numeric id in `existing`.
    pub fn new<'a>(strategy: IdStrategy, existing: impl IntoIterator<Item = &'a str>) -> Self {
        let next = existing
            .into_iter()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self { strategy, next }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Produce an id for which `taken` returns false.
    pub fn next_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let candidate = match self.strategy {
                IdStrategy::Counter => {
                    let id = self.next;
                    self.next += 1;
                    id.to_string()
                }
                IdStrategy::Uuid => Uuid::new_v4().to_string(),
                IdStrategy::Random => rand::thread_rng().gen_range(0..RANDOM_ID_CEILING).to_string(),
            };
            if !taken(&candidate) {
                return candidate;
            }
            tracing::debug!(id = %candidate, strategy = ?self.strategy, "Generated id already in use, redrawing");
        }
    }
}
