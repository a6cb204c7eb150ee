//! DON!! pool.
//!
//! Counters for where a player's DON!! cards are. Only `attached` has a rules
//! effect today (through `CardInstance::attached_don`); the pool is tracked
//! so the state has a place for it.

use serde::{Deserialize, Serialize};

// TODO: DON!! phase income (+2, +1 for the first player's first turn), cost
// payment on play, and returning attached/rested DON!! to active in refresh.
/// Per-player DON!! counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonPool {
    /// Cards still in the DON!! deck.
    pub deck: u32,
    pub active: u32,
    pub rested: u32,
    /// Cards attached to leader or characters.
    pub attached: u32,
}

impl DonPool {
    /// A pool with every card still in the DON!! deck.
    #[must_use]
    pub fn new(deck_size: u32) -> Self {
        Self {
            deck: deck_size,
            ..Self::default()
        }
    }

    /// Cards in all four locations.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.deck + self.active + self.rested + self.attached
    }
}
