//! Card instance identification.
//!
//! Every card that enters play (leaders at setup, characters and stages when
//! played) receives an `InstanceId` unique for the lifetime of the game.
//!
//! ## ID Layout
//!
//! - `0..2`: the two leaders, allocated by `GameState::new`
//! - `2..`: characters and stages, allocated in play order
//!
//! Ids are never reused, so an action that still refers to a card which has
//! left the field simply fails to resolve.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
