//! Card instances - runtime card state.
//!
//! `CardInstance` is a card on the field: a leader, a character or a stage.
//! It holds the card id rather than the definition, so any effect that
//! moves the card off the field rebuilds the hand or deck entry through
//! the catalog.
//!
//! Instances are plain values. Cloning a `GameState` copies every instance,
//! so modifiers applied during a simulated branch never leak back.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId};
use super::keyword::{Keyword, KeywordSet};
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// A card in play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub instance_id: InstanceId,

    /// Definition this instance was created from.
    pub card_id: CardId,

    pub owner: PlayerId,

    pub rested: bool,

    /// Printed power when the instance was created.
    pub base_power: i64,

    /// Additive power change from effects and counters.
    pub power_modifier: i64,

    /// Additive cost change from effects.
    pub cost_modifier: i64,

    /// DON!! cards attached to this instance.
    pub attached_don: u32,

    /// Printed and granted keywords.
    pub keywords: KeywordSet,
}

impl CardInstance {
    /// Create an active instance, granting the definition's printed keywords.
    #[must_use]
    pub fn new(instance_id: InstanceId, definition: &CardDefinition, owner: PlayerId) -> Self {
        Self {
            instance_id,
            card_id: definition.id.clone(),
            owner,
            rested: false,
            base_power: definition.power,
            power_modifier: 0,
            cost_modifier: 0,
            attached_don: 0,
            keywords: definition.printed_keywords().collect(),
        }
    }

    /// Power used in battle: base + modifier + attached DON!! bonus.
    #[must_use]
    pub fn total_power(&self, don_power: i64) -> i64 {
        self.base_power + self.power_modifier + i64::from(self.attached_don) * don_power
    }

    /// Current cost, never below zero.
    #[must_use]
    pub fn effective_cost(&self, definition: &CardDefinition) -> i64 {
        (definition.cost + self.cost_modifier).max(0)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(keyword)
    }

    /// Active and holding `[Blocker]`.
    #[must_use]
    pub fn can_block(&self) -> bool {
        !self.rested && self.has_keyword(Keyword::Blocker)
    }

    pub fn rest(&mut self) {
        self.rested = true;
    }

    pub fn set_active(&mut self) {
        self.rested = false;
    }
}
