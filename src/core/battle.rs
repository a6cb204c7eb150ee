//! Battle state.
//!
//! A `BattlePhase` exists only between an attack declaration and its
//! resolution. While it is set the defender holds priority and no phase
//! transition may happen.
//!
//! Power values are snapshots: the attacker's is frozen when the attack is
//! declared, the target's is taken at declaration, retaken on a block, and
//! raised by each counter.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::player::PlayerId;
use crate::cards::CardId;

/// Step of an open battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleStep {
    Block,
    Counter,
}

/// An attack in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePhase {
    pub attacking_player: PlayerId,
    pub attacker: InstanceId,
    pub target: InstanceId,
    pub step: BattleStep,
    pub attacker_power: i64,
    pub target_power: i64,
    pub blocker: Option<InstanceId>,
    /// Cards discarded as counters, in play order.
    pub counter_cards: Vec<CardId>,
    /// Total counter power added to the current target.
    pub counter_bonus: i64,
}

impl BattlePhase {
    /// Open a battle in the block step.
    #[must_use]
    pub fn new(
        attacking_player: PlayerId,
        attacker: InstanceId,
        target: InstanceId,
        attacker_power: i64,
        target_power: i64,
    ) -> Self {
        Self {
            attacking_player,
            attacker,
            target,
            step: BattleStep::Block,
            attacker_power,
            target_power,
            blocker: None,
            counter_cards: Vec::new(),
            counter_bonus: 0,
        }
    }

    /// The player being attacked, who holds priority during the battle.
    #[must_use]
    pub fn defender(&self) -> PlayerId {
        self.attacking_player.opponent()
    }

    /// Redirect the attack to `blocker` and move to the counter step.
    pub fn redirect(&mut self, blocker: InstanceId, blocker_power: i64) {
        self.blocker = Some(blocker);
        self.target = blocker;
        self.target_power = blocker_power;
        self.step = BattleStep::Counter;
    }

    /// Record a counter card and raise the target snapshot.
    pub fn add_counter(&mut self, card: CardId, value: i64) {
        self.counter_cards.push(card);
        self.counter_bonus += value;
        self.target_power += value;
    }

    /// The attack hits when attacker power meets or beats target power.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        self.attacker_power >= self.target_power
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battle(attacker_power: i64, target_power: i64) -> BattlePhase {
        BattlePhase::new(PlayerId::FIRST, InstanceId(0), InstanceId(1), attacker_power, target_power)
    }

    #[test]
    fn test_new_battle_starts_in_block_step() {
        let b = battle(5000, 5000);
        assert_eq!(b.step, BattleStep::Block);
        assert_eq!(b.defender(), PlayerId::SECOND);
        assert!(b.blocker.is_none());
    }

    #[test]
    fn test_tie_favors_attacker() {
        assert!(battle(5000, 5000).is_hit());
        assert!(!battle(4000, 5000).is_hit());
    }

    #[test]
    fn test_redirect() {
        let mut b = battle(5000, 5000);
        b.redirect(InstanceId(9), 1000);

        assert_eq!(b.target, InstanceId(9));
        assert_eq!(b.blocker, Some(InstanceId(9)));
        assert_eq!(b.target_power, 1000);
        assert_eq!(b.step, BattleStep::Counter);
    }

    #[test]
    fn test_counter_raises_target() {
        let mut b = battle(5000, 5000);
        b.add_counter(CardId::from("OP01-016"), 1000);

        assert_eq!(b.target_power, 6000);
        assert_eq!(b.counter_bonus, 1000);
        assert_eq!(b.counter_cards.len(), 1);
        assert!(!b.is_hit());
    }
}
