//! Per-player zones.
//!
//! ## Card Representation
//!
//! - Deck, hand, life and trash hold shared definitions
//!   (`Arc<CardDefinition>`) in persistent `im::Vector`s. Cloning a player
//!   is cheap and a clone never observes later pushes or pops on the
//!   original.
//! - Leader, characters and stage hold `CardInstance` values.
//!
//! ## Ordering
//!
//! - Deck: index 0 is the top; draws take from the front.
//! - Life: index 0 is the top card; losing life moves it to the hand.
//! - Hand: ordered and addressed by index; new cards go to the end.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::don::DonPool;
use super::field::CharacterArea;
use crate::cards::{CardDefinition, CardInstance, Keyword};
use crate::core::config::GameConfig;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// Where an instance sits on its owner's field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldSlot {
    Leader,
    Character,
    Stage,
}

/// All zones belonging to one player.
#[derive(Clone, Debug)]
pub struct Player {
    pub id: PlayerId,

    // === Field ===
    pub leader: CardInstance,
    /// Definition of the leader, which may be a mock absent from the catalog.
    pub leader_card: Arc<CardDefinition>,
    pub characters: CharacterArea,
    pub stage: Option<CardInstance>,

    // === Card Zones ===
    pub deck: Vector<Arc<CardDefinition>>,
    pub hand: Vector<Arc<CardDefinition>>,
    pub life: Vector<Arc<CardDefinition>>,
    pub trash: Vector<Arc<CardDefinition>>,

    pub don: DonPool,
}

impl Player {
    /// Seat a player with a leader instance and an unshuffled deck.
    pub fn new(
        id: PlayerId,
        leader: CardInstance,
        leader_card: Arc<CardDefinition>,
        deck: impl IntoIterator<Item = Arc<CardDefinition>>,
        config: &GameConfig,
    ) -> Self {
        Self {
            id,
            leader,
            leader_card,
            characters: CharacterArea::new(config.character_area_capacity),
            stage: None,
            deck: deck.into_iter().collect(),
            hand: Vector::new(),
            life: Vector::new(),
            trash: Vector::new(),
            don: DonPool::new(config.don_deck_size),
        }
    }

    // === Deck / Hand / Life ===

    /// Draw the top card of the deck into the hand.
    pub fn draw(&mut self) -> Option<Arc<CardDefinition>> {
        let card = self.deck.pop_front()?;
        self.hand.push_back(Arc::clone(&card));
        Some(card)
    }

    /// Draw up to `count` cards, returning how many were drawn.
    pub fn draw_n(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw().is_some()).count()
    }

    /// Move up to `count` cards from the top of the deck to life.
    pub fn fill_life(&mut self, count: usize) -> usize {
        let mut moved = 0;
        while moved < count {
            let Some(card) = self.deck.pop_front() else {
                break;
            };
            self.life.push_back(card);
            moved += 1;
        }
        moved
    }

    /// Move the top life card to the hand. `None` when life is empty.
    pub fn lose_life(&mut self) -> Option<Arc<CardDefinition>> {
        let card = self.life.pop_front()?;
        self.hand.push_back(Arc::clone(&card));
        Some(card)
    }

    /// Move the top life card to the trash. `None` when life is empty.
    pub fn trash_life(&mut self) -> Option<Arc<CardDefinition>> {
        let card = self.life.pop_front()?;
        self.trash.push_back(Arc::clone(&card));
        Some(card)
    }

    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<&Arc<CardDefinition>> {
        self.hand.get(index)
    }

    /// Remove the hand card at `index`. Out-of-range indices leave the hand untouched.
    pub fn take_from_hand(&mut self, index: usize) -> Option<Arc<CardDefinition>> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Discard up to `count` cards from the end of the hand.
    pub fn discard_from_end(&mut self, count: usize) -> usize {
        let mut discarded = 0;
        while discarded < count {
            let Some(card) = self.hand.pop_back() else {
                break;
            };
            self.trash.push_back(card);
            discarded += 1;
        }
        discarded
    }

    // === Field ===

    /// Find an instance on this player's field.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<(FieldSlot, &CardInstance)> {
        if self.leader.instance_id == id {
            return Some((FieldSlot::Leader, &self.leader));
        }
        if let Some(card) = self.characters.get(id) {
            return Some((FieldSlot::Character, card));
        }
        self.stage
            .as_ref()
            .filter(|s| s.instance_id == id)
            .map(|s| (FieldSlot::Stage, s))
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        if self.leader.instance_id == id {
            return Some(&mut self.leader);
        }
        if let Some(card) = self.characters.get_mut(id) {
            return Some(card);
        }
        self.stage.as_mut().filter(|s| s.instance_id == id)
    }

    /// Take a character or stage off the field. The leader is never removed.
    pub fn remove_from_field(&mut self, id: InstanceId) -> Option<CardInstance> {
        if let Some(card) = self.characters.remove(id) {
            return Some(card);
        }
        if self.stage.as_ref().is_some_and(|s| s.instance_id == id) {
            return self.stage.take();
        }
        None
    }

    /// Leader followed by characters in play order.
    pub fn battlers(&self) -> impl Iterator<Item = &CardInstance> {
        std::iter::once(&self.leader).chain(self.characters.iter())
    }

    /// Set leader, characters and stage active.
    pub fn refresh(&mut self) {
        self.leader.set_active();
        for card in self.characters.iter_mut() {
            card.set_active();
        }
        if let Some(stage) = self.stage.as_mut() {
            stage.set_active();
        }
    }

    // === Summary ===

    /// Total power of leader and characters.
    #[must_use]
    pub fn board_power(&self, don_power: i64) -> i64 {
        self.battlers().map(|c| c.total_power(don_power)).sum()
    }

    /// Characters holding `[Blocker]`, rested or not.
    #[must_use]
    pub fn blocker_count(&self) -> usize {
        self.characters
            .iter()
            .filter(|c| c.has_keyword(Keyword::Blocker))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCategory;

    fn card(id: &str) -> Arc<CardDefinition> {
        Arc::new(CardDefinition::new(id, id, CardCategory::Character).with_power(1000))
    }

    fn player(deck_size: usize) -> Player {
        let leader_def = Arc::new(CardDefinition::mock_leader(&"L".into()));
        let leader = CardInstance::new(InstanceId(0), &leader_def, PlayerId::FIRST);
        let deck = (0..deck_size).map(|i| card(&format!("C{i}")));
        Player::new(PlayerId::FIRST, leader, leader_def, deck, &GameConfig::default())
    }

    #[test]
    fn test_draw_from_front() {
        let mut p = player(3);
        let drawn = p.draw().unwrap();
        assert_eq!(drawn.id.as_str(), "C0");
        assert_eq!(p.hand.len(), 1);
        assert_eq!(p.deck.len(), 2);

        assert_eq!(p.draw_n(5), 2);
        assert!(p.draw().is_none());
    }

    #[test]
    fn test_life_top_goes_to_hand() {
        let mut p = player(10);
        assert_eq!(p.fill_life(5), 5);

        let lost = p.lose_life().unwrap();
        assert_eq!(lost.id.as_str(), "C0");
        assert_eq!(p.life.len(), 4);
        assert_eq!(p.hand.back().unwrap().id.as_str(), "C0");
    }

    #[test]
    fn test_take_from_hand_out_of_range() {
        let mut p = player(3);
        p.draw_n(2);
        assert!(p.take_from_hand(2).is_none());
        assert_eq!(p.hand.len(), 2);

        let taken = p.take_from_hand(0).unwrap();
        assert_eq!(taken.id.as_str(), "C0");
        assert_eq!(p.hand[0].id.as_str(), "C1");
    }

    #[test]
    fn test_discard_from_end() {
        let mut p = player(4);
        p.draw_n(3);
        assert_eq!(p.discard_from_end(2), 2);
        assert_eq!(p.hand.len(), 1);
        assert_eq!(p.hand[0].id.as_str(), "C0");
        assert_eq!(p.trash.len(), 2);
    }

    #[test]
    fn test_leader_not_removable() {
        let mut p = player(0);
        assert!(p.remove_from_field(InstanceId(0)).is_none());
        assert!(matches!(p.instance(InstanceId(0)), Some((FieldSlot::Leader, _))));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut p = player(5);
        let snapshot = p.clone();

        p.draw_n(2);
        p.leader.power_modifier += 1000;

        assert_eq!(snapshot.deck.len(), 5);
        assert!(snapshot.hand.is_empty());
        assert_eq!(snapshot.leader.power_modifier, 0);
    }
}
