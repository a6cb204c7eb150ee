//! Deck descriptors and deck construction.
//!
//! A `DeckDescriptor` names a leader and a list of `{id, quantity}` entries.
//! Building a deck resolves every id against the catalog. Missing data is
//! recovered rather than rejected: an unknown leader is replaced by a mock
//! leader, unknown cards are dropped.

use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use super::definition::{CardCategory, CardDefinition, CardId};
use super::registry::CardCatalog;

fn default_quantity() -> u32 {
    1
}

/// One line of a deck list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub id: CardId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Deck file contents: leader id plus card entries.
///
/// ## Example
///
/// ```
/// use optcg_engine::cards::DeckDescriptor;
///
/// let deck: DeckDescriptor = serde_json::from_str(
///     r#"{"leader": "ST01-001", "cards": [{"id": "ST01-002", "quantity": 4}]}"#,
/// ).unwrap();
///
/// assert_eq!(deck.card_count(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDescriptor {
    pub leader: CardId,
    #[serde(default)]
    pub cards: Vec<DeckEntry>,
}

impl DeckDescriptor {
    #[must_use]
    pub fn new(leader: impl Into<String>) -> Self {
        Self {
            leader: CardId::new(leader),
            cards: Vec::new(),
        }
    }

    /// Add `quantity` copies of a card.
    #[must_use]
    pub fn with_card(mut self, id: impl Into<String>, quantity: u32) -> Self {
        self.cards.push(DeckEntry {
            id: CardId::new(id),
            quantity,
        });
        self
    }

    /// Total number of cards listed, leader excluded.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.iter().map(|e| e.quantity as usize).sum()
    }
}

/// A resolved deck ready to seat at a game.
#[derive(Clone, Debug)]
pub struct DeckList {
    pub leader: Arc<CardDefinition>,
    /// Main deck in list order (shuffled at game start).
    pub cards: Vec<Arc<CardDefinition>>,
}

impl DeckList {
    #[must_use]
    pub fn new(leader: Arc<CardDefinition>, cards: Vec<Arc<CardDefinition>>) -> Self {
        Self { leader, cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Result of resolving a descriptor, with what had to be recovered.
#[derive(Clone, Debug)]
pub struct DeckBuild {
    pub deck: DeckList,
    /// The leader id was unknown (or not a leader) and a mock was used.
    pub mock_leader: bool,
    /// Card ids that were not found and were left out.
    pub missing: Vec<CardId>,
}

/// Resolve a descriptor against the catalog.
pub fn build_deck(catalog: &CardCatalog, descriptor: &DeckDescriptor) -> DeckBuild {
    let (leader, mock_leader) = match catalog.get(&descriptor.leader) {
        Some(def) if def.category == CardCategory::Leader => (Arc::clone(def), false),
        Some(_) => {
            warn!("Card {} is not a leader, using a mock leader", descriptor.leader);
            (Arc::new(CardDefinition::mock_leader(&descriptor.leader)), true)
        }
        None => {
            warn!("Leader {} not found, using a mock leader", descriptor.leader);
            (Arc::new(CardDefinition::mock_leader(&descriptor.leader)), true)
        }
    };

    let mut cards = Vec::with_capacity(descriptor.card_count());
    let mut missing = Vec::new();
    for entry in &descriptor.cards {
        match catalog.get(&entry.id) {
            Some(def) => {
                cards.extend(std::iter::repeat_with(|| Arc::clone(def)).take(entry.quantity as usize));
            }
            None => {
                warn!("Card {} not found in catalog, skipping", entry.id);
                missing.push(entry.id.clone());
            }
        }
    }

    DeckBuild {
        deck: DeckList::new(leader, cards),
        mock_leader,
        missing,
    }
}
