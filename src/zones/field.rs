//! Character area.
//!
//! Holds a player's characters in play order up to a fixed capacity. A full
//! area rejects the insert and hands the card back unchanged, so callers can
//! validate capacity up front or recover the card without any reordering.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;

/// Insert into a full character area.
#[derive(Debug, Error)]
#[error("character area is full ({capacity} cards)")]
pub struct AreaFull {
    pub capacity: usize,
    /// The card that was not inserted.
    pub rejected: CardInstance,
}

/// Bounded, ordered list of characters in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterArea {
    cards: Vec<CardInstance>,
    capacity: usize,
}

impl CharacterArea {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a character at the end of the area.
    pub fn insert(&mut self, card: CardInstance) -> Result<(), AreaFull> {
        if self.is_full() {
            return Err(AreaFull {
                capacity: self.capacity,
                rejected: card,
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Remove a character by instance id, keeping the order of the rest.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pos = self.position(id)?;
        Some(self.cards.remove(pos))
    }

    #[must_use]
    pub fn position(&self, id: InstanceId) -> Option<usize> {
        self.cards.iter().position(|c| c.instance_id == id)
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.instance_id == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|c| c.instance_id == id)
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.iter_mut()
    }
}
