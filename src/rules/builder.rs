//! Synthetic game setup.
//!
//! `GameBuilder` assembles a catalog and two decks from a small vanilla card
//! pool, so tests, property checks and agent matches can start a game
//! without any JSON card data.

use std::sync::Arc;

use super::game::OnePieceRules;
use crate::cards::{CardCatalog, CardCategory, CardDefinition, DeckList, Keyword};
use crate::core::{GameConfig, GameState};
use crate::effects::Effect;

/// Builder for a ready-to-play game.
///
/// ```
/// use optcg_engine::rules::GameBuilder;
/// use optcg_engine::core::Phase;
///
/// let (_rules, state) = GameBuilder::new().deck_size(20).build(42);
/// assert_eq!(state.phase, Phase::Refresh);
/// assert_eq!(state.players.iter().map(|(_, p)| p.life.len()).sum::<usize>(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    config: GameConfig,
    leader: CardDefinition,
    cards: Vec<CardDefinition>,
    deck_size: usize,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            leader: Self::test_leader(),
            cards: Self::vanilla_cards(),
            deck_size: 50,
        }
    }
}

impl GameBuilder {
    pub const LEADER_ID: &'static str = "TEST-L01";
    /// Cost 1, 2000 power, +1000 counter.
    pub const SMALL_ID: &'static str = "TEST-001";
    /// Cost 3, 4000 power, +1000 counter.
    pub const MEDIUM_ID: &'static str = "TEST-002";
    /// Cost 5, 6000 power, no counter.
    pub const LARGE_ID: &'static str = "TEST-003";
    /// Cost 2, 1000 power, `[Blocker]`, +2000 counter.
    pub const BLOCKER_ID: &'static str = "TEST-004";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 5000 power, 5 life.
    #[must_use]
    pub fn test_leader() -> CardDefinition {
        CardDefinition::new(Self::LEADER_ID, "Test Leader", CardCategory::Leader)
            .with_power(5000)
            .with_life(5)
    }

    /// The default card pool.
    #[must_use]
    pub fn vanilla_cards() -> Vec<CardDefinition> {
        vec![
            CardDefinition::new(Self::SMALL_ID, "Deckhand", CardCategory::Character)
                .with_cost(1)
                .with_power(2000)
                .with_counter(1000),
            CardDefinition::new(Self::MEDIUM_ID, "Navigator", CardCategory::Character)
                .with_cost(3)
                .with_power(4000)
                .with_counter(1000),
            CardDefinition::new(Self::LARGE_ID, "Captain", CardCategory::Character)
                .with_cost(5)
                .with_power(6000),
            CardDefinition::new(Self::BLOCKER_ID, "Shipwright", CardCategory::Character)
                .with_cost(2)
                .with_power(1000)
                .with_counter(2000)
                .with_effect_text("[Blocker]")
                .with_effect(Effect::keyword(Keyword::Blocker)),
        ]
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_leader(mut self, leader: CardDefinition) -> Self {
        self.leader = leader;
        self
    }

    /// Replace the card pool. Decks cycle through it in order.
    pub fn with_cards(mut self, cards: Vec<CardDefinition>) -> Self {
        self.cards = cards;
        self
    }

    pub fn deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Build and run the opening setup (shuffle, life, opening hand).
    #[must_use]
    pub fn build(self, seed: u64) -> (OnePieceRules, GameState) {
        let (rules, mut state) = self.build_unstarted(seed);
        state.start_game();
        (rules, state)
    }

    /// Build with unshuffled decks, empty hands and no life.
    #[must_use]
    pub fn build_unstarted(self, seed: u64) -> (OnePieceRules, GameState) {
        let deck_size = self.deck_size;
        let mut catalog = CardCatalog::new();
        let leader = catalog.insert(self.leader);
        let pool: Vec<Arc<CardDefinition>> = self.cards.into_iter().map(|def| catalog.insert(def)).collect();

        let deck = || {
            let cards = pool.iter().cycle().take(deck_size).cloned().collect();
            DeckList::new(Arc::clone(&leader), cards)
        };
        let decks = [deck(), deck()];
        let state = GameState::new(Arc::new(catalog), decks, self.config, seed);
        (OnePieceRules::new(), state)
    }
}
