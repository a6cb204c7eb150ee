//! Game state.
//!
//! ## GameState
//!
//! The root aggregate of a game:
//! - Turn counter, phase, active player, winner
//! - The open battle, if any (at most one)
//! - Both players' zones
//! - Rule configuration, catalog handle, RNG, action history
//!
//! ## Cloning
//!
//! `GameState` is `Clone` with no shared mutable data. Zone lists are `im`
//! persistent vectors, definitions are immutable `Arc`s, instances are plain
//! values and the catalog is a read-only `Arc`. Search code clones a state
//! per candidate action and mutates the clone freely.

use std::sync::Arc;

use im::Vector;
use log::{debug, info};

use super::action::{Action, ActionRecord};
use super::battle::BattlePhase;
use super::config::GameConfig;
use super::entity::InstanceId;
use super::phase::Phase;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardCatalog, CardDefinition, CardId, CardInstance, DeckList};
use crate::zones::{FieldSlot, Player};

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    // === Game Progression ===
    /// Turn number (starts at 1).
    pub turn: u32,
    pub phase: Phase,
    /// Player whose turn it is.
    pub active_player: PlayerId,
    /// Set once the game is decided.
    pub winner: Option<PlayerId>,
    pub battle: Option<BattlePhase>,

    // === Players ===
    pub players: PlayerMap<Player>,

    // === Rules ===
    pub config: GameConfig,
    catalog: Arc<CardCatalog>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Next instance ID to allocate.
    next_instance_id: InstanceId,

    /// Applied actions in order.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Seat both players with their leaders and unshuffled decks.
    ///
    /// The game starts on turn 1 in the refresh phase with the first deck's
    /// player active. Call `start_game` to shuffle, set life and draw.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, decks: [DeckList; 2], config: GameConfig, seed: u64) -> Self {
        let [first, second] = decks;
        let seat = |id: PlayerId, deck: DeckList| {
            let leader = CardInstance::new(InstanceId(u32::from(id.0)), &deck.leader, id);
            Player::new(id, leader, deck.leader, deck.cards, &config)
        };
        let players = PlayerMap::from_pair(seat(PlayerId::FIRST, first), seat(PlayerId::SECOND, second));

        Self {
            turn: 1,
            phase: Phase::Refresh,
            active_player: PlayerId::FIRST,
            winner: None,
            battle: None,
            players,
            config,
            catalog,
            rng: GameRng::new(seed),
            next_instance_id: InstanceId(2),
            history: Vector::new(),
        }
    }

    /// Opening setup: shuffle each deck, set life from the leader, draw the hand.
    pub fn start_game(&mut self) {
        for player in PlayerId::all() {
            self.shuffle_deck(player);

            let default_life = self.config.default_life;
            let hand_size = self.config.starting_hand_size;
            let p = &mut self.players[player];
            let life = match p.leader_card.life {
                0 => default_life,
                n => n as usize,
            };
            p.fill_life(life);
            p.draw_n(hand_size);

            info!(
                "{player} ready: leader {}, life {}, hand {}, deck {}",
                p.leader_card.id,
                p.life.len(),
                p.hand.len(),
                p.deck.len()
            );
        }
    }

    /// Shuffle a player's deck with the game RNG.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        let mut cards: Vec<_> = self.players[player].deck.iter().cloned().collect();
        self.rng.shuffle(&mut cards);
        self.players[player].deck = cards.into_iter().collect();
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// The player allowed to act: the defender during a battle, otherwise the active player.
    #[must_use]
    pub fn priority_player(&self) -> PlayerId {
        self.battle
            .as_ref()
            .map_or(self.active_player, BattlePhase::defender)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // === Instances ===

    /// The ID the next allocation will return.
    #[must_use]
    pub fn next_instance_id(&self) -> InstanceId {
        self.next_instance_id
    }

    /// Allocate a new instance ID.
    pub fn alloc_instance_id(&mut self) -> InstanceId {
        let id = self.next_instance_id;
        self.next_instance_id = id.next();
        id
    }

    /// Create an instance of `definition` owned by `owner` with a fresh ID.
    pub fn spawn_instance(&mut self, definition: &CardDefinition, owner: PlayerId) -> CardInstance {
        let id = self.alloc_instance_id();
        CardInstance::new(id, definition, owner)
    }

    /// Find an instance on either field: leader, then characters, then stage,
    /// first player first.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<(PlayerId, FieldSlot, &CardInstance)> {
        self.players
            .iter()
            .find_map(|(pid, p)| p.instance(id).map(|(slot, card)| (pid, slot, card)))
    }

    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.locate(id).map(|(_, _, card)| card)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        let (owner, _, _) = self.locate(id)?;
        self.players[owner].instance_mut(id)
    }

    /// Battle power of an instance under this game's DON!! power.
    #[must_use]
    pub fn total_power(&self, card: &CardInstance) -> i64 {
        card.total_power(self.config.don_power)
    }

    // === Definitions ===

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    /// Look up a definition in the catalog.
    #[must_use]
    pub fn definition(&self, id: &CardId) -> Option<&Arc<CardDefinition>> {
        self.catalog.get(id)
    }

    /// Definition behind an instance, including mock leaders.
    #[must_use]
    pub fn definition_of(&self, card: &CardInstance) -> Option<Arc<CardDefinition>> {
        let leader_card = &self.players[card.owner].leader_card;
        if self.players[card.owner].leader.instance_id == card.instance_id {
            return Some(Arc::clone(leader_card));
        }
        self.catalog.get(&card.card_id).cloned()
    }

    /// Current cost of an instance, `None` if its definition is unknown.
    #[must_use]
    pub fn instance_cost(&self, card: &CardInstance) -> Option<i64> {
        self.definition_of(card).map(|def| card.effective_cost(&def))
    }

    // === History ===

    /// Record an applied action taken during `turn`/`phase`.
    pub fn record(&mut self, action: Action, turn: u32, phase: Phase) {
        debug!("turn {turn} {phase}: {action}");
        self.history.push_back(ActionRecord::new(action, turn, phase));
    }
}
