//! Match driver.
//!
//! Runs the loop every client of the engine runs: ask for the legal actions,
//! hand them to the decision-maker holding priority, apply the choice. The
//! loop stops on a decided game, the turn cap or the step cap.

use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::policy::{AgentError, DecisionMaker};
use crate::cards::{CardCatalog, DeckList};
use crate::core::{GameConfig, GameState, PlayerMap};
use crate::rules::{GameResult, RulesEngine};

/// Limits and setup for one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Stop with a draw once this turn number is passed.
    pub max_turns: u32,

    /// Hard bound on decisions, failed ones included.
    pub max_steps: usize,

    /// Seed for deck shuffles.
    pub seed: u64,

    pub game: GameConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_turns: 50,
            max_steps: 5_000,
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

impl MatchConfig {
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    pub fn with_max_steps(mut self, steps: usize) -> Self {
        self.max_steps = steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }
}

/// Summary of a finished match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchOutcome {
    pub result: GameResult,
    /// Turn number the match ended on.
    pub turns: u32,
    /// Actions applied.
    pub actions: usize,
    /// Choices the engine rejected.
    pub failed_actions: usize,
}

/// Plays matches between decision-makers.
pub struct MatchRunner<R: RulesEngine> {
    rules: R,
    config: MatchConfig,
}

impl<R: RulesEngine> MatchRunner<R> {
    pub fn new(rules: R, config: MatchConfig) -> Self {
        Self { rules, config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// A started game for the two decks under this runner's configuration.
    #[must_use]
    pub fn start(&self, catalog: Arc<CardCatalog>, decks: [DeckList; 2]) -> GameState {
        let mut state = GameState::new(catalog, decks, self.config.game.clone(), self.config.seed);
        state.start_game();
        state
    }

    /// Play `state` to completion.
    ///
    /// A rejected choice counts as a failed action; the agent is asked again
    /// on the next step, and the step cap keeps a stubborn agent from
    /// looping forever.
    pub fn play(
        &self,
        state: &mut GameState,
        agents: &mut PlayerMap<Box<dyn DecisionMaker>>,
    ) -> Result<MatchOutcome, AgentError> {
        let mut actions = 0;
        let mut failed_actions = 0;

        for _ in 0..self.config.max_steps {
            if self.rules.is_terminal(state).is_some() || state.turn > self.config.max_turns {
                break;
            }

            let legal = self.rules.legal_actions(state);
            let actor = self.rules.priority_player(state);
            let action = agents[actor].choose(state, &legal)?;

            match self.rules.apply_action(state, &action) {
                Ok(()) => actions += 1,
                Err(e) => {
                    warn!("{} ({actor}) chose an illegal action {action}: {e}", agents[actor].name());
                    failed_actions += 1;
                }
            }
        }

        let result = self.rules.is_terminal(state).unwrap_or(GameResult::Draw);
        info!(
            "match over after {} turns: {result:?} ({actions} actions, {failed_actions} failed)",
            state.turn
        );
        Ok(MatchOutcome {
            result,
            turns: state.turn,
            actions,
            failed_actions,
        })
    }
}
