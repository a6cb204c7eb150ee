//! One-ply greedy search.
//!
//! Every legal action is simulated on its own clone of the state. An action
//! that opens a battle is played out by passing every defender decision, so
//! an attack is scored by its best case rather than by a rested attacker.
//! Clones share nothing mutable, which lets candidates run on the `rayon`
//! pool; the winner is still chosen in list order.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::evaluator::Evaluator;
use super::policy::{AgentError, DecisionMaker};
use crate::core::{Action, ActionError, GameState, PlayerId};
use crate::rules::RulesEngine;

/// Greedy search configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Upper bound on defender passes while playing out a battle.
    pub max_autopass_steps: usize,

    /// Simulate candidates in parallel.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_autopass_steps: 5,
            parallel: true,
        }
    }
}

impl SearchConfig {
    pub fn with_max_autopass_steps(mut self, steps: usize) -> Self {
        self.max_autopass_steps = steps;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Picks the action whose simulated outcome evaluates best.
pub struct GreedySearchAgent<R: RulesEngine + Sync> {
    rules: R,
    evaluator: Evaluator,
    config: SearchConfig,
}

impl<R: RulesEngine + Sync> GreedySearchAgent<R> {
    pub fn new(rules: R, evaluator: Evaluator, config: SearchConfig) -> Self {
        Self {
            rules,
            evaluator,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Apply `action` to a clone and play out any battle it opens.
    pub fn simulate(&self, state: &GameState, action: &Action) -> Result<GameState, ActionError> {
        let mut sim = state.clone();
        self.rules.apply_action(&mut sim, action)?;

        let mut steps = 0;
        while steps < self.config.max_autopass_steps {
            let Some(battle) = sim.battle.as_ref() else {
                break;
            };
            let pass = Action::resolve_battle(battle.defender());
            self.rules.apply_action(&mut sim, &pass)?;
            steps += 1;
        }
        Ok(sim)
    }

    /// Score of the simulated outcome, `None` if the simulation failed.
    fn score(&self, state: &GameState, action: &Action, perspective: PlayerId) -> Option<f64> {
        match self.simulate(state, action) {
            Ok(sim) => Some(self.evaluator.evaluate(&sim, perspective)),
            Err(e) => {
                debug!("search: discarding {action}: {e}");
                None
            }
        }
    }

    /// Scores for every candidate, in list order.
    pub fn score_all(&self, state: &GameState, legal: &[Action]) -> Vec<Option<f64>> {
        let perspective = state.priority_player();
        if self.config.parallel {
            legal
                .par_iter()
                .map(|action| self.score(state, action, perspective))
                .collect()
        } else {
            legal
                .iter()
                .map(|action| self.score(state, action, perspective))
                .collect()
        }
    }
}

impl<R: RulesEngine + Sync> DecisionMaker for GreedySearchAgent<R> {
    fn name(&self) -> &str {
        "greedy-search"
    }

    fn choose(&mut self, state: &GameState, legal: &[Action]) -> Result<Action, AgentError> {
        let first = legal.first().ok_or(AgentError::NoLegalActions)?;

        let mut best = (first, f64::NEG_INFINITY);
        for (action, score) in legal.iter().zip(self.score_all(state, legal)) {
            if let Some(score) = score {
                if score > best.1 {
                    best = (action, score);
                }
            }
        }
        Ok(best.0.clone())
    }
}
