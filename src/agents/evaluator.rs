//! Heuristic state evaluation.
//!
//! A linear score over material differences between a player and the
//! opponent. Life dominates; hand size and board presence follow; raw power
//! only breaks ties between otherwise equal boards.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PlayerId};

/// Weights of the linear evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorWeights {
    /// Per life card.
    pub life: f64,
    /// Per hand card.
    pub hand: f64,
    /// Per point of leader plus character power.
    pub board_power: f64,
    /// Per character in play.
    pub characters: f64,
    /// Per character holding `[Blocker]`.
    pub blockers: f64,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        Self {
            life: 1000.0,
            hand: 50.0,
            board_power: 0.1,
            characters: 100.0,
            blockers: 300.0,
        }
    }
}

/// Scores states from one player's point of view.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    weights: EvaluatorWeights,
}

impl Evaluator {
    #[must_use]
    pub fn new(weights: EvaluatorWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &EvaluatorWeights {
        &self.weights
    }

    /// `+inf` for a won game, `-inf` for a lost one, otherwise the weighted
    /// sum of `perspective`'s advantages over the opponent.
    #[must_use]
    pub fn evaluate(&self, state: &GameState, perspective: PlayerId) -> f64 {
        if let Some(winner) = state.winner {
            return if winner == perspective {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }

        let me = &state.players[perspective];
        let them = &state.players[perspective.opponent()];
        let don_power = state.config.don_power;
        let diff = |a: usize, b: usize| a as f64 - b as f64;

        let w = &self.weights;
        diff(me.life.len(), them.life.len()) * w.life
            + diff(me.hand.len(), them.hand.len()) * w.hand
            + (me.board_power(don_power) - them.board_power(don_power)) as f64 * w.board_power
            + diff(me.characters.len(), them.characters.len()) * w.characters
            + diff(me.blocker_count(), them.blocker_count()) * w.blockers
    }
}
