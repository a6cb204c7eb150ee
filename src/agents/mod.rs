//! Decision-makers and the match driver.
//!
//! - `DecisionMaker`: picks one action from the legal list
//! - `RandomAgent`, `RuleBasedAgent`: baselines
//! - `GreedySearchAgent`: one-ply lookahead scored by `Evaluator`
//! - `MatchRunner`: plays a game between two decision-makers

mod evaluator;
mod policy;
mod runner;
mod search;

pub use evaluator::{Evaluator, EvaluatorWeights};
pub use policy::{AgentError, DecisionMaker, RandomAgent, RuleBasedAgent};
pub use runner::{MatchConfig, MatchOutcome, MatchRunner};
pub use search::{GreedySearchAgent, SearchConfig};
