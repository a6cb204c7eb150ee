//! # optcg-engine
//!
//! A One Piece TCG rules engine built for simulation and search.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every action is checked against the same
//!    predicates that enumerate legal actions; a rejected action leaves the
//!    state untouched.
//!
//! 2. **Cheap, alias-free clones**: zone lists are `im` persistent vectors
//!    and definitions are shared `Arc`s, so search agents clone a state per
//!    candidate and mutate the copy freely, in parallel if they like.
//!
//! 3. **Text in, structure out**: printed effect text is parsed once at
//!    catalog load into structured `Effect`s, and the parser reports what it
//!    could not read.
//!
//! ## Modules
//!
//! - `core`: Instance IDs, players, phases, actions, battle state, game state, RNG, configuration
//! - `cards`: Card definitions, instances, keywords, catalog loading, decks
//! - `zones`: Per-player zones and the bounded character area
//! - `effects`: Effect model, target filters, text parser, resolver
//! - `rules`: `RulesEngine` trait, the One Piece rules, game builder
//! - `agents`: Evaluator, decision-makers, greedy search, match runner

pub mod agents;
pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, BattlePhase, BattleStep, GameConfig, GameRng, GameState,
    InstanceId, Phase, PlayerId, PlayerMap,
};

pub use crate::cards::{
    build_deck, CardCatalog, CardCategory, CardDefinition, CardId, CardInstance, DeckDescriptor, DeckList, Keyword,
};

pub use crate::zones::{CharacterArea, FieldSlot, Player};

pub use crate::effects::{parse_effect_text, Effect, EffectAction, EffectResolver, EffectTiming, ParseReport, TargetFilter};

pub use crate::rules::{GameBuilder, GameResult, OnePieceRules, RulesEngine};

pub use crate::agents::{
    DecisionMaker, Evaluator, EvaluatorWeights, GreedySearchAgent, MatchConfig, MatchOutcome, MatchRunner, RandomAgent,
    RuleBasedAgent, SearchConfig,
};
