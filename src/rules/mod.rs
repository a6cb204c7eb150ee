//! Rules engine.
//!
//! - `RulesEngine`: legal actions, action application, terminal check
//! - `OnePieceRules`: phase flow, card play and the battle protocol
//! - `GameBuilder`: synthetic catalog and decks for a ready game
//!
//! The engine never decides for a player; agents pick from
//! `legal_actions` and submit through `apply_action`.

mod battle;
mod builder;
pub mod engine;
mod game;
mod legality;

pub use builder::GameBuilder;
pub use engine::{GameResult, RulesEngine};
pub use game::OnePieceRules;
pub use legality::legal_actions;
