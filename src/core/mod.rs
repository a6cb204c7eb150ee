//! Core engine types: ids, players, phases, actions, battle, state, RNG, configuration.

pub mod action;
pub mod battle;
pub mod config;
pub mod entity;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord};
pub use battle::{BattlePhase, BattleStep};
pub use config::GameConfig;
pub use entity::InstanceId;
pub use error::ActionError;
pub use phase::Phase;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::GameState;
