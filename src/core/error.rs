//! Illegal-action errors.
//!
//! Every variant means the action was rejected before any mutation; the
//! state is exactly as it was before the call.

use thiserror::Error;

use super::battle::BattleStep;
use super::entity::InstanceId;
use super::phase::Phase;
use super::player::PlayerId;
use crate::cards::CardId;

/// Reason an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is already decided")]
    GameOver,

    #[error("{actor} cannot act now, {expected} holds priority")]
    WrongActor { actor: PlayerId, expected: PlayerId },

    #[error("a battle is in progress")]
    BattleInProgress,

    #[error("no battle is in progress")]
    NoBattle,

    #[error("action is not legal in the {0:?} battle step")]
    WrongBattleStep(BattleStep),

    #[error("action requires the main phase (current: {0})")]
    NotMainPhase(Phase),

    #[error("hand index {index} out of range (hand size {size})")]
    HandIndex { index: usize, size: usize },

    #[error("card {0} cannot be played to the field")]
    NotPlayable(CardId),

    #[error("character area is full ({0} cards)")]
    CharacterAreaFull(usize),

    #[error("stage slot is occupied")]
    StageOccupied,

    #[error("instance {0} not found")]
    InstanceNotFound(InstanceId),

    #[error("instance {0} cannot attack for the active player")]
    InvalidAttacker(InstanceId),

    #[error("instance {0} is rested")]
    Rested(InstanceId),

    #[error("instance {0} cannot block")]
    NotBlocker(InstanceId),

    #[error("instance {0} is not a legal attack target")]
    InvalidTarget(InstanceId),

    #[error("card {0} has no counter value")]
    NoCounter(CardId),
}
