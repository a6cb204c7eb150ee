//! Player actions.
//!
//! Every action names the player who takes it. The engine compares that
//! player with whoever currently holds priority (the active player, or the
//! defender while a battle is open) before anything else.
//!
//! Hand cards are addressed by index. The index is validated before the card
//! is removed, so a rejected action never shifts the hand.

use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use super::phase::Phase;
use super::player::PlayerId;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use optcg_engine::core::{Action, ActionKind, InstanceId, PlayerId};
///
/// let attack = Action::attack(PlayerId::FIRST, InstanceId(0), InstanceId(1));
/// assert_eq!(attack.kind(), ActionKind::Attack);
/// assert_eq!(attack.player(), PlayerId::FIRST);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Play the hand card at `hand_index` to the field.
    ///
    /// `effect_target` is the explicit target for the card's on-play
    /// effects; when absent the engine picks a default.
    PlayCard {
        player: PlayerId,
        hand_index: usize,
        effect_target: Option<InstanceId>,
    },

    /// Declare an attack.
    Attack {
        player: PlayerId,
        attacker: InstanceId,
        target: InstanceId,
    },

    /// Intercept the current attack with a blocker.
    Block { player: PlayerId, blocker: InstanceId },

    /// Discard the hand card at `hand_index` for its counter value.
    Counter { player: PlayerId, hand_index: usize },

    /// Pass the current battle step.
    ResolveBattle { player: PlayerId },

    /// End the current phase.
    EndPhase { player: PlayerId },
}

/// Discriminant of an `Action`, for filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    PlayCard,
    Attack,
    Block,
    Counter,
    ResolveBattle,
    EndPhase,
}

impl Action {
    /// Play a hand card with engine-chosen effect targets.
    #[must_use]
    pub fn play(player: PlayerId, hand_index: usize) -> Self {
        Self::PlayCard {
            player,
            hand_index,
            effect_target: None,
        }
    }

    /// Play a hand card with an explicit on-play effect target.
    #[must_use]
    pub fn play_targeting(player: PlayerId, hand_index: usize, target: InstanceId) -> Self {
        Self::PlayCard {
            player,
            hand_index,
            effect_target: Some(target),
        }
    }

    #[must_use]
    pub fn attack(player: PlayerId, attacker: InstanceId, target: InstanceId) -> Self {
        Self::Attack {
            player,
            attacker,
            target,
        }
    }

    #[must_use]
    pub fn block(player: PlayerId, blocker: InstanceId) -> Self {
        Self::Block { player, blocker }
    }

    #[must_use]
    pub fn counter(player: PlayerId, hand_index: usize) -> Self {
        Self::Counter { player, hand_index }
    }

    #[must_use]
    pub fn resolve_battle(player: PlayerId) -> Self {
        Self::ResolveBattle { player }
    }

    #[must_use]
    pub fn end_phase(player: PlayerId) -> Self {
        Self::EndPhase { player }
    }

    /// The player taking this action.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Action::PlayCard { player, .. }
            | Action::Attack { player, .. }
            | Action::Block { player, .. }
            | Action::Counter { player, .. }
            | Action::ResolveBattle { player }
            | Action::EndPhase { player } => *player,
        }
    }

    /// The action's discriminant.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PlayCard { .. } => ActionKind::PlayCard,
            Action::Attack { .. } => ActionKind::Attack,
            Action::Block { .. } => ActionKind::Block,
            Action::Counter { .. } => ActionKind::Counter,
            Action::ResolveBattle { .. } => ActionKind::ResolveBattle,
            Action::EndPhase { .. } => ActionKind::EndPhase,
        }
    }

    /// Actions that only make sense inside a battle.
    #[must_use]
    pub fn is_battle_response(&self) -> bool {
        matches!(
            self.kind(),
            ActionKind::Block | ActionKind::Counter | ActionKind::ResolveBattle
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PlayCard { player, hand_index, .. } => {
                write!(f, "{player} plays hand[{hand_index}]")
            }
            Action::Attack { player, attacker, target } => {
                write!(f, "{player} attacks {target} with {attacker}")
            }
            Action::Block { player, blocker } => write!(f, "{player} blocks with {blocker}"),
            Action::Counter { player, hand_index } => {
                write!(f, "{player} counters with hand[{hand_index}]")
            }
            Action::ResolveBattle { player } => write!(f, "{player} passes"),
            Action::EndPhase { player } => write!(f, "{player} ends the phase"),
        }
    }
}

/// An applied action with the turn and phase it was taken in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: Action,
    pub turn: u32,
    pub phase: Phase,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, turn: u32, phase: Phase) -> Self {
        Self { action, turn, phase }
    }
}
