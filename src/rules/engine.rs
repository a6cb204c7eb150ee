//! Rules engine trait.
//!
//! A `RulesEngine` defines:
//! - What actions are legal for the player holding priority
//! - How actions modify state
//! - When the game is over
//!
//! Implementations are stateless with respect to a game: everything lives
//! in `GameState`, so one engine can drive many states, including clones
//! simulated in parallel.

use crate::core::{Action, ActionError, GameState, PlayerId};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Stopped without a winner (e.g. a match turn cap).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty once the game is decided
/// - `apply_action`: must be deterministic; a rejected action leaves the
///   state untouched
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Every legal action for the player holding priority.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Validate and apply an action.
    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), ActionError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// The player expected to act next.
    fn priority_player(&self, state: &GameState) -> PlayerId {
        state.priority_player()
    }

    /// Whether `action` is in the legal action list.
    fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.legal_actions(state).contains(action)
    }
}
