//! Turn phases.
//!
//! A turn runs REFRESH → DRAW → DON → MAIN → END, after which the next
//! player's REFRESH begins. `Phase::next` is the pure transition function;
//! the side effects of entering a phase (turn swap, untapping, the draw)
//! are applied by the rules engine.

use serde::{Deserialize, Serialize};

/// A phase of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Refresh,
    Draw,
    Don,
    Main,
    End,
}

impl Phase {
    /// All phases in turn order.
    pub const ALL: [Phase; 5] = [Phase::Refresh, Phase::Draw, Phase::Don, Phase::Main, Phase::End];

    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Phase::Refresh => Phase::Draw,
            Phase::Draw => Phase::Don,
            Phase::Don => Phase::Main,
            Phase::Main => Phase::End,
            Phase::End => Phase::Refresh,
        }
    }

    /// Entering this phase starts a new turn.
    #[must_use]
    pub const fn starts_turn(self) -> bool {
        matches!(self, Phase::Refresh)
    }

    /// Upper-case display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Refresh => "REFRESH_PHASE",
            Phase::Draw => "DRAW_PHASE",
            Phase::Don => "DON_PHASE",
            Phase::Main => "MAIN_PHASE",
            Phase::End => "END_PHASE",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles() {
        let mut phase = Phase::Refresh;
        for expected in [Phase::Draw, Phase::Don, Phase::Main, Phase::End, Phase::Refresh] {
            phase = phase.next();
            assert_eq!(phase, expected);
        }
    }

    #[test]
    fn test_only_refresh_starts_turn() {
        let starters: Vec<_> = Phase::ALL.iter().filter(|p| p.starts_turn()).collect();
        assert_eq!(starters, vec![&Phase::Refresh]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::Main.to_string(), "MAIN_PHASE");
    }
}
