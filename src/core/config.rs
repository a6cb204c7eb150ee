//! Rule constants for a game.
//!
//! `GameConfig` collects the numbers the rules refer to (area capacity,
//! opening hand, DON!! power) plus a few switches for behaviour that is
//! still a simplification of the printed rules. It lives inside `GameState`
//! so a cloned state always simulates under the same rules.

use serde::{Deserialize, Serialize};

/// Game rule configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum characters in a character area.
    pub character_area_capacity: usize,

    /// Cards drawn at game start.
    pub starting_hand_size: usize,

    /// Life cards used when the leader definition carries no life value.
    pub default_life: usize,

    /// Power each attached DON!! card adds to its instance.
    pub don_power: i64,

    /// Cards in each player's DON!! deck.
    pub don_deck_size: u32,

    /// Draw one card on entering the draw phase (skipped on turn 1).
    pub draw_on_draw_phase: bool,

    /// Allow attacks against rested opponent characters, not just the leader.
    pub attack_rested_characters: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            character_area_capacity: 5,
            starting_hand_size: 5,
            default_life: 5,
            don_power: 1000,
            don_deck_size: 10,
            draw_on_draw_phase: true,
            attack_rested_characters: true,
        }
    }
}

impl GameConfig {
    /// Set the character area capacity.
    pub fn with_character_area_capacity(mut self, capacity: usize) -> Self {
        self.character_area_capacity = capacity;
        self
    }

    /// Set the opening hand size.
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Set the fallback life count.
    pub fn with_default_life(mut self, life: usize) -> Self {
        self.default_life = life;
        self
    }

    /// Enable or disable the draw-phase draw.
    pub fn with_draw_on_draw_phase(mut self, enabled: bool) -> Self {
        self.draw_on_draw_phase = enabled;
        self
    }

    /// Enable or disable attacks on rested characters.
    pub fn with_attack_rested_characters(mut self, enabled: bool) -> Self {
        self.attack_rested_characters = enabled;
        self
    }
}
