//! Card zones.
//!
//! ## Key Types
//!
//! - `Player`: deck, hand, life, trash, field and DON!! pool of one player
//! - `CharacterArea`: bounded character zone (insert fails when full)
//! - `FieldSlot`: leader / character / stage position of an instance
//! - `DonPool`: DON!! counters

pub mod don;
pub mod field;
pub mod player;

pub use don::DonPool;
pub use field::{AreaFull, CharacterArea};
pub use player::{FieldSlot, Player};
