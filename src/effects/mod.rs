//! Effect system for card abilities.
//!
//! - `Effect`: structured ability (timing, DON!! requirements, target, action, value)
//! - `TargetFilter`: which instances an effect may affect, with a string form
//! - `parse_effect_text`: best-effort card text reader
//! - `EffectResolver`: applies effects to game state

mod effect;
mod parser;
mod resolver;
mod targeting;

pub use effect::{Effect, EffectAction, EffectTiming};
pub use parser::{parse_effect_text, parse_effects, ParseReport};
pub(crate) use resolver::Destination;
pub use resolver::{EffectError, EffectResolver, FireReport};
pub use targeting::{TargetFilter, TargetOwner, TargetParseError, TargetZone};
