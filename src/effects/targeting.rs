//! Effect targeting.
//!
//! A `TargetFilter` says which instances an effect may affect. Filters have
//! a compact string form used in card data and parser output:
//!
//! - `self`: the effect's source
//! - `leader`: the controller's leader
//! - `opponent|character|cost<=3`: `|`-separated owner, zone and cost parts,
//!   each optional (`any` when all are absent)
//!
//! When an effect is fired without an explicit target, `select_default`
//! picks one deterministically.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardInstance;
use crate::core::{GameState, InstanceId, PlayerId};
use crate::zones::FieldSlot;

/// Whose instances a filter accepts, relative to the effect's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetOwner {
    Any,
    Own,
    Opponent,
}

/// Which field slot a filter accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetZone {
    Any,
    Leader,
    Character,
}

/// Target filter for an effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetFilter {
    /// The source instance.
    Source,
    /// The controller's leader.
    Leader,
    /// Any instance matching owner, zone and an optional cost ceiling.
    Select {
        owner: TargetOwner,
        zone: TargetZone,
        max_cost: Option<i64>,
    },
}

/// Malformed filter string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized target filter part {0:?}")]
pub struct TargetParseError(pub String);

impl TargetFilter {
    /// `opponent|character`, optionally with a cost ceiling.
    #[must_use]
    pub fn opponent_character(max_cost: Option<i64>) -> Self {
        Self::Select {
            owner: TargetOwner::Opponent,
            zone: TargetZone::Character,
            max_cost,
        }
    }

    /// Whether `card` in `slot` satisfies this filter for an effect
    /// controlled by `controller` with source `source`.
    #[must_use]
    pub fn matches(
        &self,
        state: &GameState,
        controller: PlayerId,
        source: InstanceId,
        card: &CardInstance,
        slot: FieldSlot,
    ) -> bool {
        match self {
            TargetFilter::Source => card.instance_id == source,
            TargetFilter::Leader => card.owner == controller && slot == FieldSlot::Leader,
            TargetFilter::Select {
                owner,
                zone,
                max_cost,
            } => {
                let owner_ok = match owner {
                    TargetOwner::Any => true,
                    TargetOwner::Own => card.owner == controller,
                    TargetOwner::Opponent => card.owner != controller,
                };
                let zone_ok = match zone {
                    TargetZone::Any => slot != FieldSlot::Stage,
                    TargetZone::Leader => slot == FieldSlot::Leader,
                    TargetZone::Character => slot == FieldSlot::Character,
                };
                let cost_ok = match max_cost {
                    None => true,
                    Some(max) => state.instance_cost(card).is_some_and(|cost| cost <= *max),
                };
                owner_ok && zone_ok && cost_ok
            }
        }
    }

    /// Default target when the caller gave none.
    ///
    /// `self` picks the source and `leader` the controller's leader. Other
    /// filters scan the opponent's field first, then the controller's, each
    /// leader first and then characters in play order.
    #[must_use]
    pub fn select_default(
        &self,
        state: &GameState,
        controller: PlayerId,
        source: InstanceId,
    ) -> Option<InstanceId> {
        match self {
            TargetFilter::Source => Some(source),
            TargetFilter::Leader => Some(state.players[controller].leader.instance_id),
            TargetFilter::Select { .. } => [controller.opponent(), controller]
                .into_iter()
                .flat_map(move |pid| {
                    let p = &state.players[pid];
                    std::iter::once((FieldSlot::Leader, &p.leader))
                        .chain(p.characters.iter().map(|c| (FieldSlot::Character, c)))
                })
                .find(|(slot, card)| self.matches(state, controller, source, card, *slot))
                .map(|(_, card)| card.instance_id),
        }
    }
}

impl std::fmt::Display for TargetFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetFilter::Source => f.write_str("self"),
            TargetFilter::Leader => f.write_str("leader"),
            TargetFilter::Select {
                owner,
                zone,
                max_cost,
            } => {
                let mut parts: Vec<String> = Vec::new();
                match owner {
                    TargetOwner::Any => {}
                    TargetOwner::Own => parts.push("own".into()),
                    TargetOwner::Opponent => parts.push("opponent".into()),
                }
                match zone {
                    TargetZone::Any => {}
                    TargetZone::Leader => parts.push("leader".into()),
                    TargetZone::Character => parts.push("character".into()),
                }
                if let Some(max) = max_cost {
                    parts.push(format!("cost<={max}"));
                }
                if parts.is_empty() {
                    f.write_str("any")
                } else {
                    f.write_str(&parts.join("|"))
                }
            }
        }
    }
}

impl FromStr for TargetFilter {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "self" => return Ok(TargetFilter::Source),
            "leader" => return Ok(TargetFilter::Leader),
            _ => {}
        }

        let mut owner = TargetOwner::Any;
        let mut zone = TargetZone::Any;
        let mut max_cost = None;
        for part in s.split('|').map(str::trim) {
            match part {
                "any" => {}
                "own" | "your" => owner = TargetOwner::Own,
                "opponent" => owner = TargetOwner::Opponent,
                "character" => zone = TargetZone::Character,
                "leader" => zone = TargetZone::Leader,
                _ => {
                    let cost = part
                        .strip_prefix("cost<=")
                        .and_then(|n| n.trim().parse().ok())
                        .ok_or_else(|| TargetParseError(part.to_string()))?;
                    max_cost = Some(cost);
                }
            }
        }
        Ok(TargetFilter::Select {
            owner,
            zone,
            max_cost,
        })
    }
}

impl TryFrom<String> for TargetFilter {
    type Error = TargetParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetFilter> for String {
    fn from(filter: TargetFilter) -> Self {
        filter.to_string()
    }
}
