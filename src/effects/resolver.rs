//! Effect resolution - executing effects on game state.
//!
//! `EffectResolver::resolve` applies exactly one effect and reports failure
//! instead of panicking. `EffectResolver::fire` runs every effect of a card
//! with a given timing, skipping the ones whose DON!! requirements cannot be
//! met.
//!
//! ## Targets
//!
//! An explicit target must still satisfy the effect's filter, or the effect
//! fails with `EffectError::NoTarget`. Without one, keyword grants and
//! `SetActive` act on the source; other effects use their filter's default
//! (`TargetFilter::select_default`), and an effect with no filter acts on
//! its source.
//!
//! ## Controller
//!
//! The controller of an effect is the owner of its source instance, or the
//! active player when the source is no longer on the field.

use log::{debug, warn};
use thiserror::Error;

use super::effect::{Effect, EffectAction, EffectTiming};
use crate::cards::{CardInstance, Keyword};
use crate::core::{GameState, InstanceId, PlayerId};
use crate::zones::FieldSlot;

/// Why an effect could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("target {0} not found")]
    TargetNotFound(InstanceId),

    #[error("no legal target")]
    NoTarget,

    #[error("leader {0} cannot be removed from the field")]
    LeaderImmune(InstanceId),

    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

/// Outcome of firing all effects at one timing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FireReport {
    pub resolved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Fire every `timing` effect printed on `source`'s card.
    pub fn fire(
        state: &mut GameState,
        source: InstanceId,
        timing: EffectTiming,
        target: Option<InstanceId>,
    ) -> FireReport {
        let mut report = FireReport::default();
        let Some(card) = state.instance(source) else {
            return report;
        };
        let attached = card.attached_don;
        let Some(definition) = state.definition_of(card) else {
            return report;
        };

        for effect in definition.effects_at(timing) {
            if effect.don_cost > 0 {
                // TODO: pay DON!! -N costs once the DON!! pool is implemented.
                debug!("{source}: skipping '{}' (DON!! cost unpaid)", effect.description);
                report.skipped += 1;
                continue;
            }
            if attached < effect.don_condition {
                debug!(
                    "{source}: skipping '{}' (needs DON!! x{})",
                    effect.description, effect.don_condition
                );
                report.skipped += 1;
                continue;
            }

            match Self::resolve(state, effect, source, target) {
                Ok(()) => report.resolved += 1,
                Err(e) => {
                    debug!("{source}: effect '{}' failed: {e}", effect.description);
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Apply one effect.
    pub fn resolve(
        state: &mut GameState,
        effect: &Effect,
        source: InstanceId,
        target: Option<InstanceId>,
    ) -> Result<(), EffectError> {
        let controller = Self::controller(state, source);
        debug!("{controller} resolves {:?} {} from {source}", effect.action, effect.value);

        if !effect.action.needs_target() {
            let count = usize::try_from(effect.value).unwrap_or(0);
            let player = &mut state.players[controller];
            match effect.action {
                EffectAction::DrawCard => {
                    player.draw_n(count);
                }
                EffectAction::TrashCard => {
                    player.discard_from_end(count);
                }
                _ => {}
            }
            return Ok(());
        }

        let target = match target {
            Some(t) => Self::explicit_target(state, effect, controller, source, t)?,
            None => Self::default_target(state, effect, controller, source)?,
        };

        match effect.action {
            EffectAction::Ko => {
                let card = Self::take_off_field(state, target)?;
                Self::send_to(state, &card, Destination::Trash);
            }
            EffectAction::ReturnToHand => {
                let card = Self::take_off_field(state, target)?;
                Self::send_to(state, &card, Destination::Hand);
            }
            EffectAction::ReturnToBottomDeck => {
                let card = Self::take_off_field(state, target)?;
                Self::send_to(state, &card, Destination::DeckBottom);
            }
            EffectAction::BuffPower => Self::target_mut(state, target)?.power_modifier += effect.value,
            EffectAction::CostChange => Self::target_mut(state, target)?.cost_modifier += effect.value,
            EffectAction::GrantKeyword(Keyword::Banish) => {
                return Err(EffectError::Unimplemented("granting [Banish]"));
            }
            EffectAction::GrantKeyword(keyword) => {
                Self::target_mut(state, target)?.keywords.insert(keyword);
            }
            EffectAction::SetActive => Self::target_mut(state, target)?.set_active(),
            EffectAction::DrawCard | EffectAction::TrashCard => {}
        }
        Ok(())
    }

    /// Owner of the source, falling back to the active player.
    fn controller(state: &GameState, source: InstanceId) -> PlayerId {
        state
            .instance(source)
            .map_or(state.active_player, |card| card.owner)
    }

    fn explicit_target(
        state: &GameState,
        effect: &Effect,
        controller: PlayerId,
        source: InstanceId,
        target: InstanceId,
    ) -> Result<InstanceId, EffectError> {
        let Some(filter) = &effect.target else {
            return Ok(target);
        };
        let (_, slot, card) = state.locate(target).ok_or(EffectError::TargetNotFound(target))?;
        if filter.matches(state, controller, source, card, slot) {
            Ok(target)
        } else {
            Err(EffectError::NoTarget)
        }
    }

    fn default_target(
        state: &GameState,
        effect: &Effect,
        controller: PlayerId,
        source: InstanceId,
    ) -> Result<InstanceId, EffectError> {
        match (effect.action, &effect.target) {
            (EffectAction::GrantKeyword(_) | EffectAction::SetActive, _) | (_, None) => Ok(source),
            (_, Some(filter)) => filter
                .select_default(state, controller, source)
                .ok_or(EffectError::NoTarget),
        }
    }

    fn target_mut(state: &mut GameState, target: InstanceId) -> Result<&mut CardInstance, EffectError> {
        state
            .instance_mut(target)
            .ok_or(EffectError::TargetNotFound(target))
    }

    /// Remove a character or stage from its owner's field.
    fn take_off_field(state: &mut GameState, target: InstanceId) -> Result<CardInstance, EffectError> {
        let (owner, slot, _) = state.locate(target).ok_or(EffectError::TargetNotFound(target))?;
        if slot == FieldSlot::Leader {
            return Err(EffectError::LeaderImmune(target));
        }
        state.players[owner]
            .remove_from_field(target)
            .ok_or(EffectError::TargetNotFound(target))
    }

    /// Put a removed instance's card into one of its owner's zones.
    pub(crate) fn send_to(state: &mut GameState, card: &CardInstance, destination: Destination) {
        let Some(definition) = state.definition(&card.card_id).cloned() else {
            warn!(
                "{} ({}) left the field but is not in the catalog; card dropped",
                card.instance_id, card.card_id
            );
            return;
        };
        let owner = &mut state.players[card.owner];
        match destination {
            Destination::Trash => owner.trash.push_back(definition),
            Destination::Hand => owner.hand.push_back(definition),
            Destination::DeckBottom => owner.deck.push_back(definition),
        }
        debug!("{} ({}) -> {:?}", card.instance_id, card.card_id, destination);
    }
}

/// Zone a card goes to when it leaves the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Destination {
    Trash,
    Hand,
    DeckBottom,
}
