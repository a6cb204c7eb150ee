//! Battle protocol.
//!
//! ```text
//! Attack ──▶ BLOCK ──pass──────────▶ COUNTER ──pass──▶ resolution
//!              └──block (redirect)──▶   ↺ counter
//! ```
//!
//! Only the defender acts inside a battle. Each `check_*` function is the
//! single source of truth for an action's legality: `apply` paths call it
//! before mutating and action enumeration filters candidates through it.

use std::sync::Arc;

use log::{debug, info};

use crate::cards::{CardInstance, Keyword};
use crate::core::{ActionError, BattlePhase, BattleStep, GameConfig, GameState, InstanceId, Phase};
use crate::effects::{Destination, EffectResolver, EffectTiming};
use crate::zones::FieldSlot;

/// Leaders can always be attacked; characters only when rested and the
/// configuration allows character attacks.
pub(crate) fn target_allowed(config: &GameConfig, slot: FieldSlot, card: &CardInstance) -> bool {
    match slot {
        FieldSlot::Leader => true,
        FieldSlot::Character => config.attack_rested_characters && card.rested,
        FieldSlot::Stage => false,
    }
}

// === Validation ===

pub(crate) fn check_attack(state: &GameState, attacker: InstanceId, target: InstanceId) -> Result<(), ActionError> {
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }
    if state.phase != Phase::Main {
        return Err(ActionError::NotMainPhase(state.phase));
    }

    let active = state.active_player;
    let (owner, slot, card) = state
        .locate(attacker)
        .ok_or(ActionError::InstanceNotFound(attacker))?;
    if owner != active || slot == FieldSlot::Stage {
        return Err(ActionError::InvalidAttacker(attacker));
    }
    if card.rested {
        return Err(ActionError::Rested(attacker));
    }

    let (target_owner, target_slot, target_card) = state
        .locate(target)
        .ok_or(ActionError::InstanceNotFound(target))?;
    if target_owner == active || !target_allowed(&state.config, target_slot, target_card) {
        return Err(ActionError::InvalidTarget(target));
    }
    Ok(())
}

fn open_battle(state: &GameState) -> Result<&BattlePhase, ActionError> {
    state.battle.as_ref().ok_or(ActionError::NoBattle)
}

pub(crate) fn check_block(state: &GameState, blocker: InstanceId) -> Result<(), ActionError> {
    let battle = open_battle(state)?;
    if battle.step != BattleStep::Block {
        return Err(ActionError::WrongBattleStep(battle.step));
    }

    let (owner, slot, card) = state
        .locate(blocker)
        .ok_or(ActionError::InstanceNotFound(blocker))?;
    if owner != battle.defender() || slot != FieldSlot::Character || blocker == battle.target {
        return Err(ActionError::InvalidTarget(blocker));
    }
    if !card.has_keyword(Keyword::Blocker) {
        return Err(ActionError::NotBlocker(blocker));
    }
    if card.rested {
        return Err(ActionError::Rested(blocker));
    }
    Ok(())
}

/// Returns the counter value of the hand card.
pub(crate) fn check_counter(state: &GameState, hand_index: usize) -> Result<i64, ActionError> {
    let battle = open_battle(state)?;
    if battle.step != BattleStep::Counter {
        return Err(ActionError::WrongBattleStep(battle.step));
    }

    let hand = &state.players[battle.defender()].hand;
    let card = hand.get(hand_index).ok_or(ActionError::HandIndex {
        index: hand_index,
        size: hand.len(),
    })?;
    if card.counter <= 0 {
        return Err(ActionError::NoCounter(card.id.clone()));
    }
    Ok(card.counter)
}

// === Application ===

/// Rest the attacker, fire its `[When Attacking]` effects, snapshot both
/// powers and open the battle in the block step.
pub(crate) fn declare_attack(state: &mut GameState, attacker: InstanceId, target: InstanceId) -> Result<(), ActionError> {
    check_attack(state, attacker, target)?;

    if let Some(card) = state.instance_mut(attacker) {
        card.rest();
    }
    EffectResolver::fire(state, attacker, EffectTiming::WhenAttacking, None);

    let Some(attacker_power) = state.instance(attacker).map(|c| state.total_power(c)) else {
        debug!("{attacker} left the field while attacking");
        return Ok(());
    };
    let Some(target_power) = state.instance(target).map(|c| state.total_power(c)) else {
        debug!("{target} left the field before the battle");
        return Ok(());
    };

    debug!("{attacker} ({attacker_power}) attacks {target} ({target_power})");
    state.battle = Some(BattlePhase::new(
        state.active_player,
        attacker,
        target,
        attacker_power,
        target_power,
    ));
    Ok(())
}

/// Rest the blocker and make it the new target.
pub(crate) fn block(state: &mut GameState, blocker: InstanceId) -> Result<(), ActionError> {
    check_block(state, blocker)?;

    let don_power = state.config.don_power;
    let mut power = 0;
    if let Some(card) = state.instance_mut(blocker) {
        card.rest();
        power = card.total_power(don_power);
    }
    if let Some(battle) = state.battle.as_mut() {
        debug!("{blocker} ({power}) blocks {}", battle.attacker);
        battle.redirect(blocker, power);
    }
    Ok(())
}

/// Trash a hand card and add its counter value to the current target.
pub(crate) fn counter(state: &mut GameState, hand_index: usize) -> Result<(), ActionError> {
    let value = check_counter(state, hand_index)?;
    let Some(battle) = state.battle.as_ref() else {
        return Err(ActionError::NoBattle);
    };
    let (defender, target) = (battle.defender(), battle.target);

    let player = &mut state.players[defender];
    let Some(card) = player.take_from_hand(hand_index) else {
        return Err(ActionError::HandIndex {
            index: hand_index,
            size: player.hand.len(),
        });
    };
    player.trash.push_back(Arc::clone(&card));

    if let Some(target_card) = state.instance_mut(target) {
        target_card.power_modifier += value;
    }
    if let Some(battle) = state.battle.as_mut() {
        battle.add_counter(card.id.clone(), value);
        debug!("{defender} counters with {} (+{value}, target now {})", card.id, battle.target_power);
    }
    Ok(())
}

/// Defender passes: block step moves to counter, counter step resolves.
pub(crate) fn pass(state: &mut GameState) -> Result<(), ActionError> {
    let step = open_battle(state)?.step;
    match step {
        BattleStep::Block => {
            if let Some(battle) = state.battle.as_mut() {
                battle.step = BattleStep::Counter;
            }
        }
        BattleStep::Counter => resolve(state),
    }
    Ok(())
}

/// Compare the snapshots, apply damage or K.O., and close the battle.
fn resolve(state: &mut GameState) {
    let Some(battle) = state.battle.take() else {
        return;
    };
    let hit = battle.is_hit();
    let (double_attack, banish) = state.instance(battle.attacker).map_or((false, false), |c| {
        (c.has_keyword(Keyword::DoubleAttack), c.has_keyword(Keyword::Banish))
    });

    match state.locate(battle.target).map(|(owner, slot, _)| (owner, slot)) {
        Some((owner, FieldSlot::Leader)) if hit => {
            let player = &mut state.players[owner];
            if player.life.is_empty() {
                info!("{} wins: {owner} took damage with no life left", battle.attacking_player);
                state.winner = Some(battle.attacking_player);
            } else {
                // A second point of damage past the last life card is lost.
                let damage = if double_attack { 2 } else { 1 };
                for _ in 0..damage {
                    let lost = if banish { player.trash_life() } else { player.lose_life() };
                    if lost.is_none() {
                        break;
                    }
                }
            }
            debug!(
                "{} hits {}: {owner} has {} life",
                battle.attacker,
                battle.target,
                state.players[owner].life.len()
            );
        }
        Some((owner, FieldSlot::Character)) if hit => {
            if let Some(card) = state.players[owner].remove_from_field(battle.target) {
                debug!("{} K.O.'d by {}", battle.target, battle.attacker);
                EffectResolver::send_to(state, &card, Destination::Trash);
            }
        }
        Some(_) => debug!(
            "{} misses {} ({} < {})",
            battle.attacker, battle.target, battle.attacker_power, battle.target_power
        ),
        None => debug!("{} left the field before resolution", battle.target),
    }

    if battle.counter_bonus != 0 {
        if let Some(target) = state.instance_mut(battle.target) {
            target.power_modifier -= battle.counter_bonus;
        }
    }
}
