//! One Piece TCG rules.
//!
//! `OnePieceRules` owns no game data; every call takes the state it acts
//! on. Actions are dispatched by variant after two shared checks: the game
//! must still be running, and the acting player must hold priority. Applied
//! actions are appended to the state's history with the turn and phase they
//! were taken in.

use std::sync::Arc;

use log::{debug, info};

use super::battle;
use super::engine::{GameResult, RulesEngine};
use super::legality;
use crate::cards::CardCategory;
use crate::core::{Action, ActionError, GameState, InstanceId, Phase};
use crate::effects::{EffectResolver, EffectTiming};

/// Standard two-player rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnePieceRules;

impl OnePieceRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

// === Play ===

/// Validate playing the active player's hand card at `hand_index`.
pub(crate) fn check_play(
    state: &GameState,
    hand_index: usize,
    effect_target: Option<InstanceId>,
) -> Result<(), ActionError> {
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }
    if state.phase != Phase::Main {
        return Err(ActionError::NotMainPhase(state.phase));
    }

    let player = &state.players[state.active_player];
    let card = player.hand_card(hand_index).ok_or(ActionError::HandIndex {
        index: hand_index,
        size: player.hand.len(),
    })?;
    match card.category {
        CardCategory::Character if player.characters.is_full() => {
            return Err(ActionError::CharacterAreaFull(player.characters.capacity()));
        }
        CardCategory::Character => {}
        CardCategory::Stage if player.stage.is_some() => return Err(ActionError::StageOccupied),
        CardCategory::Stage => {}
        _ => return Err(ActionError::NotPlayable(card.id.clone())),
    }

    if let Some(target) = effect_target {
        let (_, slot, instance) = state.locate(target).ok_or(ActionError::InvalidTarget(target))?;
        let source = state.next_instance_id();
        let mut filters = card
            .effects_at(EffectTiming::OnPlay)
            .filter(|e| e.action.needs_target())
            .filter_map(|e| e.target.as_ref())
            .peekable();
        if filters.peek().is_some()
            && !filters.any(|f| f.matches(state, state.active_player, source, instance, slot))
        {
            return Err(ActionError::InvalidTarget(target));
        }
    }
    Ok(())
}

fn play_card(state: &mut GameState, hand_index: usize, effect_target: Option<InstanceId>) -> Result<(), ActionError> {
    check_play(state, hand_index, effect_target)?;

    let me = state.active_player;
    let size = state.players[me].hand.len();
    let card = state.players[me]
        .take_from_hand(hand_index)
        .ok_or(ActionError::HandIndex { index: hand_index, size })?;
    let instance = state.spawn_instance(&card, me);
    let id = instance.instance_id;

    let player = &mut state.players[me];
    if card.category == CardCategory::Stage {
        player.stage = Some(instance);
    } else if let Err(full) = player.characters.insert(instance) {
        player.hand.insert(hand_index, Arc::clone(&card));
        return Err(ActionError::CharacterAreaFull(full.capacity));
    }
    debug!("{me} plays {} ({}) as {id}", card.name, card.id);

    let report = EffectResolver::fire(state, id, EffectTiming::OnPlay, effect_target);
    if report.resolved + report.skipped + report.failed > 0 {
        debug!("{id} on play: {report:?}");
    }
    Ok(())
}

// === Phases ===

fn end_phase(state: &mut GameState) -> Result<(), ActionError> {
    if state.battle.is_some() {
        return Err(ActionError::BattleInProgress);
    }

    let next = state.phase.next();
    state.phase = next;

    if next.starts_turn() {
        state.active_player = state.active_player.opponent();
        state.turn += 1;
        state.players[state.active_player].refresh();
        info!("turn {} begins for {}", state.turn, state.active_player);
    }

    if next == Phase::Draw && state.config.draw_on_draw_phase && state.turn > 1 {
        let active = state.active_player;
        if state.players[active].draw().is_none() {
            debug!("{active} has no cards left to draw");
        }
    }
    Ok(())
}

impl RulesEngine for OnePieceRules {
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        legality::legal_actions(state)
    }

    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), ActionError> {
        if state.is_over() {
            return Err(ActionError::GameOver);
        }
        let expected = state.priority_player();
        if action.player() != expected {
            return Err(ActionError::WrongActor {
                actor: action.player(),
                expected,
            });
        }

        let (turn, phase) = (state.turn, state.phase);
        match *action {
            Action::PlayCard {
                hand_index,
                effect_target,
                ..
            } => play_card(state, hand_index, effect_target)?,
            Action::Attack { attacker, target, .. } => battle::declare_attack(state, attacker, target)?,
            Action::Block { blocker, .. } => battle::block(state, blocker)?,
            Action::Counter { hand_index, .. } => battle::counter(state, hand_index)?,
            Action::ResolveBattle { .. } => battle::pass(state)?,
            Action::EndPhase { .. } => end_phase(state)?,
        }

        state.record(action.clone(), turn, phase);
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner.map(GameResult::Winner)
    }
}
