//! Legal action enumeration.
//!
//! Candidates are generated from the visible board and filtered through the
//! same checks `apply_action` runs, so every listed action applies cleanly.
//! Passing (`EndPhase` outside a battle, `ResolveBattle` inside one) is
//! always listed first.

use super::battle::{check_attack, check_block, check_counter};
use super::game::check_play;
use crate::core::{Action, BattlePhase, BattleStep, GameState, InstanceId, Phase};

/// Every legal action for the player holding priority.
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    if state.is_over() {
        return Vec::new();
    }
    match &state.battle {
        Some(battle) => battle_responses(state, battle),
        None => turn_actions(state),
    }
}

fn battle_responses(state: &GameState, battle: &BattlePhase) -> Vec<Action> {
    let defender = battle.defender();
    let player = &state.players[defender];
    let mut actions = vec![Action::resolve_battle(defender)];

    match battle.step {
        BattleStep::Block => actions.extend(
            player
                .characters
                .iter()
                .map(|c| c.instance_id)
                .filter(|&id| check_block(state, id).is_ok())
                .map(|id| Action::block(defender, id)),
        ),
        BattleStep::Counter => actions.extend(
            (0..player.hand.len())
                .filter(|&i| check_counter(state, i).is_ok())
                .map(|i| Action::counter(defender, i)),
        ),
    }
    actions
}

fn turn_actions(state: &GameState) -> Vec<Action> {
    let me = state.active_player;
    let mut actions = vec![Action::end_phase(me)];
    if state.phase != Phase::Main {
        return actions;
    }

    let player = &state.players[me];
    actions.extend(
        (0..player.hand.len())
            .filter(|&i| check_play(state, i, None).is_ok())
            .map(|i| Action::play(me, i)),
    );

    let opponent = &state.players[me.opponent()];
    let targets: Vec<InstanceId> = opponent.battlers().map(|c| c.instance_id).collect();
    for attacker in player.battlers().filter(|c| !c.rested) {
        for &target in &targets {
            if check_attack(state, attacker.instance_id, target).is_ok() {
                actions.push(Action::attack(me, attacker.instance_id, target));
            }
        }
    }
    actions
}
