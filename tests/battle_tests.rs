//! Battle protocol integration tests.
//!
//! Attack declaration, block, counter and resolution driven through
//! `RulesEngine::apply_action`, as a client would.

use std::sync::Arc;

use optcg_engine::cards::{CardId, Keyword};
use optcg_engine::core::{Action, ActionError, BattleStep, GameState, InstanceId, Phase, PlayerId};
use optcg_engine::rules::{legal_actions, GameBuilder, GameResult, OnePieceRules, RulesEngine};
use optcg_engine::zones::FieldSlot;

const FIRST: PlayerId = PlayerId::FIRST;
const SECOND: PlayerId = PlayerId::SECOND;
const FIRST_LEADER: InstanceId = InstanceId(0);
const SECOND_LEADER: InstanceId = InstanceId(1);

fn main_phase(seed: u64) -> (OnePieceRules, GameState) {
    let (rules, mut state) = GameBuilder::new().build(seed);
    state.phase = Phase::Main;
    (rules, state)
}

/// Put a catalog card straight onto `owner`'s character area.
fn put_character(state: &mut GameState, owner: PlayerId, id: &str) -> InstanceId {
    let def = Arc::clone(state.definition(&CardId::from(id)).unwrap());
    let instance = state.spawn_instance(&def, owner);
    let iid = instance.instance_id;
    state.players[owner].characters.insert(instance).unwrap();
    iid
}

fn set_hand(state: &mut GameState, owner: PlayerId, ids: &[&str]) {
    let cards: Vec<_> = ids
        .iter()
        .map(|id| Arc::clone(state.definition(&CardId::from(*id)).unwrap()))
        .collect();
    state.players[owner].hand = cards.into_iter().collect();
}

fn apply(rules: &OnePieceRules, state: &mut GameState, action: Action) {
    rules
        .apply_action(state, &action)
        .unwrap_or_else(|e| panic!("{action} rejected: {e}"));
}

/// Defender passes both steps.
fn pass_out(rules: &OnePieceRules, state: &mut GameState) {
    apply(rules, state, Action::resolve_battle(SECOND));
    apply(rules, state, Action::resolve_battle(SECOND));
}

// =============================================================================
// Leader hits
// =============================================================================

#[test]
fn test_tie_hits_leader_and_moves_top_life_to_hand() {
    let (rules, mut state) = main_phase(1);
    let top_life = state.players[SECOND].life[0].id.clone();
    let hand = state.players[SECOND].hand.len();

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    let defender = &state.players[SECOND];
    assert_eq!(defender.life.len(), 4);
    assert_eq!(defender.hand.len(), hand + 1);
    assert_eq!(defender.hand.back().unwrap().id, top_life);
    assert!(state.battle.is_none());
    assert!(state.winner.is_none());
}

#[test]
fn test_weaker_attacker_misses() {
    let (rules, mut state) = main_phase(1);
    let small = put_character(&mut state, FIRST, GameBuilder::SMALL_ID);

    apply(&rules, &mut state, Action::attack(FIRST, small, SECOND_LEADER));
    pass_out(&rules, &mut state);

    assert_eq!(state.players[SECOND].life.len(), 5);
    assert!(state.instance(small).unwrap().rested);
}

#[test]
fn test_hit_with_no_life_wins() {
    let (rules, mut state) = main_phase(1);
    state.players[SECOND].life.clear();

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    assert_eq!(state.winner, Some(FIRST));
    assert_eq!(rules.is_terminal(&state), Some(GameResult::Winner(FIRST)));
    assert!(legal_actions(&state).is_empty());
    assert_eq!(
        rules.apply_action(&mut state, &Action::end_phase(FIRST)),
        Err(ActionError::GameOver)
    );
}

#[test]
fn test_double_attack_deals_two() {
    let (rules, mut state) = main_phase(1);
    state.players[FIRST].leader.keywords.insert(Keyword::DoubleAttack);

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    assert_eq!(state.players[SECOND].life.len(), 3);
}

#[test]
fn test_double_attack_on_last_life_does_not_win() {
    let (rules, mut state) = main_phase(1);
    state.players[FIRST].leader.keywords.insert(Keyword::DoubleAttack);
    while state.players[SECOND].life.len() > 1 {
        state.players[SECOND].lose_life();
    }

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    assert!(state.players[SECOND].life.is_empty());
    assert_eq!(state.winner, None);
}

#[test]
fn test_double_attack_with_no_life_wins() {
    let (rules, mut state) = main_phase(1);
    state.players[FIRST].leader.keywords.insert(Keyword::DoubleAttack);
    state.players[SECOND].life.clear();
    let hand = state.players[SECOND].hand.len();

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    assert_eq!(state.winner, Some(FIRST));
    assert_eq!(state.players[SECOND].hand.len(), hand);
}

#[test]
fn test_banish_trashes_life() {
    let (rules, mut state) = main_phase(1);
    state.players[FIRST].leader.keywords.insert(Keyword::Banish);
    let hand = state.players[SECOND].hand.len();

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    let defender = &state.players[SECOND];
    assert_eq!(defender.life.len(), 4);
    assert_eq!(defender.hand.len(), hand);
    assert_eq!(defender.trash.len(), 1);
}

// =============================================================================
// Block
// =============================================================================

#[test]
fn test_blocker_intercepts_and_is_ko() {
    let (rules, mut state) = main_phase(2);
    let blocker = put_character(&mut state, SECOND, GameBuilder::BLOCKER_ID);

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    assert!(legal_actions(&state).contains(&Action::block(SECOND, blocker)));

    apply(&rules, &mut state, Action::block(SECOND, blocker));
    let battle = state.battle.as_ref().unwrap();
    assert_eq!(battle.target, blocker);
    assert_eq!(battle.target_power, 1000);
    assert_eq!(battle.step, BattleStep::Counter);

    apply(&rules, &mut state, Action::resolve_battle(SECOND));

    assert!(state.instance(blocker).is_none());
    assert_eq!(state.players[SECOND].trash.back().unwrap().id.as_str(), GameBuilder::BLOCKER_ID);
    assert_eq!(state.players[SECOND].life.len(), 5);
}

#[test]
fn test_block_requires_keyword_and_active_blocker() {
    let (rules, mut state) = main_phase(2);
    let vanilla = put_character(&mut state, SECOND, GameBuilder::SMALL_ID);
    let blocker = put_character(&mut state, SECOND, GameBuilder::BLOCKER_ID);
    state.instance_mut(blocker).unwrap().rest();

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));

    assert_eq!(
        rules.apply_action(&mut state, &Action::block(SECOND, vanilla)),
        Err(ActionError::NotBlocker(vanilla))
    );
    assert_eq!(
        rules.apply_action(&mut state, &Action::block(SECOND, blocker)),
        Err(ActionError::Rested(blocker))
    );
    assert_eq!(legal_actions(&state), vec![Action::resolve_battle(SECOND)]);
}

#[test]
fn test_attacked_blocker_cannot_block_itself() {
    let (rules, mut state) = main_phase(2);
    let blocker = put_character(&mut state, SECOND, GameBuilder::BLOCKER_ID);
    state.instance_mut(blocker).unwrap().rest();
    let attacker = put_character(&mut state, FIRST, GameBuilder::LARGE_ID);

    apply(&rules, &mut state, Action::attack(FIRST, attacker, blocker));

    assert_eq!(
        rules.apply_action(&mut state, &Action::block(SECOND, blocker)),
        Err(ActionError::InvalidTarget(blocker))
    );
}

// =============================================================================
// Counter
// =============================================================================

#[test]
fn test_counter_turns_hit_into_miss() {
    let (rules, mut state) = main_phase(3);
    set_hand(&mut state, SECOND, &[GameBuilder::SMALL_ID, GameBuilder::LARGE_ID]);

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    apply(&rules, &mut state, Action::resolve_battle(SECOND));

    assert_eq!(
        legal_actions(&state),
        vec![Action::resolve_battle(SECOND), Action::counter(SECOND, 0)]
    );
    apply(&rules, &mut state, Action::counter(SECOND, 0));

    let battle = state.battle.as_ref().unwrap();
    assert_eq!(battle.target_power, 6000);
    assert_eq!(battle.counter_cards, vec![CardId::from(GameBuilder::SMALL_ID)]);

    apply(&rules, &mut state, Action::resolve_battle(SECOND));

    let defender = &state.players[SECOND];
    assert_eq!(defender.life.len(), 5);
    assert_eq!(defender.hand.len(), 1);
    assert_eq!(defender.trash.len(), 1);
    // The counter bonus does not outlive the battle.
    assert_eq!(defender.leader.power_modifier, 0);
}

#[test]
fn test_counters_stack() {
    let (rules, mut state) = main_phase(3);
    let large = put_character(&mut state, FIRST, GameBuilder::LARGE_ID);
    set_hand(&mut state, SECOND, &[GameBuilder::SMALL_ID, GameBuilder::BLOCKER_ID]);

    apply(&rules, &mut state, Action::attack(FIRST, large, SECOND_LEADER));
    apply(&rules, &mut state, Action::resolve_battle(SECOND));
    apply(&rules, &mut state, Action::counter(SECOND, 1));
    apply(&rules, &mut state, Action::counter(SECOND, 0));

    assert_eq!(state.battle.as_ref().unwrap().target_power, 8000);
    apply(&rules, &mut state, Action::resolve_battle(SECOND));
    assert_eq!(state.players[SECOND].life.len(), 5);
}

#[test]
fn test_counter_rejections() {
    let (rules, mut state) = main_phase(3);
    set_hand(&mut state, SECOND, &[GameBuilder::LARGE_ID]);

    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    assert_eq!(
        rules.apply_action(&mut state, &Action::counter(SECOND, 0)),
        Err(ActionError::WrongBattleStep(BattleStep::Block))
    );

    apply(&rules, &mut state, Action::resolve_battle(SECOND));
    assert_eq!(
        rules.apply_action(&mut state, &Action::counter(SECOND, 0)),
        Err(ActionError::NoCounter(CardId::from(GameBuilder::LARGE_ID)))
    );
    assert_eq!(
        rules.apply_action(&mut state, &Action::counter(SECOND, 4)),
        Err(ActionError::HandIndex { index: 4, size: 1 })
    );
    assert_eq!(state.players[SECOND].hand.len(), 1);
}

// =============================================================================
// Character attacks and declaration rules
// =============================================================================

#[test]
fn test_rested_character_can_be_attacked_and_ko() {
    let (rules, mut state) = main_phase(4);
    let victim = put_character(&mut state, SECOND, GameBuilder::MEDIUM_ID);

    assert_eq!(
        rules.apply_action(&mut state, &Action::attack(FIRST, FIRST_LEADER, victim)),
        Err(ActionError::InvalidTarget(victim))
    );

    state.instance_mut(victim).unwrap().rest();
    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, victim));
    pass_out(&rules, &mut state);

    assert!(state.instance(victim).is_none());
    assert_eq!(state.players[SECOND].trash.len(), 1);
    assert_eq!(state.players[SECOND].life.len(), 5);
}

#[test]
fn test_character_attacks_disabled_by_config() {
    let config = optcg_engine::core::GameConfig::default().with_attack_rested_characters(false);
    let (rules, mut state) = GameBuilder::new().with_config(config).build(4);
    state.phase = Phase::Main;
    let victim = put_character(&mut state, SECOND, GameBuilder::MEDIUM_ID);
    state.instance_mut(victim).unwrap().rest();

    assert_eq!(
        rules.apply_action(&mut state, &Action::attack(FIRST, FIRST_LEADER, victim)),
        Err(ActionError::InvalidTarget(victim))
    );
}

#[test]
fn test_rested_attacker_cannot_attack_again() {
    let (rules, mut state) = main_phase(5);
    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));
    pass_out(&rules, &mut state);

    assert_eq!(
        rules.apply_action(&mut state, &Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER)),
        Err(ActionError::Rested(FIRST_LEADER))
    );
}

#[test]
fn test_only_defender_acts_during_battle() {
    let (rules, mut state) = main_phase(5);
    apply(&rules, &mut state, Action::attack(FIRST, FIRST_LEADER, SECOND_LEADER));

    assert_eq!(
        rules.apply_action(&mut state, &Action::end_phase(FIRST)),
        Err(ActionError::WrongActor {
            actor: FIRST,
            expected: SECOND
        })
    );
    assert!(legal_actions(&state).iter().all(|a| a.player() == SECOND));
}

#[test]
fn test_cannot_attack_with_opponent_card() {
    let (rules, mut state) = main_phase(5);
    assert_eq!(
        rules.apply_action(&mut state, &Action::attack(FIRST, SECOND_LEADER, FIRST_LEADER)),
        Err(ActionError::InvalidAttacker(SECOND_LEADER))
    );
    assert!(state.battle.is_none());
    assert!(!state.players[SECOND].leader.rested);
}

#[test]
fn test_locate_reports_slots() {
    let (_, mut state) = main_phase(6);
    let small = put_character(&mut state, SECOND, GameBuilder::SMALL_ID);

    assert_eq!(state.locate(FIRST_LEADER).map(|(p, s, _)| (p, s)), Some((FIRST, FieldSlot::Leader)));
    assert_eq!(state.locate(small).map(|(p, s, _)| (p, s)), Some((SECOND, FieldSlot::Character)));
}
