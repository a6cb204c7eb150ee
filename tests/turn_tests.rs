//! Turn structure and card play integration tests.

use std::sync::Arc;

use optcg_engine::cards::{CardCategory, CardDefinition, CardId};
use optcg_engine::core::{Action, ActionError, ActionKind, GameConfig, GameState, InstanceId, Phase, PlayerId};
use optcg_engine::effects::{Effect, EffectAction, EffectTiming, TargetFilter};
use optcg_engine::rules::{legal_actions, GameBuilder, OnePieceRules, RulesEngine};

const FIRST: PlayerId = PlayerId::FIRST;
const SECOND: PlayerId = PlayerId::SECOND;

fn end_phase(rules: &OnePieceRules, state: &mut GameState) {
    let actor = state.active_player;
    rules.apply_action(state, &Action::end_phase(actor)).unwrap();
}

fn to_main(rules: &OnePieceRules, state: &mut GameState) {
    while state.phase != Phase::Main {
        end_phase(rules, state);
    }
}

// =============================================================================
// Setup
// =============================================================================

#[test]
fn test_opening_setup_for_fifty_card_decks() {
    let (_, state) = GameBuilder::new().deck_size(50).build(42);

    for (_, player) in state.players.iter() {
        assert_eq!(player.life.len(), 5);
        assert_eq!(player.hand.len(), 5);
        assert_eq!(player.deck.len(), 40);
    }
    assert_eq!(state.turn, 1);
    assert_eq!(state.phase, Phase::Refresh);
    assert_eq!(state.active_player, FIRST);
}

#[test]
fn test_leader_life_value_is_used() {
    let leader = GameBuilder::test_leader().with_life(3);
    let (_, state) = GameBuilder::new().with_leader(leader).build(42);
    assert_eq!(state.players[SECOND].life.len(), 3);
}

// =============================================================================
// Phases
// =============================================================================

#[test]
fn test_phase_cycle() {
    let (rules, mut state) = GameBuilder::new().build(1);
    let expected = [Phase::Draw, Phase::Don, Phase::Main, Phase::End, Phase::Refresh];

    for phase in expected {
        end_phase(&rules, &mut state);
        assert_eq!(state.phase, phase);
    }
    assert_eq!(state.turn, 2);
    assert_eq!(state.active_player, SECOND);

    // A sixth call moves on to the draw phase without another swap.
    end_phase(&rules, &mut state);
    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.turn, 2);
    assert_eq!(state.active_player, SECOND);
}

#[test]
fn test_refresh_untaps_new_active_player() {
    let (rules, mut state) = GameBuilder::new().build(1);
    state.players[SECOND].leader.rest();
    state.players[FIRST].leader.rest();

    for _ in 0..5 {
        end_phase(&rules, &mut state);
    }

    assert!(!state.players[SECOND].leader.rested);
    assert!(state.players[FIRST].leader.rested);
}

#[test]
fn test_draw_phase_can_be_disabled() {
    let config = GameConfig::default().with_draw_on_draw_phase(false);
    let (rules, mut state) = GameBuilder::new().with_config(config).build(1);
    let hand = state.players[SECOND].hand.len();

    for _ in 0..6 {
        end_phase(&rules, &mut state);
    }

    assert_eq!(state.phase, Phase::Draw);
    assert_eq!(state.players[SECOND].hand.len(), hand);
}

#[test]
fn test_end_phase_blocked_during_battle() {
    let (rules, mut state) = GameBuilder::new().build(1);
    to_main(&rules, &mut state);
    rules
        .apply_action(&mut state, &Action::attack(FIRST, InstanceId(0), InstanceId(1)))
        .unwrap();

    // The defender holds priority but still cannot end the phase.
    assert_eq!(
        rules.apply_action(&mut state, &Action::end_phase(SECOND)),
        Err(ActionError::BattleInProgress)
    );
    assert_eq!(state.phase, Phase::Main);
}

#[test]
fn test_history_records_turn_and_phase() {
    let (rules, mut state) = GameBuilder::new().build(1);
    to_main(&rules, &mut state);

    let last = state.history.back().unwrap();
    assert_eq!(last.action, Action::end_phase(FIRST));
    assert_eq!(last.phase, Phase::Don);
    assert_eq!(last.turn, 1);
    assert_eq!(state.history.len(), 3);
}

// =============================================================================
// Card play
// =============================================================================

#[test]
fn test_play_character() {
    let (rules, mut state) = GameBuilder::new().build(1);
    to_main(&rules, &mut state);
    let hand = state.players[FIRST].hand.len();
    let card = state.players[FIRST].hand[0].id.clone();

    rules.apply_action(&mut state, &Action::play(FIRST, 0)).unwrap();

    let player = &state.players[FIRST];
    assert_eq!(player.hand.len(), hand - 1);
    assert_eq!(player.characters.len(), 1);
    let instance = player.characters.iter().next().unwrap();
    assert_eq!(instance.card_id, card);
    assert_eq!(instance.instance_id, InstanceId(2));
    assert!(!instance.rested);
}

#[test]
fn test_sixth_character_rejected() {
    let (rules, mut state) = GameBuilder::new().deck_size(20).build(1);
    to_main(&rules, &mut state);
    let small = Arc::clone(state.definition(&CardId::from(GameBuilder::SMALL_ID)).unwrap());
    state.players[FIRST].hand = std::iter::repeat(small).take(6).collect();

    for _ in 0..5 {
        rules.apply_action(&mut state, &Action::play(FIRST, 0)).unwrap();
    }

    assert_eq!(
        rules.apply_action(&mut state, &Action::play(FIRST, 0)),
        Err(ActionError::CharacterAreaFull(5))
    );
    assert_eq!(state.players[FIRST].characters.len(), 5);
    assert_eq!(state.players[FIRST].hand.len(), 1);
    assert!(legal_actions(&state).iter().all(|a| a.kind() != ActionKind::PlayCard));
}

#[test]
fn test_play_rejections_leave_hand_untouched() {
    let event = CardDefinition::new("EV-1", "Event", CardCategory::Event).with_cost(1);
    let mut cards = GameBuilder::vanilla_cards();
    cards.push(event);
    let (rules, mut state) = GameBuilder::new().with_cards(cards).build(1);

    let ev = Arc::clone(state.definition(&CardId::from("EV-1")).unwrap());
    let small = Arc::clone(state.definition(&CardId::from(GameBuilder::SMALL_ID)).unwrap());
    state.players[FIRST].hand = [ev, small].into_iter().collect();

    assert_eq!(
        rules.apply_action(&mut state, &Action::play(FIRST, 0)),
        Err(ActionError::NotMainPhase(Phase::Refresh))
    );
    to_main(&rules, &mut state);
    let hand = state.players[FIRST].hand.clone();

    assert_eq!(
        rules.apply_action(&mut state, &Action::play(FIRST, 0)),
        Err(ActionError::NotPlayable(CardId::from("EV-1")))
    );
    assert_eq!(
        rules.apply_action(&mut state, &Action::play(FIRST, 9)),
        Err(ActionError::HandIndex { index: 9, size: hand.len() })
    );
    assert_eq!(
        rules.apply_action(&mut state, &Action::play_targeting(FIRST, 1, InstanceId(99))),
        Err(ActionError::InvalidTarget(InstanceId(99)))
    );
    assert_eq!(state.players[FIRST].hand, hand);
}

#[test]
fn test_stage_slot_holds_one() {
    let stage = CardDefinition::new("ST-1", "Ship", CardCategory::Stage).with_cost(1);
    let (rules, mut state) = GameBuilder::new().with_cards(vec![stage]).deck_size(20).build(1);
    to_main(&rules, &mut state);

    rules.apply_action(&mut state, &Action::play(FIRST, 0)).unwrap();
    assert!(state.players[FIRST].stage.is_some());

    assert_eq!(
        rules.apply_action(&mut state, &Action::play(FIRST, 0)),
        Err(ActionError::StageOccupied)
    );
}

// =============================================================================
// On-play effects
// =============================================================================

#[test]
fn test_on_play_draw_keeps_hand_size() {
    let drawer = CardDefinition::new("DR-1", "Scout", CardCategory::Character)
        .with_cost(2)
        .with_power(2000)
        .with_effect(Effect::on_play_draw(1));
    let (rules, mut state) = GameBuilder::new().with_cards(vec![drawer]).build(1);
    to_main(&rules, &mut state);
    let hand = state.players[FIRST].hand.len();
    let deck = state.players[FIRST].deck.len();

    rules.apply_action(&mut state, &Action::play(FIRST, 0)).unwrap();

    assert_eq!(state.players[FIRST].hand.len(), hand);
    assert_eq!(state.players[FIRST].deck.len(), deck - 1);
}

#[test]
fn test_on_play_ko_uses_explicit_target() {
    let hunter = CardDefinition::new("KO-1", "Hunter", CardCategory::Character)
        .with_cost(3)
        .with_power(3000)
        .with_effect(
            Effect::new(EffectTiming::OnPlay, EffectAction::Ko, 1)
                .with_target(TargetFilter::opponent_character(Some(5))),
        );
    let mut cards = vec![hunter];
    cards.extend(GameBuilder::vanilla_cards());
    let (rules, mut state) = GameBuilder::new().with_cards(cards).build(1);
    to_main(&rules, &mut state);

    let def = |id: &str| Arc::clone(state.definition(&CardId::from(id)).unwrap());
    let (small, medium, hunter) = (def(GameBuilder::SMALL_ID), def(GameBuilder::MEDIUM_ID), def("KO-1"));
    let first = state.spawn_instance(&small, SECOND);
    let second = state.spawn_instance(&medium, SECOND);
    let (first_id, second_id) = (first.instance_id, second.instance_id);
    state.players[SECOND].characters.insert(first).unwrap();
    state.players[SECOND].characters.insert(second).unwrap();

    state.players[FIRST].hand = std::iter::once(hunter).collect();
    rules
        .apply_action(&mut state, &Action::play_targeting(FIRST, 0, second_id))
        .unwrap();

    assert!(state.instance(second_id).is_none());
    assert!(state.instance(first_id).is_some());
    assert_eq!(state.players[SECOND].trash.len(), 1);
}

#[test]
fn test_on_play_target_outside_filter_is_rejected() {
    let hunter = CardDefinition::new("KO-1", "Hunter", CardCategory::Character)
        .with_cost(3)
        .with_power(3000)
        .with_effect(
            Effect::new(EffectTiming::OnPlay, EffectAction::Ko, 1)
                .with_target(TargetFilter::opponent_character(Some(3))),
        );
    let mut cards = vec![hunter];
    cards.extend(GameBuilder::vanilla_cards());
    let (rules, mut state) = GameBuilder::new().with_cards(cards).build(1);
    to_main(&rules, &mut state);

    let def = |id: &str| Arc::clone(state.definition(&CardId::from(id)).unwrap());
    let (medium, large, hunter) = (def(GameBuilder::MEDIUM_ID), def(GameBuilder::LARGE_ID), def("KO-1"));
    let theirs_large = state.spawn_instance(&large, SECOND);
    let theirs_medium = state.spawn_instance(&medium, SECOND);
    let mine = state.spawn_instance(&medium, FIRST);
    let (large_id, medium_id, mine_id) = (theirs_large.instance_id, theirs_medium.instance_id, mine.instance_id);
    state.players[SECOND].characters.insert(theirs_large).unwrap();
    state.players[SECOND].characters.insert(theirs_medium).unwrap();
    state.players[FIRST].characters.insert(mine).unwrap();
    state.players[FIRST].hand = std::iter::once(hunter).collect();

    let err = rules
        .apply_action(&mut state, &Action::play_targeting(FIRST, 0, large_id))
        .unwrap_err();
    assert_eq!(err, ActionError::InvalidTarget(large_id));
    let err = rules
        .apply_action(&mut state, &Action::play_targeting(FIRST, 0, mine_id))
        .unwrap_err();
    assert_eq!(err, ActionError::InvalidTarget(mine_id));

    assert!(state.instance(large_id).is_some());
    assert!(state.instance(mine_id).is_some());
    assert_eq!(state.players[FIRST].hand.len(), 1);
    assert_eq!(state.players[FIRST].characters.len(), 1);

    rules
        .apply_action(&mut state, &Action::play_targeting(FIRST, 0, medium_id))
        .unwrap();
    assert!(state.instance(medium_id).is_none());
    assert_eq!(state.players[SECOND].trash.len(), 1);
}

#[test]
fn test_on_play_ko_defaults_to_first_match() {
    let hunter = CardDefinition::new("KO-1", "Hunter", CardCategory::Character)
        .with_cost(3)
        .with_power(3000)
        .with_effect_text("[On Play] K.O. up to 1 of your opponent's Characters with a cost of 2 or less.");
    let parsed = optcg_engine::effects::parse_effects(&hunter.effect_text);
    let hunter = hunter.with_effects(parsed);
    let mut cards = vec![hunter];
    cards.extend(GameBuilder::vanilla_cards());
    let (rules, mut state) = GameBuilder::new().with_cards(cards).build(1);
    to_main(&rules, &mut state);

    let def = |id: &str| Arc::clone(state.definition(&CardId::from(id)).unwrap());
    let (large, blocker, hunter) = (def(GameBuilder::LARGE_ID), def(GameBuilder::BLOCKER_ID), def("KO-1"));
    let big = state.spawn_instance(&large, SECOND);
    let cheap = state.spawn_instance(&blocker, SECOND);
    let (big_id, cheap_id) = (big.instance_id, cheap.instance_id);
    state.players[SECOND].characters.insert(big).unwrap();
    state.players[SECOND].characters.insert(cheap).unwrap();

    state.players[FIRST].hand = std::iter::once(hunter).collect();
    rules.apply_action(&mut state, &Action::play(FIRST, 0)).unwrap();

    // Cost 5 is over the ceiling; the cost-2 blocker is the first match.
    assert!(state.instance(big_id).is_some());
    assert!(state.instance(cheap_id).is_none());
}
