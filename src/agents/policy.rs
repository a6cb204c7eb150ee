//! Decision-makers.
//!
//! A `DecisionMaker` receives the state and the legal action list and must
//! return one action from that list. The list is never empty while a game is
//! running (passing is always legal), so an empty list is reported as an
//! error instead of being papered over.

use thiserror::Error;

use crate::core::{Action, ActionKind, BattleStep, GameRng, GameState};

/// Why an agent could not choose.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("no legal actions to choose from")]
    NoLegalActions,
}

/// Picks one action from the legal list.
pub trait DecisionMaker {
    /// Short name for logs and match reports.
    fn name(&self) -> &str;

    /// Choose an action from `legal`.
    fn choose(&mut self, state: &GameState, legal: &[Action]) -> Result<Action, AgentError>;
}

/// First item with the highest key; later items must be strictly better.
fn first_max_by_key<'a, I, K>(items: I, key: impl Fn(&Action) -> K) -> Option<&'a Action>
where
    I: IntoIterator<Item = &'a Action>,
    K: PartialOrd,
{
    let mut best: Option<(&Action, K)> = None;
    for action in items {
        let k = key(action);
        if best.as_ref().map_or(true, |(_, b)| k > *b) {
            best = Some((action, k));
        }
    }
    best.map(|(action, _)| action)
}

// =============================================================================
// Random
// =============================================================================

/// Uniformly random choice, seeded for reproducible matches.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl DecisionMaker for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, _state: &GameState, legal: &[Action]) -> Result<Action, AgentError> {
        self.rng.choose(legal).cloned().ok_or(AgentError::NoLegalActions)
    }
}

// =============================================================================
// Rule-based
// =============================================================================

/// Fixed priority list.
///
/// On its own turn: the best favorable attack (attacker power at least the
/// target's, leader targets first), then the most expensive play, then end
/// the phase. When defending: block a hit aimed at the leader, counter a hit
/// with the cheapest sufficient counter, otherwise pass.
#[derive(Clone, Debug, Default)]
pub struct RuleBasedAgent;

impl RuleBasedAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn defend(state: &GameState, legal: &[Action]) -> Option<Action> {
        let battle = state.battle.as_ref()?;
        if !battle.is_hit() {
            return None;
        }
        let defender = &state.players[battle.defender()];

        match battle.step {
            BattleStep::Block if battle.target == defender.leader.instance_id => legal
                .iter()
                .find(|a| a.kind() == ActionKind::Block)
                .cloned(),
            BattleStep::Block => None,
            BattleStep::Counter => {
                let needed = battle.attacker_power - battle.target_power;
                let counter_value = |action: &Action| match *action {
                    Action::Counter { hand_index, .. } => defender.hand.get(hand_index).map(|c| c.counter),
                    _ => None,
                };
                first_max_by_key(
                    legal
                        .iter()
                        .filter(|a| counter_value(*a).is_some_and(|v| v > needed)),
                    // Cheapest counter that turns the hit into a miss.
                    |a| counter_value(a).map(|v| -v),
                )
                .cloned()
            }
        }
    }

    fn attack(state: &GameState, legal: &[Action]) -> Option<Action> {
        let opponent_leader = state.players[state.active_player.opponent()].leader.instance_id;
        let score = |action: &Action| match *action {
            Action::Attack { attacker, target, .. } => {
                let attacker_power = state.instance(attacker).map(|c| state.total_power(c))?;
                let target_power = state.instance(target).map(|c| state.total_power(c))?;
                (attacker_power >= target_power).then_some(if target == opponent_leader { 2 } else { 1 })
            }
            _ => None,
        };
        first_max_by_key(legal.iter().filter(|a| score(*a).is_some()), &score).cloned()
    }

    fn play(state: &GameState, legal: &[Action]) -> Option<Action> {
        let hand = &state.players[state.active_player].hand;
        let cost = |action: &Action| match *action {
            Action::PlayCard { hand_index, .. } => hand.get(hand_index).map(|c| c.cost),
            _ => None,
        };
        first_max_by_key(legal.iter().filter(|a| cost(*a).is_some()), &cost).cloned()
    }
}

impl DecisionMaker for RuleBasedAgent {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn choose(&mut self, state: &GameState, legal: &[Action]) -> Result<Action, AgentError> {
        let first = legal.first().ok_or(AgentError::NoLegalActions)?;

        let chosen = if state.battle.is_some() {
            Self::defend(state, legal)
        } else {
            Self::attack(state, legal).or_else(|| Self::play(state, legal))
        };
        let pass = legal
            .iter()
            .find(|a| matches!(a.kind(), ActionKind::EndPhase | ActionKind::ResolveBattle));

        Ok(chosen.or_else(|| pass.cloned()).unwrap_or_else(|| first.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::{InstanceId, Phase, PlayerId};
    use crate::rules::{legal_actions, GameBuilder, RulesEngine};

    #[test]
    fn test_empty_list_is_an_error() {
        let (_, state) = GameBuilder::new().build(1);
        assert_eq!(
            RandomAgent::new(1).choose(&state, &[]),
            Err(AgentError::NoLegalActions)
        );
        assert_eq!(
            RuleBasedAgent::new().choose(&state, &[]),
            Err(AgentError::NoLegalActions)
        );
    }

    #[test]
    fn test_random_agent_picks_from_list() {
        let (_, state) = GameBuilder::new().build(1);
        let legal = legal_actions(&state);
        let mut agent = RandomAgent::new(3);
        for _ in 0..10 {
            assert!(legal.contains(&agent.choose(&state, &legal).unwrap()));
        }
    }

    #[test]
    fn test_rule_based_attacks_leader_first() {
        let (_, mut state) = GameBuilder::new().build(1);
        state.phase = Phase::Main;
        let legal = legal_actions(&state);

        let chosen = RuleBasedAgent::new().choose(&state, &legal).unwrap();
        assert_eq!(chosen, Action::attack(PlayerId::FIRST, InstanceId(0), InstanceId(1)));
    }

    #[test]
    fn test_rule_based_plays_most_expensive() {
        let (_, mut state) = GameBuilder::new().build(1);
        state.phase = Phase::Main;
        state.players[PlayerId::FIRST].leader.rest();
        let legal = legal_actions(&state);

        let chosen = RuleBasedAgent::new().choose(&state, &legal).unwrap();
        let Action::PlayCard { hand_index, .. } = chosen else {
            panic!("expected a play, got {chosen}");
        };
        let hand = &state.players[PlayerId::FIRST].hand;
        let max_cost = hand.iter().map(|c| c.cost).max().unwrap();
        assert_eq!(hand[hand_index].cost, max_cost);
    }

    #[test]
    fn test_rule_based_counters_a_leader_hit() {
        let (rules, mut state) = GameBuilder::new().build(1);
        state.phase = Phase::Main;
        let small = state
            .definition(&CardId::from(GameBuilder::SMALL_ID))
            .cloned()
            .unwrap();
        state.players[PlayerId::SECOND].hand = std::iter::once(small).collect();

        rules
            .apply_action(&mut state, &Action::attack(PlayerId::FIRST, InstanceId(0), InstanceId(1)))
            .unwrap();
        rules
            .apply_action(&mut state, &Action::resolve_battle(PlayerId::SECOND))
            .unwrap();

        let legal = legal_actions(&state);
        let chosen = RuleBasedAgent::new().choose(&state, &legal).unwrap();
        assert_eq!(chosen, Action::counter(PlayerId::SECOND, 0));
    }
}
