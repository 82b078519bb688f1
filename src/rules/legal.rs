//! Legal action enumeration.
//!
//! Only the active player has legal actions. The list is built in a fixed
//! order (hand order, then banished, then hero ability, then end phase) so
//! repeated calls on the same state return identical lists.

use crate::cards::CardInstance;
use crate::combat::CombatStep;
use crate::core::action::Action;
use crate::core::config::EngineConfig;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Phase};

use super::handlers::can_afford;

/// Every action `player` may take in `state`.
#[must_use]
pub fn legal_actions(state: &GameState, config: &EngineConfig, player: PlayerId) -> Vec<Action> {
    if state.is_game_over() || !player.is_valid() || player != state.active_player {
        return Vec::new();
    }

    if state.combat_step() == CombatStep::Defend {
        return defend_actions(state, player);
    }

    if state.phase == Phase::ActionPhase && !state.combat_chain.is_link_resolving() {
        return action_phase_actions(state, config, player);
    }

    Vec::new()
}

/// One single-candidate declaration per eligible defender, or a lone
/// "no defenders" declaration when nothing can block.
fn defend_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    let defending = state
        .combat_chain
        .current_link()
        .is_some_and(|link| link.target == player);
    if !defending {
        return Vec::new();
    }

    let zones = &state.player(player).zones;
    let hand = zones
        .hand
        .iter()
        .filter(|c| c.effective_defense().is_some());
    let equipment = zones
        .equipment()
        .filter(|c| c.effective_defense().is_some_and(|d| d > 0));

    let mut actions: Vec<Action> = hand
        .chain(equipment)
        .map(|c| Action::declare_defenders(player, &[c.id()]))
        .collect();
    if actions.is_empty() {
        actions.push(Action::no_defenders(player));
    }
    actions
}

fn action_phase_actions(state: &GameState, config: &EngineConfig, player: PlayerId) -> Vec<Action> {
    let p = state.player(player);
    let target = player.opponent();
    let mut actions = Vec::new();

    for card in p.zones.hand.iter().filter(|c| is_castable(state, player, c)) {
        actions.push(Action::play_from_hand(player, card.id(), target));
    }
    for card in p
        .zones
        .banished
        .iter()
        .filter(|c| c.playable_from_banished && is_castable(state, player, c))
    {
        actions.push(Action::play_from_banished(player, card.id(), target));
    }

    if let Some(ability) = config.hero_abilities.get(p.hero.template().id) {
        let available = p.hero.resource_points + p.hand_pitch_total(None);
        if !p.hero.ability_used_this_turn && ability.cost() <= available {
            actions.push(Action::hero_ability(player));
        }
    }

    actions.push(Action::end_phase(player));
    actions
}

fn is_castable(state: &GameState, player: PlayerId, card: &CardInstance) -> bool {
    let template = card.template();
    template.is_playable_in_action_phase()
        && (!template.is_action() || state.player(player).hero.action_points >= 1)
        && can_afford(state, player, card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, CardType, Subtype, TemplateId};
    use crate::core::config::PlayerSetup;
    use crate::core::action::ActionType;
    use crate::zones::ZonePosition;
    use std::sync::Arc;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn hero() -> Arc<CardTemplate> {
        Arc::new(
            CardTemplate::new(TemplateId::new(1), "Hero")
                .with_type(CardType::Hero)
                .with_life(20)
                .with_intellect(4),
        )
    }

    fn state() -> GameState {
        let setups = [PlayerSetup::new(hero()), PlayerSetup::new(hero())];
        let mut state = GameState::new(setups, &EngineConfig::new().with_seed(2)).unwrap();
        state.phase = Phase::ActionPhase;
        state.turn_number = 1;
        state.player_mut(P0).hero.action_points = 1;
        state
    }

    fn give(state: &mut GameState, template: CardTemplate) {
        let card = state.create_card(Arc::new(template), P0);
        state
            .player_mut(P0)
            .zones
            .hand
            .add(card, Some(ZonePosition::Top))
            .unwrap();
    }

    fn attack(id: u32, cost: i32, pitch: i32) -> CardTemplate {
        CardTemplate::new(TemplateId::new(id), "Attack")
            .with_type(CardType::Action)
            .with_subtype(Subtype::Attack)
            .with_power(4)
            .with_cost(cost)
            .with_pitch(pitch)
    }

    #[test]
    fn test_inactive_player_has_nothing() {
        let state = state();
        assert!(legal_actions(&state, &EngineConfig::new(), P1).is_empty());
    }

    #[test]
    fn test_end_phase_always_offered() {
        let state = state();
        let actions = legal_actions(&state, &EngineConfig::new(), P0);

        assert_eq!(actions, vec![Action::end_phase(P0)]);
    }

    #[test]
    fn test_affordability_excludes_own_pitch() {
        let mut state = state();
        // Costs 3 and pitches for 3, but cannot pitch for itself
        give(&mut state, attack(2, 3, 3));

        let actions = legal_actions(&state, &EngineConfig::new(), P0);
        assert_eq!(actions.len(), 1);

        give(&mut state, attack(3, 0, 3));
        let actions = legal_actions(&state, &EngineConfig::new(), P0);
        let plays = actions
            .iter()
            .filter(|a| a.action_type == ActionType::PlayCardFromHand)
            .count();
        assert_eq!(plays, 2);
    }

    #[test]
    fn test_no_action_points_no_actions() {
        let mut state = state();
        state.player_mut(P0).hero.action_points = 0;
        give(&mut state, attack(2, 0, 1));

        let actions = legal_actions(&state, &EngineConfig::new(), P0);
        assert_eq!(actions, vec![Action::end_phase(P0)]);
    }

    #[test]
    fn test_game_over_has_nothing() {
        let mut state = state();
        state.player_mut(P1).hero.life = 0;
        state.check_game_over();

        assert!(legal_actions(&state, &EngineConfig::new(), P0).is_empty());
    }
}
