//! Arcane damage and Arcane Barrier mitigation.
//!
//! Arcane damage ignores combat defense. The target's equipment is walked
//! head to legs; each piece with Arcane Barrier N prevents up to N damage,
//! paid for one resource point per point prevented. Whatever is left is
//! lost from the target's life and credited to the source player.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::Keyword;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Deal `amount` arcane damage from `source` to `target`.
///
/// Returns the damage that got through after mitigation.
pub fn deal_arcane_damage(state: &mut GameState, source: PlayerId, target: PlayerId, amount: i32) -> i32 {
    let policy = state.life_policy;
    let defender = state.player_mut(target);

    let barriers: SmallVec<[i32; 4]> = defender
        .zones
        .equipment()
        .filter_map(|card| card.keyword_value(Keyword::ArcaneBarrier))
        .map(|value| value as i32)
        .filter(|&value| value > 0)
        .collect();

    let mut remaining = amount.max(0);
    for barrier in barriers {
        if remaining == 0 {
            break;
        }
        let prevented = barrier.min(remaining).min(defender.hero.resource_points);
        if prevented > 0 && defender.hero.spend_resources(prevented) {
            remaining -= prevented;
            debug!(player = %target, prevented, "arcane barrier");
        }
    }

    if remaining > 0 {
        defender.hero.lose_life(remaining, policy);
        state.player_mut(source).damage_dealt_this_turn += remaining;
    }
    debug!(
        source = %source,
        target = %target,
        amount,
        dealt = remaining,
        "arcane damage"
    );

    state.check_game_over();
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, CardType, Subtype, TemplateId};
    use crate::core::config::{EngineConfig, PlayerSetup};
    use crate::rules::GameResult;
    use std::sync::Arc;

    fn hero() -> Arc<CardTemplate> {
        Arc::new(
            CardTemplate::new(TemplateId::new(1), "Hero")
                .with_type(CardType::Hero)
                .with_life(20)
                .with_intellect(4),
        )
    }

    fn barrier(id: u32, subtype: Subtype, value: u32) -> Arc<CardTemplate> {
        Arc::new(
            CardTemplate::new(TemplateId::new(id), "Barrier")
                .with_type(CardType::Equipment)
                .with_subtype(subtype)
                .with_defense(1)
                .with_keyword(Keyword::ArcaneBarrier, value),
        )
    }

    fn state_with(defender: PlayerSetup) -> GameState {
        let attacker = PlayerSetup::new(hero());
        GameState::new([attacker, defender], &EngineConfig::new().with_seed(1)).unwrap()
    }

    #[test]
    fn test_unmitigated_arcane() {
        let mut state = state_with(PlayerSetup::new(hero()));
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

        let dealt = deal_arcane_damage(&mut state, p0, p1, 3);

        assert_eq!(dealt, 3);
        assert_eq!(state.player(p1).hero.life, 17);
        assert_eq!(state.player(p0).damage_dealt_this_turn, 3);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_barrier_spends_resources() {
        let setup = PlayerSetup::new(hero())
            .with_equipment(barrier(2, Subtype::Head, 1))
            .with_equipment(barrier(3, Subtype::Legs, 2));
        let mut state = state_with(setup);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        state.player_mut(p1).hero.resource_points = 2;

        let dealt = deal_arcane_damage(&mut state, p0, p1, 4);

        // Head prevents 1, legs prevents 1 more before resources run out
        assert_eq!(dealt, 2);
        assert_eq!(state.player(p1).hero.resource_points, 0);
        assert_eq!(state.player(p1).hero.life, 18);
    }

    #[test]
    fn test_barrier_without_resources_prevents_nothing() {
        let setup = PlayerSetup::new(hero()).with_equipment(barrier(2, Subtype::Chest, 3));
        let mut state = state_with(setup);

        let dealt = deal_arcane_damage(&mut state, PlayerId::new(0), PlayerId::new(1), 2);

        assert_eq!(dealt, 2);
    }

    #[test]
    fn test_lethal_arcane_ends_game() {
        let mut state = state_with(PlayerSetup::new(hero()));

        deal_arcane_damage(&mut state, PlayerId::new(0), PlayerId::new(1), 25);

        assert_eq!(state.player(PlayerId::new(1)).hero.life, 0);
        assert_eq!(state.result, Some(GameResult::Winner(PlayerId::new(0))));
    }
}
