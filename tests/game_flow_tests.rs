//! Game flow tests.
//!
//! Setup, pitching, the end phase, hero abilities, and the legal-action
//! surface across whole turns.

use std::sync::Arc;

use rust_tcg::cards::{CardTemplate, CardType, HeroAbility, Subtype, TemplateId};
use rust_tcg::core::{Action, ActionType, EngineConfig, InstanceId, Phase, PlayerId, PlayerSetup};
use rust_tcg::rules::{GameEngine, RulesEngine};
use rust_tcg::zones::ZonePosition;

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);
const HERO: TemplateId = TemplateId(1);

// === Fixtures ===

fn hero() -> Arc<CardTemplate> {
    Arc::new(
        CardTemplate::new(HERO, "Hero")
            .with_type(CardType::Hero)
            .with_life(20)
            .with_intellect(4),
    )
}

fn strike() -> Arc<CardTemplate> {
    Arc::new(
        CardTemplate::new(TemplateId::new(2), "Strike")
            .with_type(CardType::Action)
            .with_subtype(Subtype::Attack)
            .with_power(3)
            .with_defense(2)
            .with_cost(1)
            .with_pitch(2),
    )
}

fn setup() -> PlayerSetup {
    PlayerSetup::new(hero())
        .with_equipment(Arc::new(
            CardTemplate::new(TemplateId::new(3), "Helm")
                .with_type(CardType::Equipment)
                .with_subtype(Subtype::Head)
                .with_defense(1),
        ))
        .with_cards(&strike(), 20)
}

fn started(config: EngineConfig) -> GameEngine {
    let mut engine = GameEngine::new(config, [setup(), setup()]).unwrap();
    engine.setup().unwrap();
    engine
}

fn first_hand_card(engine: &GameEngine, player: PlayerId) -> InstanceId {
    engine.state().player(player).zones.hand.iter().next().unwrap().id()
}

// === Setup ===

#[test]
fn test_setup_state() {
    let engine = started(EngineConfig::new().with_seed(1));
    let state = engine.state();

    assert_eq!(state.turn_number, 1);
    assert_eq!(state.turn_player, P0);
    assert_eq!(state.active_player, P0);
    assert_eq!(state.phase, Phase::ActionPhase);
    for player in PlayerId::both() {
        let p = state.player(player);
        assert_eq!(p.zones.hand.len(), 4);
        assert_eq!(p.zones.deck.len(), 16);
        assert_eq!(p.zones.head.len(), 1);
        assert_eq!(p.hero.resource_points, 0);
    }
}

#[test]
fn test_seed_controls_shuffle() {
    let a = started(EngineConfig::new().with_seed(99));
    let b = started(EngineConfig::new().with_seed(99));

    assert_eq!(a.state().players, b.state().players);
    assert_eq!(a.state().rng.seed(), 99);
}

// === Pitch and end phase ===

#[test]
fn test_pitch_then_end_phase() {
    let mut engine = started(EngineConfig::new().with_seed(3));
    let card = first_hand_card(&engine, P0);

    let result = engine.execute_action(&Action::pitch(P0, card));
    assert!(result.success);
    assert_eq!(engine.state().player(P0).hero.resource_points, 2);

    let result = engine.execute_action(&Action::end_phase(P0));
    assert!(result.success);

    let state = engine.state();
    let bottom = state.player(P0).zones.deck.iter().next().unwrap();
    assert_eq!(bottom.id(), card);
    assert!(state.player(P0).zones.pitch.is_empty());
    for player in PlayerId::both() {
        assert_eq!(state.player(player).hero.resource_points, 0);
    }
}

#[test]
fn test_end_phase_refills_and_passes_turn() {
    let mut engine = started(EngineConfig::new().with_seed(4));
    let card = first_hand_card(&engine, P0);
    engine.execute_action(&Action::pitch(P0, card));

    let result = engine.execute_action(&Action::end_phase(P0));

    assert_eq!(result.cards_drawn, 1);
    let state = engine.state();
    assert_eq!(state.player(P0).zones.hand.len(), 4);
    assert_eq!(state.turn_player, P1);
    assert_eq!(state.active_player, P1);
    assert_eq!(state.turn_number, 2);
    assert_eq!(state.phase, Phase::ActionPhase);
    assert_eq!(state.player(P1).hero.action_points, 1);
    assert_eq!(state.player(P0).hero.action_points, 0);
}

#[test]
fn test_first_turn_refills_second_player() {
    let mut engine = started(EngineConfig::new().with_seed(5));
    {
        let zones = &mut engine.state_mut().player_mut(P1).zones;
        let id = zones.hand.iter().next().unwrap().id();
        let card = zones.hand.remove(id).unwrap();
        zones.deck.add(card, Some(ZonePosition::Bottom)).unwrap();
    }

    let result = engine.execute_action(&Action::end_phase(P0));

    assert_eq!(result.cards_drawn, 1);
    assert_eq!(engine.state().player(P1).zones.hand.len(), 4);
}

#[test]
fn test_first_turn_refill_can_be_disabled() {
    let mut engine = started(EngineConfig::new().with_seed(5).without_first_turn_refill());
    {
        let zones = &mut engine.state_mut().player_mut(P1).zones;
        let id = zones.hand.iter().next().unwrap().id();
        let card = zones.hand.remove(id).unwrap();
        zones.deck.add(card, Some(ZonePosition::Bottom)).unwrap();
    }

    engine.execute_action(&Action::end_phase(P0));

    assert_eq!(engine.state().player(P1).zones.hand.len(), 3);
}

#[test]
fn test_end_phase_clears_hand_modifiers_only() {
    let mut engine = started(EngineConfig::new().with_seed(6));
    let in_hand = first_hand_card(&engine, P1);
    {
        let p1 = engine.state_mut().player_mut(P1);
        p1.zones.hand.get_mut(in_hand).unwrap().temp_power = 2;
        let helm = p1.zones.head.iter_mut().next().unwrap();
        helm.defense_counters = -1;
        helm.tapped = true;
    }

    engine.execute_action(&Action::end_phase(P0));

    let p1 = engine.state().player(P1);
    assert_eq!(p1.zones.hand.get(in_hand).unwrap().temp_power, 0);
    let helm = p1.zones.head.iter().next().unwrap();
    assert_eq!(helm.defense_counters, -1);
    // Only the turn player's permanents untap
    assert!(helm.tapped);
}

#[test]
fn test_turn_player_untaps() {
    let mut engine = started(EngineConfig::new().with_seed(6));
    for helm in engine.state_mut().player_mut(P0).zones.head.iter_mut() {
        helm.tapped = true;
    }

    engine.execute_action(&Action::end_phase(P0));

    assert!(engine.state().player(P0).zones.head.iter().all(|c| !c.tapped));
}

// === Playing cards ===

#[test]
fn test_play_auto_pitches() {
    let mut engine = started(EngineConfig::new().with_seed(8));
    let card = first_hand_card(&engine, P0);

    let result = engine.execute_action(&Action::play_from_hand(P0, card, P1));

    assert!(result.success, "{}", result.message);
    let p0 = engine.state().player(P0);
    assert_eq!(p0.zones.pitch.len(), 1);
    assert_eq!(p0.zones.hand.len(), 2);
    // Pitched 2 for a cost of 1
    assert_eq!(p0.hero.resource_points, 1);
    assert_eq!(p0.hero.action_points, 0);
}

#[test]
fn test_play_without_action_point_rejected() {
    let mut engine = started(EngineConfig::new().with_seed(8));
    engine.state_mut().player_mut(P0).hero.action_points = 0;
    let card = first_hand_card(&engine, P0);

    let result = engine.execute_action(&Action::play_from_hand(P0, card, P1));

    assert!(!result.success);
    assert_eq!(result.message, "no action points left");
    assert!(engine.state().player(P0).zones.hand.contains(card));
}

#[test]
fn test_missing_card_rejected() {
    let mut engine = started(EngineConfig::new().with_seed(8));

    let result = engine.execute_action(&Action::new(ActionType::PlayCardFromHand, P0));
    assert!(!result.success);

    let result = engine.execute_action(&Action::pitch(P0, InstanceId(9999)));
    assert!(!result.success);
    assert_eq!(result.message, "Instance(9999) is not in Hand");
}

#[test]
fn test_arcane_spell_cannot_target_caster() {
    let mut engine = started(EngineConfig::new().with_seed(8));
    let bolt = Arc::new(
        CardTemplate::new(TemplateId::new(41), "Bolt")
            .with_type(CardType::Action)
            .with_arcane(3),
    );
    let state = engine.state_mut();
    let card = state.create_card(bolt, P0);
    let id = card.id();
    state.player_mut(P0).zones.hand.add(card, None).unwrap();

    let result = engine.execute_action(&Action::play_from_hand(P0, id, P0));

    assert!(!result.success);
    assert_eq!(result.message, "Player 0 is not a legal target");
    let state = engine.state();
    assert!(state.player(P0).zones.hand.contains(id));
    assert_eq!(state.player(P0).hero.life, 20);
    assert_eq!(state.player(P0).hero.action_points, 1);
    assert_eq!(state.player(P0).damage_dealt_this_turn, 0);

    let result = engine.execute_action(&Action::play_from_hand(P0, id, P1));

    assert!(result.success, "{}", result.message);
    assert_eq!(engine.state().player(P1).hero.life, 17);
    assert_eq!(engine.state().player(P0).damage_dealt_this_turn, 3);
}

#[test]
fn test_declare_outside_combat_rejected() {
    let mut engine = started(EngineConfig::new().with_seed(8));

    let result = engine.execute_action(&Action::no_defenders(P0));

    assert!(!result.success);
    assert!(engine.state().history.is_empty());
}

// === Hero ability ===

fn with_ability() -> EngineConfig {
    EngineConfig::new()
        .with_seed(12)
        .with_hero_ability(HERO, HeroAbility::BanishTopNonAttackAction { cost: 1 })
}

/// Put a non-attack action on top of P0's deck.
fn stack_spell(engine: &mut GameEngine) -> InstanceId {
    let spell = Arc::new(
        CardTemplate::new(TemplateId::new(40), "Spark")
            .with_type(CardType::Action)
            .with_arcane(1),
    );
    let state = engine.state_mut();
    let card = state.create_card(spell, P0);
    let id = card.id();
    state.player_mut(P0).zones.deck.add(card, Some(ZonePosition::Top)).unwrap();
    id
}

#[test]
fn test_hero_ability_banishes_top_card() {
    let mut engine = started(with_ability());
    let spell = stack_spell(&mut engine);
    assert!(engine.legal_actions(P0).contains(&Action::hero_ability(P0)));

    let result = engine.execute_action(&Action::hero_ability(P0));

    assert!(result.success, "{}", result.message);
    let p0 = engine.state().player(P0);
    let banished = p0.zones.banished.get(spell).unwrap();
    assert!(banished.face_up);
    assert!(banished.playable_from_banished);
    assert!(p0.hero.ability_used_this_turn);
    assert!(!engine.legal_actions(P0).contains(&Action::hero_ability(P0)));

    let again = engine.execute_action(&Action::hero_ability(P0));
    assert!(!again.success);
}

#[test]
fn test_play_from_banished() {
    let mut engine = started(with_ability());
    let spell = stack_spell(&mut engine);
    engine.execute_action(&Action::hero_ability(P0));

    let play = Action::play_from_banished(P0, spell, P1);
    assert!(engine.legal_actions(P0).contains(&play));

    let result = engine.execute_action(&play);

    assert!(result.success, "{}", result.message);
    assert_eq!(result.arcane_damage_dealt, 1);
    assert!(engine.state().player(P0).zones.graveyard.contains(spell));
}

#[test]
fn test_banished_flag_expires() {
    let mut engine = started(with_ability());
    let spell = stack_spell(&mut engine);
    engine.execute_action(&Action::hero_ability(P0));

    engine.execute_action(&Action::end_phase(P0));

    let card = engine.state().player(P0).zones.banished.get(spell).unwrap();
    assert!(!card.playable_from_banished);
    assert!(!engine.state().player(P0).hero.ability_used_this_turn);
}

#[test]
fn test_hero_ability_leaves_attack_on_top() {
    let mut engine = started(with_ability());
    let top = engine.state().player(P0).zones.deck.peek_top().unwrap().id();

    let result = engine.execute_action(&Action::hero_ability(P0));

    assert!(result.success);
    assert_eq!(engine.state().player(P0).zones.deck.peek_top().unwrap().id(), top);
    assert!(engine.state().player(P0).zones.banished.is_empty());
}

#[test]
fn test_no_hero_ability_configured() {
    let mut engine = started(EngineConfig::new().with_seed(12));

    assert!(!engine.legal_actions(P0).contains(&Action::hero_ability(P0)));
    let result = engine.execute_action(&Action::hero_ability(P0));
    assert_eq!(result.message, "Hero has no hero ability");
}

// === Legal actions ===

#[test]
fn test_legal_actions_idempotent() {
    let mut engine = started(EngineConfig::new().with_seed(21));

    for _ in 0..30 {
        let player = engine.state().active_player;
        let first = engine.legal_actions(player);
        let second = engine.legal_actions(player);
        assert_eq!(first, second);

        let Some(action) = first.into_iter().next() else {
            break;
        };
        engine.execute_action(&action);
    }
}

#[test]
fn test_only_active_player_has_actions() {
    let engine = started(EngineConfig::new().with_seed(22));

    assert!(!engine.legal_actions(P0).is_empty());
    assert!(engine.legal_actions(P1).is_empty());
}

#[test]
fn test_every_legal_action_succeeds() {
    let engine = started(EngineConfig::new().with_seed(23));

    for action in engine.legal_actions(P0) {
        let mut copy = engine.clone();
        let result = copy.execute_action(&action);
        assert!(result.success, "{:?}: {}", action.action_type, result.message);
    }
}

#[test]
fn test_games_are_reproducible() {
    fn play_out(seed: u64) -> GameEngine {
        let mut engine = started(EngineConfig::new().with_seed(seed));
        for _ in 0..200 {
            let player = engine.state().active_player;
            if engine.step_first_legal(player).is_none() {
                break;
            }
        }
        engine
    }

    let a = play_out(31);
    let b = play_out(31);

    assert_eq!(a.state().players, b.state().players);
    assert_eq!(a.state().history, b.state().history);
    assert_eq!(a.result(), b.result());
}
