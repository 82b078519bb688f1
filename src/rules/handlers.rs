//! One handler per `ActionType`.
//!
//! Handlers validate, mutate, and describe what happened. The caller has
//! already checked game-over and active-player status. A handler that fails
//! after auto-pitching leaves the pitched cards where they are.

use tracing::debug;

use crate::cards::{CardInstance, HeroAbility, Keyword};
use crate::combat::{deal_arcane_damage, CombatEngine, CombatStep};
use crate::core::action::{Action, ActionResult};
use crate::core::config::EngineConfig;
use crate::core::entity::InstanceId;
use crate::core::error::ActionError;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Phase};
use crate::zones::ZoneKind;

use super::turn::end_turn;

/// Where a played card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaySource {
    Hand,
    Banished,
}

impl PlaySource {
    fn zone(self) -> ZoneKind {
        match self {
            PlaySource::Hand => ZoneKind::Hand,
            PlaySource::Banished => ZoneKind::Banished,
        }
    }
}

// === Validation ===

fn require_action_phase(state: &GameState) -> Result<(), ActionError> {
    if state.phase != Phase::ActionPhase {
        return Err(ActionError::WrongPhase(state.phase));
    }
    if state.combat_chain.is_link_resolving() {
        return Err(ActionError::CombatInProgress);
    }
    Ok(())
}

fn required_card(action: &Action) -> Result<InstanceId, ActionError> {
    action.card_instance_id.ok_or(ActionError::MissingCard)
}

// === Handlers ===

/// Move a hand card to the pitch zone for its pitch value in resources.
pub fn pitch_card(state: &mut GameState, action: &Action) -> Result<ActionResult, ActionError> {
    require_action_phase(state)?;
    let id = required_card(action)?;
    let player = action.player_id;

    let hand = &state.player(player).zones.hand;
    let card = hand.get(id).ok_or(ActionError::CardNotFound {
        card: id,
        zone: ZoneKind::Hand,
    })?;
    if card.template().pitch_value() <= 0 {
        return Err(ActionError::NotPitchable(id));
    }

    let gained = pitch_from_hand(state, player, id)?;
    Ok(ActionResult::ok(format!("pitched for {} resources", gained)))
}

/// Play a card from hand or, when flagged, from banished.
pub fn play_card(
    state: &mut GameState,
    action: &Action,
    source: PlaySource,
) -> Result<ActionResult, ActionError> {
    require_action_phase(state)?;
    let id = required_card(action)?;
    let player = action.player_id;
    let target = action
        .target_ids
        .first()
        .copied()
        .unwrap_or_else(|| player.opponent());

    let zones = &state.player(player).zones;
    let card = zones
        .zone(source.zone())
        .get(id)
        .ok_or(ActionError::CardNotFound {
            card: id,
            zone: source.zone(),
        })?;
    let template = card.template();
    let playable = template.is_playable_in_action_phase()
        && (source == PlaySource::Hand || card.playable_from_banished);
    if !playable {
        return Err(ActionError::NotPlayable(id));
    }
    if !target.is_valid() || target == player {
        return Err(ActionError::InvalidTarget(target));
    }
    let uses_action_point = template.is_action();
    let cost = template.cost_value();

    if uses_action_point && !state.player_mut(player).hero.spend_action_point() {
        return Err(ActionError::NoActionPoints);
    }
    if let Err(err) = pay_cost(state, player, cost, Some(id)) {
        if uses_action_point {
            state.player_mut(player).hero.action_points += 1;
        }
        return Err(err);
    }

    let Some(card) = state.player_mut(player).zones.zone_mut(source.zone()).remove(id) else {
        return Err(ActionError::CardNotFound {
            card: id,
            zone: source.zone(),
        });
    };
    resolve_play(state, player, card, target)
}

fn resolve_play(
    state: &mut GameState,
    player: PlayerId,
    mut card: CardInstance,
    target: PlayerId,
) -> Result<ActionResult, ActionError> {
    let name = card.name().to_string();
    debug!(player = %player, card = %name, "play");

    if card.template().is_attack() {
        CombatEngine::open_attack(state, player, card, target)?;
        return Ok(ActionResult::ok(format!("attacked with {}", name)));
    }

    let mut result = ActionResult::ok(format!("played {}", name));
    let arcane = card.template().arcane.unwrap_or(0);
    let go_again = card.has_keyword(Keyword::GoAgain);

    if arcane > 0 {
        result.arcane_damage_dealt = deal_arcane_damage(state, player, target, arcane);
    }

    card.reset_for_zone_change();
    state.player_mut(player).zones.graveyard.add(card, None)?;

    if go_again {
        state.player_mut(player).hero.action_points += 1;
        result.action_points_gained = 1;
    }
    Ok(result)
}

/// Declare defenders for the current attack.
///
/// Afterwards the chain closes unless the turn player can still afford
/// another attack.
pub fn declare_defenders(
    state: &mut GameState,
    action: &Action,
) -> Result<ActionResult, ActionError> {
    if state.combat_step() != CombatStep::Defend {
        return Err(ActionError::NotDefending);
    }
    let outcome = CombatEngine::declare_defenders(state, action.player_id, &action.defender_ids)?;

    let turn_player = state.turn_player;
    if state.is_game_over() || !has_affordable_attack(state, turn_player) {
        CombatEngine::close_chain(state)?;
    }

    let message = if outcome.hit {
        format!("attack hit for {}", outcome.damage)
    } else {
        "attack blocked".to_string()
    };
    Ok(ActionResult {
        success: true,
        damage_dealt: outcome.damage,
        arcane_damage_dealt: outcome.arcane_damage,
        action_points_gained: outcome.action_points_gained,
        message,
        ..ActionResult::default()
    })
}

/// Activate the turn player's hero ability.
pub fn activate_hero_ability(
    state: &mut GameState,
    config: &EngineConfig,
    action: &Action,
) -> Result<ActionResult, ActionError> {
    require_action_phase(state)?;
    let player = action.player_id;
    let hero = &state.player(player).hero;
    let ability = config
        .hero_abilities
        .get(hero.template().id)
        .ok_or_else(|| ActionError::NoHeroAbility(hero.name().to_string()))?;
    if hero.ability_used_this_turn {
        return Err(ActionError::HeroAbilityUsed);
    }

    pay_cost(state, player, ability.cost(), None)?;
    state.player_mut(player).hero.ability_used_this_turn = true;

    match ability {
        HeroAbility::BanishTopNonAttackAction { .. } => {
            let zones = &mut state.player_mut(player).zones;
            let banishable = zones
                .deck
                .peek_top()
                .is_some_and(|card| card.template().is_non_attack_action());
            if !banishable {
                return Ok(ActionResult::ok("top card stays on the deck"));
            }
            let Some(mut card) = zones.deck.draw_top() else {
                return Ok(ActionResult::ok("deck is empty"));
            };
            card.face_up = true;
            card.playable_from_banished = true;
            let message = format!("banished {}", card.name());
            debug!(player = %player, card = card.name(), "hero ability banish");
            zones.banished.add(card, None)?;
            Ok(ActionResult::ok(message))
        }
    }
}

pub fn end_phase(
    state: &mut GameState,
    config: &EngineConfig,
) -> Result<ActionResult, ActionError> {
    if state.phase != Phase::ActionPhase {
        return Err(ActionError::WrongPhase(state.phase));
    }
    if state.combat_chain.is_link_resolving() {
        return Err(ActionError::CombatInProgress);
    }
    let drawn = end_turn(state, config)?;
    Ok(ActionResult {
        cards_drawn: drawn,
        ..ActionResult::ok("turn ended")
    })
}

// === Costs ===

fn pitch_from_hand(state: &mut GameState, player: PlayerId, id: InstanceId) -> Result<i32, ActionError> {
    let p = state.player_mut(player);
    let Some(mut card) = p.zones.hand.remove(id) else {
        return Err(ActionError::CardNotFound {
            card: id,
            zone: ZoneKind::Hand,
        });
    };
    let gained = card.template().pitch_value();
    card.face_up = true;
    p.zones.pitch.add(card, None)?;
    p.hero.resource_points += gained;
    debug!(player = %player, gained, total = p.hero.resource_points, "pitch");
    Ok(gained)
}

/// Pay `cost` resources, pitching hand cards in hand order as needed.
///
/// `exclude` is the card being played, which cannot pitch for itself.
pub fn pay_cost(
    state: &mut GameState,
    player: PlayerId,
    cost: i32,
    exclude: Option<InstanceId>,
) -> Result<(), ActionError> {
    while state.player(player).hero.resource_points < cost {
        let next = state
            .player(player)
            .zones
            .hand
            .iter()
            .find(|c| Some(c.id()) != exclude && c.template().pitch_value() > 0)
            .map(CardInstance::id);
        let Some(id) = next else {
            return Err(ActionError::InsufficientResources {
                needed: cost,
                available: state.player(player).hero.resource_points,
            });
        };
        pitch_from_hand(state, player, id)?;
    }

    if state.player_mut(player).hero.spend_resources(cost.max(0)) {
        Ok(())
    } else {
        Err(ActionError::InsufficientResources {
            needed: cost,
            available: state.player(player).hero.resource_points,
        })
    }
}

/// Whether `card` could be paid for from current resources plus every other
/// pitchable hand card.
#[must_use]
pub fn can_afford(state: &GameState, player: PlayerId, card: &CardInstance) -> bool {
    let p = state.player(player);
    let available = p.hero.resource_points + p.hand_pitch_total(Some(card.id()));
    card.template().cost_value() <= available
}

/// Whether the player has an action point and an attack they can pay for.
#[must_use]
pub fn has_affordable_attack(state: &GameState, player: PlayerId) -> bool {
    let p = state.player(player);
    if p.hero.action_points < 1 {
        return false;
    }
    let banished = p.zones.banished.iter().filter(|c| c.playable_from_banished);
    p.zones
        .hand
        .iter()
        .chain(banished)
        .any(|c| c.template().is_attack() && can_afford(state, player, c))
}
