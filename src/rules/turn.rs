//! Turn structure: start of turn, drawing, and end-of-turn cleanup.

use tracing::{debug, info, trace};

use crate::combat::CombatEngine;
use crate::core::config::EngineConfig;
use crate::core::error::ActionError;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Phase};
use crate::zones::{ZoneKind, ZonePosition};

/// Enter the turn player's Start Phase and move straight on to the Action
/// Phase with one action point.
pub fn begin_turn(state: &mut GameState) {
    state.phase = Phase::StartPhase;
    info!(turn = state.turn_number, player = %state.turn_player, "turn start");

    let player = state.turn_player;
    state.active_player = player;
    state.player_mut(player).hero.action_points = 1;
    state.phase = Phase::ActionPhase;
}

/// Draw from the top of the deck until the hand holds `target` cards.
///
/// Stops quietly when the deck runs out. Returns the number drawn.
pub fn draw_up_to(state: &mut GameState, player: PlayerId, target: usize) -> Result<u32, ActionError> {
    let zones = &mut state.player_mut(player).zones;
    let mut drawn = 0;
    while zones.hand.len() < target {
        let Some(card) = zones.deck.draw_top() else {
            debug!(player = %player, "deck empty");
            break;
        };
        trace!(card = card.name(), "deck -> hand");
        zones.hand.add(card, None)?;
        drawn += 1;
    }
    Ok(drawn)
}

/// Run the End Phase and start the next turn.
///
/// Returns the number of cards drawn across both players.
pub fn end_turn(state: &mut GameState, config: &EngineConfig) -> Result<u32, ActionError> {
    if state.combat_chain.is_open() {
        CombatEngine::close_chain(state)?;
    }
    state.phase = Phase::EndPhase;
    let turn_player = state.turn_player;
    debug!(turn = state.turn_number, player = %turn_player, "end phase");

    arsenal_step(state, turn_player);

    for player in PlayerId::both() {
        let zones = &mut state.player_mut(player).zones;
        for mut card in zones.pitch.take_all() {
            card.reset_for_zone_change();
            trace!(card = card.name(), "pitch -> deck bottom");
            zones.deck.add(card, Some(ZonePosition::Bottom))?;
        }
    }

    let zones = &mut state.player_mut(turn_player).zones;
    for kind in ZoneKind::EQUIPMENT.into_iter().chain([ZoneKind::Weapon]) {
        for card in zones.zone_mut(kind).iter_mut() {
            card.tapped = false;
        }
    }

    for (_, player) in state.players.iter_mut() {
        player.hero.reset_points();
    }

    let intellect = state.player(turn_player).hero.intellect();
    let mut drawn = draw_up_to(state, turn_player, intellect)?;
    if state.turn_number == 1 && config.refill_second_player_on_first_turn {
        let other = turn_player.opponent();
        let intellect = state.player(other).hero.intellect();
        drawn += draw_up_to(state, other, intellect)?;
    }

    for (_, player) in state.players.iter_mut() {
        let zones = &mut player.zones;
        for card in zones.hand.iter_mut().chain(zones.arsenal.iter_mut()) {
            card.clear_turn_modifiers();
        }
        for card in zones.banished.iter_mut() {
            card.playable_from_banished = false;
        }
        player.hero.ability_used_this_turn = false;
        player.damage_dealt_this_turn = 0;
    }

    state.turn_player = turn_player.opponent();
    state.turn_number += 1;
    begin_turn(state);
    Ok(drawn)
}

/// Arsenal refresh. Cards are only placed into the arsenal by explicit
/// effects, so there is nothing to do here yet.
fn arsenal_step(_state: &mut GameState, player: PlayerId) {
    trace!(player = %player, "arsenal step");
}
