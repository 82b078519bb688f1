//! Combat step resolution.
//!
//! `CombatEngine` drives a chain link through its steps. Playing an attack
//! runs Layer → Attack → Defend in one call and hands priority to the
//! defending player; declaring defenders runs Reaction → Damage →
//! Resolution. Closing the chain applies post-defend keywords and sends
//! every card the chain held to a graveyard.

use tracing::{debug, trace};

use super::arcane::deal_arcane_damage;
use super::chain::{ChainLink, CombatStep, Defender};
use crate::cards::{CardInstance, Keyword};
use crate::core::entity::InstanceId;
use crate::core::error::ActionError;
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Phase};
use crate::zones::{ZoneError, ZoneKind};

/// What a defend/damage/resolution sequence produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    pub damage: i32,
    pub hit: bool,
    pub arcane_damage: i32,
    pub action_points_gained: i32,
}

/// Resolves combat on a `GameState`.
pub struct CombatEngine;

impl CombatEngine {
    /// Put an attack on the chain and advance to the Defend step.
    ///
    /// The card must already be out of its zone. If the target hero is dead
    /// the chain skips straight to Close.
    pub fn open_attack(
        state: &mut GameState,
        attacker: PlayerId,
        mut card: CardInstance,
        target: PlayerId,
    ) -> Result<(), ZoneError> {
        card.controller = Some(attacker);
        card.face_up = true;
        debug!(
            player = %attacker,
            card = card.name(),
            power = card.effective_power().unwrap_or(0),
            "attack"
        );

        state.combat_chain.push_link(ChainLink::new(attacker, card, target));
        state.combat_chain.set_step(CombatStep::Attack);

        if state.player(target).hero.is_dead() {
            return Self::close_chain(state);
        }

        state.combat_chain.set_step(CombatStep::Defend);
        state.active_player = target;
        Ok(())
    }

    /// Declare defenders for the current link, then resolve it.
    ///
    /// Hand candidates are scanned in hand order, so when Dominate or
    /// Overpower forces a choice the earliest cards in hand win. Candidates
    /// that fail a rule are skipped, not rejected.
    pub fn declare_defenders(
        state: &mut GameState,
        defender: PlayerId,
        candidates: &[InstanceId],
    ) -> Result<CombatOutcome, ActionError> {
        let link = match state.combat_chain.current_link() {
            Some(link) if state.combat_step() == CombatStep::Defend && link.target == defender => link,
            _ => return Err(ActionError::NotDefending),
        };
        let dominate = link.attack.has_keyword(Keyword::Dominate);
        let overpower = link.attack.has_keyword(Keyword::Overpower);
        let mut hand_committed = link.hand_defender_count();
        let mut actions_committed = link.action_defender_count();

        let zones = &state.player(defender).zones;
        for &id in candidates {
            if !zones.hand.contains(id) && zones.locate_equipment(id).is_none() {
                return Err(ActionError::CardNotFound {
                    card: id,
                    zone: ZoneKind::Hand,
                });
            }
        }

        let mut accepted_hand = Vec::new();
        for card in zones.hand.iter().filter(|c| candidates.contains(&c.id())) {
            if card.effective_defense().is_none() {
                debug!(card = card.name(), "no defense value, skipped");
                continue;
            }
            if dominate && hand_committed >= 1 {
                debug!(card = card.name(), "dominate blocks extra hand defender");
                continue;
            }
            let is_action = card.template().is_action();
            if overpower && is_action && actions_committed >= 1 {
                debug!(card = card.name(), "overpower blocks extra action defender");
                continue;
            }
            hand_committed += 1;
            if is_action {
                actions_committed += 1;
            }
            accepted_hand.push(card.id());
        }

        let accepted_equipment: Vec<InstanceId> = candidates
            .iter()
            .copied()
            .filter(|&id| {
                zones
                    .equipment_card(id)
                    .and_then(CardInstance::effective_defense)
                    .is_some_and(|defense| defense > 0)
            })
            .collect();

        let mut defenders = Vec::with_capacity(accepted_hand.len() + accepted_equipment.len());
        let hand = &mut state.player_mut(defender).zones.hand;
        for id in accepted_hand {
            if let Some(mut card) = hand.remove(id) {
                card.controller = Some(defender);
                card.face_up = true;
                trace!(card = card.name(), "hand -> chain");
                defenders.push(Defender::Hand(card));
            }
        }
        defenders.extend(
            accepted_equipment
                .into_iter()
                .map(|id| Defender::Equipment { id, owner: defender }),
        );
        debug!(player = %defender, count = defenders.len(), "defenders declared");

        if let Some(link) = state.combat_chain.current_link_mut() {
            for d in defenders {
                if !link.is_defended_by(d.id()) {
                    link.defenders.push(d);
                }
            }
        }

        state.combat_chain.set_step(CombatStep::Reaction);
        let mut outcome = Self::damage_step(state);
        Self::resolution_step(state, &mut outcome);
        Ok(outcome)
    }

    /// Sum of defense across a link's defenders.
    #[must_use]
    pub fn total_defense(state: &GameState, link: &ChainLink) -> i32 {
        link.defenders
            .iter()
            .map(|d| match d {
                Defender::Hand(card) => card.effective_defense(),
                Defender::Equipment { id, owner } => state
                    .player(*owner)
                    .zones
                    .equipment_card(*id)
                    .and_then(CardInstance::effective_defense),
            })
            .map(|defense| defense.unwrap_or(0).max(0))
            .sum()
    }

    fn damage_step(state: &mut GameState) -> CombatOutcome {
        state.combat_chain.set_step(CombatStep::Damage);

        if let Some(link) = state.combat_chain.current_link_mut() {
            if link.has_equipment_defender() {
                if let Some(pierce) = link.attack.keyword_value(Keyword::Piercing) {
                    link.attack.temp_power += pierce as i32;
                    debug!(pierce, "piercing");
                }
            }
        }

        let Some(link) = state.combat_chain.current_link() else {
            return CombatOutcome::default();
        };
        let power = link.attack.effective_power().unwrap_or(0);
        let defense = Self::total_defense(state, link);
        let damage = (power - defense).max(0);
        let (attacker, target) = (link.attacker, link.target);
        debug!(power, defense, damage, "damage step");

        if damage == 0 {
            return CombatOutcome::default();
        }

        let policy = state.life_policy;
        state.player_mut(target).hero.lose_life(damage, policy);
        state.player_mut(attacker).damage_dealt_this_turn += damage;
        if let Some(link) = state.combat_chain.current_link_mut() {
            link.did_hit = true;
            link.damage_dealt = damage;
        }
        state.check_game_over();

        CombatOutcome {
            damage,
            hit: true,
            ..CombatOutcome::default()
        }
    }

    fn resolution_step(state: &mut GameState, outcome: &mut CombatOutcome) {
        state.combat_chain.set_step(CombatStep::Resolution);

        let Some(link) = state.combat_chain.current_link() else {
            return;
        };
        let (attacker, target) = (link.attacker, link.target);
        let go_again = link.attack.has_keyword(Keyword::GoAgain);
        let arcane = link.attack.template().arcane.unwrap_or(0);
        state.active_player = state.turn_player;

        if go_again {
            state.player_mut(attacker).hero.action_points += 1;
            outcome.action_points_gained += 1;
            debug!(player = %attacker, "go again");
        }

        if outcome.hit && arcane > 0 {
            outcome.arcane_damage = deal_arcane_damage(state, attacker, target, arcane);
        }
    }

    /// Close the chain.
    ///
    /// Post-defend keywords apply to every defender of every link, in the
    /// order Battleworn, Blade Break, Temper, Guardwell. Destroyed
    /// equipment, attacks and hand defenders then go to their owners'
    /// graveyards, and the turn player resumes the Action Phase.
    pub fn close_chain(state: &mut GameState) -> Result<(), ZoneError> {
        state.combat_chain.set_step(CombatStep::Close);
        let links = state.combat_chain.close();
        debug!(links = links.len(), "closing combat chain");

        let mut result = Ok(());
        for link in links {
            for defender in link.defenders {
                let moved = match defender {
                    Defender::Hand(mut card) => {
                        apply_post_defend(&mut card);
                        to_graveyard(state, card)
                    }
                    Defender::Equipment { id, owner } => destroy_if_spent(state, id, owner),
                };
                result = result.and(moved);
            }
            result = result.and(to_graveyard(state, link.attack));
        }

        if state.phase != Phase::GameOver {
            state.phase = Phase::ActionPhase;
        }
        state.active_player = state.turn_player;
        result
    }
}

/// Apply post-defend keywords. Returns whether the card is destroyed.
fn apply_post_defend(card: &mut CardInstance) -> bool {
    let mut destroyed = false;
    if card.has_keyword(Keyword::Battleworn) {
        card.defense_counters -= 1;
    }
    if card.has_keyword(Keyword::BladeBreak) {
        destroyed = true;
    }
    if card.has_keyword(Keyword::Temper) {
        card.defense_counters -= 1;
        if card.effective_defense().unwrap_or(0) <= 0 {
            destroyed = true;
        }
    }
    if card.has_keyword(Keyword::Guardwell) {
        card.defense_counters -= card.effective_defense().unwrap_or(0);
    }
    destroyed
}

fn destroy_if_spent(state: &mut GameState, id: InstanceId, owner: PlayerId) -> Result<(), ZoneError> {
    let zones = &mut state.player_mut(owner).zones;
    // Already destroyed by an earlier link
    let Some(card) = zones.equipment_card_mut(id) else {
        return Ok(());
    };
    if !apply_post_defend(card) {
        return Ok(());
    }
    match zones.locate_equipment(id).and_then(|slot| zones.zone_mut(slot).remove(id)) {
        Some(card) => {
            debug!(card = card.name(), "equipment destroyed");
            to_graveyard(state, card)
        }
        None => Ok(()),
    }
}

fn to_graveyard(state: &mut GameState, mut card: CardInstance) -> Result<(), ZoneError> {
    card.reset_for_zone_change();
    trace!(card = card.name(), owner = %card.owner(), "chain -> graveyard");
    let owner = card.owner();
    state.player_mut(owner).zones.graveyard.add(card, None)
}
