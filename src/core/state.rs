//! Game state aggregate.
//!
//! ## PlayerState
//!
//! One player's hero, zones, and per-turn bookkeeping.
//!
//! ## GameState
//!
//! Both players, turn/phase markers, the combat chain, the shuffle RNG, the
//! instance id allocator and the action history. Created once per game and
//! mutated in place by the engine.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::action::{Action, ActionRecord};
use super::config::{EngineConfig, LifePolicy, PlayerSetup};
use super::entity::{IdAllocator, InstanceId};
use super::error::SetupError;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardInstance, CardTemplate, HeroState};
use crate::combat::{CombatChain, CombatStep};
use crate::rules::GameResult;
use crate::zones::{PlayerZones, ZonePosition};

use std::sync::Arc;

/// Turn-structure phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    StartOfGame,
    StartPhase,
    ActionPhase,
    EndPhase,
    GameOver,
}

/// One player's runtime state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    id: PlayerId,
    pub hero: HeroState,
    pub zones: PlayerZones,
    pub damage_dealt_this_turn: i32,
    starting_cards: usize,
}

impl PlayerState {
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Cards this player started the game with, hero included.
    #[must_use]
    pub fn starting_cards(&self) -> usize {
        self.starting_cards
    }

    /// Pitch value available from every pitchable hand card except `excluding`.
    #[must_use]
    pub fn hand_pitch_total(&self, excluding: Option<InstanceId>) -> i32 {
        self.zones
            .hand
            .iter()
            .filter(|c| Some(c.id()) != excluding)
            .map(|c| c.template().pitch_value())
            .sum()
    }
}

/// Complete game state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub players: PlayerMap<PlayerState>,
    pub turn_player: PlayerId,
    pub active_player: PlayerId,
    pub phase: Phase,
    pub combat_chain: CombatChain,
    /// Turn number (0 before setup, 1 on the first turn).
    pub turn_number: u32,
    /// Set once the game is decided.
    pub result: Option<GameResult>,
    pub life_policy: LifePolicy,
    pub history: Vec<ActionRecord>,
    pub rng: GameRng,
    ids: IdAllocator,
}

impl GameState {
    /// Build a game from two loadouts. Every card is created through the
    /// game's own id allocator; decks are left unshuffled until setup.
    pub fn new(setups: [PlayerSetup; 2], config: &EngineConfig) -> Result<Self, SetupError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut ids = IdAllocator::new();

        let [first, second] = setups;
        let first = Self::build_player(PlayerId::new(0), first, &mut ids)?;
        let second = Self::build_player(PlayerId::new(1), second, &mut ids)?;

        info!(
            seed = rng.seed(),
            hero_0 = first.hero.name(),
            hero_1 = second.hero.name(),
            "game created"
        );

        Ok(Self {
            players: PlayerMap::from_pair(first, second),
            turn_player: PlayerId::new(0),
            active_player: PlayerId::new(0),
            phase: Phase::NotStarted,
            combat_chain: CombatChain::new(),
            turn_number: 0,
            result: None,
            life_policy: config.life_policy,
            history: Vec::new(),
            rng,
            ids,
        })
    }

    fn build_player(
        id: PlayerId,
        setup: PlayerSetup,
        ids: &mut IdAllocator,
    ) -> Result<PlayerState, SetupError> {
        let starting_cards = setup.card_count();
        let hero_template = setup.hero;
        if !hero_template.is_hero() {
            return Err(SetupError::NotAHero(hero_template.id));
        }
        if hero_template.life.is_none() {
            return Err(SetupError::HeroWithoutLife(hero_template.id));
        }

        let mut zones = PlayerZones::new(id);
        let mut hero_card = CardInstance::new(ids.next_id(), Arc::clone(&hero_template), id);
        hero_card.face_up = true;
        zones.hero.add(hero_card, None)?;

        for template in setup.equipment {
            let slot = template
                .equipment_slot()
                .and_then(PlayerZones::slot_for)
                .ok_or(SetupError::NotEquipment(template.id))?;
            let mut card = CardInstance::new(ids.next_id(), template, id);
            card.face_up = true;
            zones.zone_mut(slot).add(card, None)?;
        }

        for template in setup.weapons {
            if !template.is_weapon() {
                return Err(SetupError::NotAWeapon(template.id));
            }
            let mut card = CardInstance::new(ids.next_id(), template, id);
            card.face_up = true;
            zones.weapons.add(card, None)?;
        }

        for template in setup.deck {
            let card = CardInstance::new(ids.next_id(), template, id);
            zones.deck.add(card, Some(ZonePosition::Top))?;
        }

        Ok(PlayerState {
            id,
            hero: HeroState::new(hero_template),
            zones,
            damage_dealt_this_turn: 0,
            starting_cards,
        })
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id]
    }

    // === Cards ===

    /// Create a new card owned by `owner`. The card is not placed anywhere.
    pub fn create_card(&mut self, template: Arc<CardTemplate>, owner: PlayerId) -> CardInstance {
        CardInstance::new(self.ids.next_id(), template, owner)
    }

    /// Cards a player currently has in zones or on the combat chain.
    #[must_use]
    pub fn card_count(&self, player: PlayerId) -> usize {
        self.players[player].zones.total_cards() + self.combat_chain.cards_held_by(player)
    }

    /// Verify no instance id appears twice across all zones and the chain.
    ///
    /// Returns the first duplicated id.
    pub fn check_zone_exclusivity(&self) -> Result<(), InstanceId> {
        let mut seen = rustc_hash::FxHashSet::default();
        let zone_ids = self
            .players
            .iter()
            .flat_map(|(_, p)| p.zones.all().flat_map(|z| z.iter().map(CardInstance::id)));
        for id in zone_ids.chain(self.combat_chain.held_ids()) {
            if !seen.insert(id) {
                return Err(id);
            }
        }
        Ok(())
    }

    // === Status ===

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Winning player, `None` while running or after a draw.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.result {
            Some(GameResult::Winner(player)) => Some(player),
            _ => None,
        }
    }

    #[must_use]
    pub fn combat_step(&self) -> CombatStep {
        self.combat_chain.step()
    }

    /// End the game if a hero is at or below zero life.
    ///
    /// Both heroes dead at once is a draw.
    pub fn check_game_over(&mut self) -> Option<GameResult> {
        if self.result.is_some() {
            return self.result;
        }

        let dead: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|(_, p)| p.hero.is_dead())
            .map(|(id, _)| id)
            .collect();

        let result = match dead.as_slice() {
            [] => return None,
            [loser] => GameResult::Winner(loser.opponent()),
            _ => GameResult::Draw,
        };

        info!(?result, turn = self.turn_number, "game over");
        self.phase = Phase::GameOver;
        self.result = Some(result);
        Some(result)
    }

    /// Append a successful action taken during `turn` to the history.
    pub fn record_action(&mut self, player: PlayerId, action: Action, turn: u32) {
        let sequence = self.history.len() as u32;
        self.history.push(ActionRecord {
            player,
            action,
            turn,
            sequence,
        });
    }
}
