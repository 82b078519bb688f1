//! The game engine: setup, legal actions, and action execution.
//!
//! `GameEngine` owns one `GameState` and is the only thing that mutates it.
//!
//! ```
//! use std::sync::Arc;
//! use rust_tcg::cards::{CardTemplate, CardType, Subtype, TemplateId};
//! use rust_tcg::core::{Action, EngineConfig, PlayerId, PlayerSetup};
//! use rust_tcg::rules::{GameEngine, RulesEngine};
//!
//! let hero = Arc::new(
//!     CardTemplate::new(TemplateId::new(1), "Hero")
//!         .with_type(CardType::Hero)
//!         .with_life(20)
//!         .with_intellect(4),
//! );
//! let strike = Arc::new(
//!     CardTemplate::new(TemplateId::new(2), "Strike")
//!         .with_type(CardType::Action)
//!         .with_subtype(Subtype::Attack)
//!         .with_power(3)
//!         .with_defense(2)
//!         .with_pitch(1),
//! );
//! let setup = PlayerSetup::new(hero).with_cards(&strike, 20);
//!
//! let mut engine = GameEngine::new(EngineConfig::new().with_seed(1), [setup.clone(), setup]).unwrap();
//! engine.setup().unwrap();
//!
//! let p0 = PlayerId::new(0);
//! assert!(!engine.legal_actions(p0).is_empty());
//!
//! let result = engine.execute_action(&Action::end_phase(p0));
//! assert!(result.success);
//! assert_eq!(engine.state().turn_player, PlayerId::new(1));
//! ```

use tracing::{debug, info};

use crate::core::action::{Action, ActionResult, ActionType};
use crate::core::config::{EngineConfig, PlayerSetup};
use crate::core::error::{ActionError, SetupError};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, Phase};

use super::engine::{GameResult, RulesEngine};
use super::handlers::{self, PlaySource};
use super::legal;
use super::turn::{begin_turn, draw_up_to};

/// Two-player rules engine.
#[derive(Clone, Debug)]
pub struct GameEngine {
    state: GameState,
    config: EngineConfig,
}

impl GameEngine {
    /// Build a game from two loadouts. Call `setup` before playing.
    pub fn new(config: EngineConfig, setups: [PlayerSetup; 2]) -> Result<Self, SetupError> {
        let state = GameState::new(setups, &config)?;
        Ok(Self { state, config })
    }

    /// Shuffle both decks, draw opening hands, and start turn one.
    ///
    /// Player 0 takes the first turn.
    pub fn setup(&mut self) -> Result<(), ActionError> {
        if self.state.phase != Phase::NotStarted {
            return Err(ActionError::WrongPhase(self.state.phase));
        }
        self.state.phase = Phase::StartOfGame;

        for player in PlayerId::both() {
            let state = &mut self.state;
            state.players[player].zones.deck.shuffle(&mut state.rng);
            let intellect = state.player(player).hero.intellect();
            draw_up_to(state, player, intellect)?;
        }

        info!(seed = self.state.rng.seed(), "game setup complete");
        self.state.turn_number = 1;
        self.state.turn_player = PlayerId::new(0);
        begin_turn(&mut self.state);
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scenario setup in tests and tools.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Legal actions for `player`. Empty unless they are active.
    #[must_use]
    pub fn get_legal_actions(&self, player: PlayerId) -> Vec<Action> {
        legal::legal_actions(&self.state, &self.config, player)
    }

    fn dispatch(&mut self, action: &Action) -> Result<ActionResult, ActionError> {
        if self.state.is_game_over() {
            return Err(ActionError::GameOver);
        }
        if action.player_id != self.state.active_player {
            return Err(ActionError::NotActivePlayer(action.player_id));
        }

        let state = &mut self.state;
        match action.action_type {
            ActionType::PitchCard => handlers::pitch_card(state, action),
            ActionType::PlayCardFromHand => handlers::play_card(state, action, PlaySource::Hand),
            ActionType::PlayCardFromBanished => handlers::play_card(state, action, PlaySource::Banished),
            ActionType::DeclareDefenders => handlers::declare_defenders(state, action),
            ActionType::ActivateHeroAbility => handlers::activate_hero_ability(state, &self.config, action),
            ActionType::EndPhase => handlers::end_phase(state, &self.config),
        }
    }
}

impl RulesEngine for GameEngine {
    fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        self.get_legal_actions(player)
    }

    /// Execute an action. Rejections come back as a failed result, never as
    /// a panic.
    fn execute_action(&mut self, action: &Action) -> ActionResult {
        debug!(player = %action.player_id, action = ?action.action_type, "execute");

        let turn = self.state.turn_number;
        let result = match self.dispatch(action) {
            Ok(result) => {
                self.state.record_action(action.player_id, action.clone(), turn);
                result
            }
            Err(err) => {
                debug!(%err, "action rejected");
                ActionResult::failure(err.to_string())
            }
        };

        debug_assert!(
            self.state.check_zone_exclusivity().is_ok(),
            "card present in two places"
        );
        result
    }

    fn result(&self) -> Option<GameResult> {
        self.state.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, CardType, Subtype, TemplateId};
    use std::sync::Arc;

    const P0: PlayerId = PlayerId(0);
    const P1: PlayerId = PlayerId(1);

    fn engine() -> GameEngine {
        let hero = Arc::new(
            CardTemplate::new(TemplateId::new(1), "Hero")
                .with_type(CardType::Hero)
                .with_life(20)
                .with_intellect(4),
        );
        let card = Arc::new(
            CardTemplate::new(TemplateId::new(2), "Strike")
                .with_type(CardType::Action)
                .with_subtype(Subtype::Attack)
                .with_power(3)
                .with_defense(2)
                .with_pitch(1),
        );
        let setup = PlayerSetup::new(hero).with_cards(&card, 12);
        GameEngine::new(EngineConfig::new().with_seed(11), [setup.clone(), setup]).unwrap()
    }

    #[test]
    fn test_setup_draws_to_intellect() {
        let mut engine = engine();
        engine.setup().unwrap();

        let state = engine.state();
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.phase, Phase::ActionPhase);
        assert_eq!(state.active_player, P0);
        assert_eq!(state.player(P0).hero.action_points, 1);
        for player in PlayerId::both() {
            assert_eq!(state.player(player).zones.hand.len(), 4);
            assert_eq!(state.player(player).zones.deck.len(), 8);
        }
    }

    #[test]
    fn test_setup_twice_rejected() {
        let mut engine = engine();
        engine.setup().unwrap();

        assert_eq!(engine.setup(), Err(ActionError::WrongPhase(Phase::ActionPhase)));
    }

    #[test]
    fn test_action_before_setup_rejected() {
        let mut engine = engine();
        let result = engine.execute_action(&Action::end_phase(P0));

        assert!(!result.success);
        assert!(engine.state().history.is_empty());
    }

    #[test]
    fn test_inactive_player_rejected() {
        let mut engine = engine();
        engine.setup().unwrap();

        let result = engine.execute_action(&Action::end_phase(P1));

        assert!(!result.success);
        assert_eq!(result.message, "Player 1 is not the active player");
    }

    #[test]
    fn test_history_records_successes() {
        let mut engine = engine();
        engine.setup().unwrap();

        engine.execute_action(&Action::end_phase(P1));
        engine.execute_action(&Action::end_phase(P0));

        let history = &engine.state().history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].player, P0);
        assert_eq!(history[0].turn, 1);
        assert_eq!(history[0].sequence, 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = engine();
        let mut b = engine();
        a.setup().unwrap();
        b.setup().unwrap();

        assert_eq!(a.state().players, b.state().players);
        assert_eq!(a.legal_actions(P0), b.legal_actions(P0));
    }
}
