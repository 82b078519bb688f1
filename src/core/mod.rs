//! Core engine types: ids, players, state, actions, RNG, configuration, errors.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, ActionResult, ActionType};
pub use config::{EngineConfig, LifePolicy, PlayerSetup};
pub use entity::{IdAllocator, InstanceId};
pub use error::{ActionError, SetupError};
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Phase, PlayerState};
