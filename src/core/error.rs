//! Error types for game setup and action execution.
//!
//! Errors never cross the `execute_action` surface as `Err`: the engine
//! turns them into a failed `ActionResult` carrying the error's message.

use thiserror::Error;

use super::entity::InstanceId;
use super::player::PlayerId;
use super::state::Phase;
use crate::cards::TemplateId;
use crate::zones::{ZoneError, ZoneKind};

/// Reasons an action is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,

    #[error("{0} is not the active player")]
    NotActivePlayer(PlayerId),

    #[error("not allowed during {0:?}")]
    WrongPhase(Phase),

    #[error("an attack is still resolving")]
    CombatInProgress,

    #[error("no attack is waiting for defenders")]
    NotDefending,

    #[error("action names no card")]
    MissingCard,

    #[error("{card} is not in {zone}")]
    CardNotFound { card: InstanceId, zone: ZoneKind },

    #[error("{0} cannot be played now")]
    NotPlayable(InstanceId),

    #[error("{0} has no pitch value")]
    NotPitchable(InstanceId),

    #[error("no action points left")]
    NoActionPoints,

    #[error("needs {needed} resources, only {available} available")]
    InsufficientResources { needed: i32, available: i32 },

    #[error("{0} is not a legal target")]
    InvalidTarget(PlayerId),

    #[error("{0} has no hero ability")]
    NoHeroAbility(String),

    #[error("hero ability already used this turn")]
    HeroAbilityUsed,

    #[error(transparent)]
    Zone(#[from] ZoneError),
}

/// Reasons a game cannot be built from the given loadouts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("{0} is not a hero card")]
    NotAHero(TemplateId),

    #[error("hero {0} has no life total")]
    HeroWithoutLife(TemplateId),

    #[error("{0} is not equipment with a slot subtype")]
    NotEquipment(TemplateId),

    #[error("{0} is not a weapon")]
    NotAWeapon(TemplateId),

    #[error(transparent)]
    Zone(#[from] ZoneError),
}
