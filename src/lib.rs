//! # rust-tcg
//!
//! A deterministic rules engine for a two-player trading card game.
//!
//! ## Design Principles
//!
//! 1. **One Mutation Surface**: Every change goes through an `Action` passed
//!    to `execute_action`, which always answers with an `ActionResult`.
//!
//! 2. **Rules As Data**: Keywords, hero abilities and precedence effects are
//!    enums and tables, not callbacks, so they serialize and compare.
//!
//! 3. **Reproducible Games**: Instance ids come from a per-game allocator
//!    and shuffles from a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Ids, players, state, actions, RNG, configuration, errors
//! - `zones`: Per-player zones (deck, hand, pitch, equipment slots, ...)
//! - `cards`: Templates, instances, keywords, heroes, registry
//! - `combat`: Combat chain, defender declaration, damage, arcane damage
//! - `rules`: `RulesEngine` trait, `GameEngine`, turn structure
//! - `precedence`: Restriction/requirement/allowance resolver

pub mod core;
pub mod zones;
pub mod cards;
pub mod combat;
pub mod rules;
pub mod precedence;

// Re-export commonly used types
pub use crate::core::{
    InstanceId, IdAllocator, PlayerId, PlayerMap,
    GameRng, GameRngState,
    EngineConfig, LifePolicy, PlayerSetup,
    Action, ActionType, ActionResult, ActionRecord,
    ActionError, SetupError,
    GameState, PlayerState, Phase,
};

pub use crate::zones::{PlayerZones, Zone, ZoneError, ZoneKind, ZonePosition};

pub use crate::cards::{
    CardTemplate, CardType, Color, Subtype, Supertype, TemplateId,
    CardInstance, Keyword, KeywordMap,
    HeroState, HeroAbility, HeroAbilityTable,
    CardRegistry, RegistryError,
};

pub use crate::combat::{ChainLink, CombatChain, CombatEngine, CombatOutcome, CombatStep, Defender};

pub use crate::rules::{GameEngine, GameResult, RulesEngine};

pub use crate::precedence::{
    ActionKind, ActionMatcher, EffectKind,
    ContextPredicate, PrecedenceContext,
    PrecedenceEffect, PrecedenceError, PrecedenceOutcome, PrecedenceResolver,
};
