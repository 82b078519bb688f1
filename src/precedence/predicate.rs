//! Structured context predicates.
//!
//! A predicate is inspectable data evaluated against a
//! `PrecedenceContext`, so effects can be serialized and compared.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::core::state::{GameState, Phase};

/// The facts an effect's predicate may look at.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceContext {
    /// Player attempting the action.
    pub player: Option<PlayerId>,
    pub turn_player: Option<PlayerId>,
    pub phase: Option<Phase>,
    pub in_combat: bool,
    /// Named integer facts (e.g. `"cards_in_hand"`). Flags are non-zero values.
    pub values: FxHashMap<String, i64>,
}

impl PrecedenceContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the facts about `player` in `state`.
    #[must_use]
    pub fn from_state(state: &GameState, player: PlayerId) -> Self {
        let p = state.player(player);
        Self::new()
            .with_player(player)
            .with_turn_player(state.turn_player)
            .with_phase(state.phase)
            .with_combat(state.combat_chain.is_open())
            .with_value("life", i64::from(p.hero.life))
            .with_value("action_points", i64::from(p.hero.action_points))
            .with_value("resource_points", i64::from(p.hero.resource_points))
            .with_value("cards_in_hand", p.zones.hand.len() as i64)
            .with_value("damage_dealt_this_turn", i64::from(p.damage_dealt_this_turn))
            .with_value("turn_number", i64::from(state.turn_number))
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn with_turn_player(mut self, player: PlayerId) -> Self {
        self.turn_player = Some(player);
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    #[must_use]
    pub fn with_combat(mut self, in_combat: bool) -> Self {
        self.in_combat = in_combat;
        self
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: i64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_flag(self, key: impl Into<String>) -> Self {
        self.with_value(key, 1)
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }
}

/// Condition under which an effect applies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextPredicate {
    /// Acting player is this player.
    PlayerIs(PlayerId),
    /// Acting player is the turn player.
    IsTurnPlayer,
    PhaseIs(Phase),
    InCombat,
    /// Named value exists and is non-zero.
    Flag(String),
    ValueEquals { key: String, value: i64 },
    ValueAtLeast { key: String, min: i64 },
    ValueAtMost { key: String, max: i64 },
    Not(Box<ContextPredicate>),
    All(Vec<ContextPredicate>),
    Any(Vec<ContextPredicate>),
}

impl ContextPredicate {
    /// Evaluate against a context. Missing facts make comparisons false.
    #[must_use]
    pub fn evaluate(&self, context: &PrecedenceContext) -> bool {
        match self {
            ContextPredicate::PlayerIs(player) => context.player == Some(*player),
            ContextPredicate::IsTurnPlayer => {
                context.player.is_some() && context.player == context.turn_player
            }
            ContextPredicate::PhaseIs(phase) => context.phase == Some(*phase),
            ContextPredicate::InCombat => context.in_combat,
            ContextPredicate::Flag(key) => context.value(key).is_some_and(|v| v != 0),
            ContextPredicate::ValueEquals { key, value } => context.value(key) == Some(*value),
            ContextPredicate::ValueAtLeast { key, min } => context.value(key).is_some_and(|v| v >= *min),
            ContextPredicate::ValueAtMost { key, max } => context.value(key).is_some_and(|v| v <= *max),
            ContextPredicate::Not(inner) => !inner.evaluate(context),
            ContextPredicate::All(preds) => preds.iter().all(|p| p.evaluate(context)),
            ContextPredicate::Any(preds) => preds.iter().any(|p| p.evaluate(context)),
        }
    }

    #[must_use]
    pub fn not(predicate: ContextPredicate) -> Self {
        ContextPredicate::Not(Box::new(predicate))
    }

    #[must_use]
    pub fn flag(key: impl Into<String>) -> Self {
        ContextPredicate::Flag(key.into())
    }

    #[must_use]
    pub fn at_least(key: impl Into<String>, min: i64) -> Self {
        ContextPredicate::ValueAtLeast { key: key.into(), min }
    }
}
