//! Precedence effects and the action kinds they apply to.
//!
//! ## Action kinds
//!
//! `ActionKind` is a closed set with a parent relation: `PlayAttack` is a
//! `PlayCard`, `DefendWithHand` is a `Defend`, and so on. Effects match by
//! exact kind or by ancestry, never by substring.
//!
//! ## Identifier grammar
//!
//! | Identifier | Matches                                    |
//! |------------|--------------------------------------------|
//! | `cant_X`   | `X` and its descendants                    |
//! | `only_X`   | everything except `X` and its descendants  |
//! | `must_X`   | `X` and its descendants                    |
//! | `may_X`    | `X` and its descendants                    |
//! | `X`        | exactly `X`                                |
//!
//! `X` is the exact snake-case name of an `ActionKind`.
//!
//! ```
//! use rust_tcg::precedence::{ActionKind, EffectKind, PrecedenceEffect};
//!
//! let effect = PrecedenceEffect::from_identifier(EffectKind::Restriction, "cant_play_card").unwrap();
//! assert!(effect.applies_to(ActionKind::PlayAttack));
//! assert!(!effect.applies_to(ActionKind::Pitch));
//!
//! let only = PrecedenceEffect::from_identifier(EffectKind::Restriction, "only_defend").unwrap();
//! assert!(only.applies_to(ActionKind::PlayAttack));
//! assert!(!only.applies_to(ActionKind::DefendWithHand));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::predicate::{ContextPredicate, PrecedenceContext};
use crate::core::action::{Action, ActionType};
use crate::core::entity::InstanceId;
use crate::core::state::GameState;

/// Errors from building precedence effects.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PrecedenceError {
    #[error("unknown action kind: {0:?}")]
    UnknownAction(String),
}

/// How an effect bears on an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Forbids matching actions outright.
    Restriction,
    /// The player must take a matching action. Permits it.
    Requirement,
    /// The player may take a matching action.
    Allowance,
}

/// Closed set of actions precedence effects can name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Pitch,
    PlayCard,
    PlayAttack,
    PlayNonAttackAction,
    PlayInstant,
    PlayFromBanished,
    Defend,
    DefendWithHand,
    DefendWithEquipment,
    ActivateAbility,
    ActivateHeroAbility,
    Draw,
    EndPhase,
}

impl ActionKind {
    pub const ALL: [ActionKind; 13] = [
        ActionKind::Pitch,
        ActionKind::PlayCard,
        ActionKind::PlayAttack,
        ActionKind::PlayNonAttackAction,
        ActionKind::PlayInstant,
        ActionKind::PlayFromBanished,
        ActionKind::Defend,
        ActionKind::DefendWithHand,
        ActionKind::DefendWithEquipment,
        ActionKind::ActivateAbility,
        ActionKind::ActivateHeroAbility,
        ActionKind::Draw,
        ActionKind::EndPhase,
    ];

    /// Snake-case identifier used by the grammar.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Pitch => "pitch",
            ActionKind::PlayCard => "play_card",
            ActionKind::PlayAttack => "play_attack",
            ActionKind::PlayNonAttackAction => "play_non_attack_action",
            ActionKind::PlayInstant => "play_instant",
            ActionKind::PlayFromBanished => "play_from_banished",
            ActionKind::Defend => "defend",
            ActionKind::DefendWithHand => "defend_with_hand",
            ActionKind::DefendWithEquipment => "defend_with_equipment",
            ActionKind::ActivateAbility => "activate_ability",
            ActionKind::ActivateHeroAbility => "activate_hero_ability",
            ActionKind::Draw => "draw",
            ActionKind::EndPhase => "end_phase",
        }
    }

    /// The more general kind this one refines.
    #[must_use]
    pub fn parent(self) -> Option<ActionKind> {
        match self {
            ActionKind::PlayAttack
            | ActionKind::PlayNonAttackAction
            | ActionKind::PlayInstant
            | ActionKind::PlayFromBanished => Some(ActionKind::PlayCard),
            ActionKind::DefendWithHand | ActionKind::DefendWithEquipment => Some(ActionKind::Defend),
            ActionKind::ActivateHeroAbility => Some(ActionKind::ActivateAbility),
            _ => None,
        }
    }

    /// `self` is `other` or descends from it.
    #[must_use]
    pub fn is_a(self, other: ActionKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Classify an engine action.
    ///
    /// Plays look at the card to tell attacks, non-attack actions and
    /// instants apart; a card that cannot be found classifies as `PlayCard`.
    /// An unknown player falls back to the generic kind.
    #[must_use]
    pub fn of(action: &Action, state: &GameState) -> ActionKind {
        let valid_player = action.player_id.is_valid();
        match action.action_type {
            ActionType::PitchCard => ActionKind::Pitch,
            ActionType::PlayCardFromBanished => ActionKind::PlayFromBanished,
            ActionType::PlayCardFromHand => action
                .card_instance_id
                .filter(|_| valid_player)
                .and_then(|id| state.player(action.player_id).zones.hand.get(id))
                .map_or(ActionKind::PlayCard, |card| {
                    let template = card.template();
                    if template.is_attack() {
                        ActionKind::PlayAttack
                    } else if template.is_action() {
                        ActionKind::PlayNonAttackAction
                    } else {
                        ActionKind::PlayInstant
                    }
                }),
            ActionType::DeclareDefenders if !valid_player => ActionKind::Defend,
            ActionType::DeclareDefenders => {
                let zones = &state.player(action.player_id).zones;
                let all_equipment = !action.defender_ids.is_empty()
                    && action
                        .defender_ids
                        .iter()
                        .all(|&id| zones.locate_equipment(id).is_some());
                let all_hand = !action.defender_ids.is_empty()
                    && action.defender_ids.iter().all(|&id| zones.hand.contains(id));
                if all_equipment {
                    ActionKind::DefendWithEquipment
                } else if all_hand {
                    ActionKind::DefendWithHand
                } else {
                    ActionKind::Defend
                }
            }
            ActionType::ActivateHeroAbility => ActionKind::ActivateHeroAbility,
            ActionType::EndPhase => ActionKind::EndPhase,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = PrecedenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PrecedenceError::UnknownAction(s.to_string()))
    }
}

/// Which actions an effect covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionMatcher {
    /// Exactly this kind.
    Exact(ActionKind),
    /// This kind or any descendant.
    Kind(ActionKind),
    /// Anything that is not this kind or a descendant.
    AllExcept(ActionKind),
}

impl ActionMatcher {
    #[must_use]
    pub fn matches(self, action: ActionKind) -> bool {
        match self {
            ActionMatcher::Exact(kind) => action == kind,
            ActionMatcher::Kind(kind) => action.is_a(kind),
            ActionMatcher::AllExcept(kind) => !action.is_a(kind),
        }
    }

    /// Parse an identifier per the module-level grammar.
    pub fn parse(identifier: &str) -> Result<Self, PrecedenceError> {
        let (prefix, rest) = match identifier.split_once('_') {
            Some((prefix @ ("cant" | "only" | "must" | "may"), rest)) => (Some(prefix), rest),
            _ => (None, identifier),
        };
        let kind = rest.parse::<ActionKind>()?;
        Ok(match prefix {
            Some("only") => ActionMatcher::AllExcept(kind),
            Some(_) => ActionMatcher::Kind(kind),
            None => ActionMatcher::Exact(kind),
        })
    }
}

/// A tagged restriction, requirement or allowance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrecedenceEffect {
    pub kind: EffectKind,
    pub matcher: ActionMatcher,
    /// Effect applies only when this holds. `None` always applies.
    pub predicate: Option<ContextPredicate>,
    /// Card that created the effect.
    pub source: Option<InstanceId>,
}

impl PrecedenceEffect {
    #[must_use]
    pub fn new(kind: EffectKind, matcher: ActionMatcher) -> Self {
        Self {
            kind,
            matcher,
            predicate: None,
            source: None,
        }
    }

    /// Build from a grammar identifier such as `cant_play_attack`.
    pub fn from_identifier(kind: EffectKind, identifier: &str) -> Result<Self, PrecedenceError> {
        Ok(Self::new(kind, ActionMatcher::parse(identifier)?))
    }

    #[must_use]
    pub fn restriction(matcher: ActionMatcher) -> Self {
        Self::new(EffectKind::Restriction, matcher)
    }

    #[must_use]
    pub fn requirement(matcher: ActionMatcher) -> Self {
        Self::new(EffectKind::Requirement, matcher)
    }

    #[must_use]
    pub fn allowance(matcher: ActionMatcher) -> Self {
        Self::new(EffectKind::Allowance, matcher)
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: ContextPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: InstanceId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn applies_to(&self, action: ActionKind) -> bool {
        self.matcher.matches(action)
    }

    /// Whether the predicate (if any) holds in `context`.
    #[must_use]
    pub fn is_active(&self, context: &PrecedenceContext) -> bool {
        self.predicate
            .as_ref()
            .map_or(true, |predicate| predicate.evaluate(context))
    }
}
