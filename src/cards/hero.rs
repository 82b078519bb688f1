//! Hero runtime state and hero abilities.
//!
//! `HeroState` tracks the per-player currencies and life total. Hero
//! abilities are data: a `HeroAbility` variant looked up by the hero's
//! template id in a `HeroAbilityTable`.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, TemplateId};
use crate::core::config::LifePolicy;

/// Per-player hero runtime state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroState {
    template: Arc<CardTemplate>,
    pub life: i32,
    pub action_points: i32,
    pub resource_points: i32,
    pub ability_used_this_turn: bool,
}

impl HeroState {
    /// Start a hero at its printed life total.
    #[must_use]
    pub fn new(template: Arc<CardTemplate>) -> Self {
        let life = template.life.unwrap_or(0);
        Self {
            template,
            life,
            action_points: 0,
            resource_points: 0,
            ability_used_this_turn: false,
        }
    }

    #[must_use]
    pub fn template(&self) -> &CardTemplate {
        &self.template
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Hand size refilled to at end of turn.
    #[must_use]
    pub fn intellect(&self) -> usize {
        self.template.intellect.unwrap_or(0).max(0) as usize
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }

    /// Lose `amount` life under the given policy. Returns the new total.
    pub fn lose_life(&mut self, amount: i32, policy: LifePolicy) -> i32 {
        let next = self.life - amount.max(0);
        self.life = match policy {
            LifePolicy::ClampAtZero => next.max(0),
            LifePolicy::AllowNegative => next,
        };
        self.life
    }

    /// Spend resources if enough are available.
    pub fn spend_resources(&mut self, amount: i32) -> bool {
        if amount > self.resource_points {
            return false;
        }
        self.resource_points -= amount;
        true
    }

    /// Spend one action point if available.
    pub fn spend_action_point(&mut self) -> bool {
        if self.action_points < 1 {
            return false;
        }
        self.action_points -= 1;
        true
    }

    /// Zero both per-turn currencies.
    pub fn reset_points(&mut self) {
        self.action_points = 0;
        self.resource_points = 0;
    }
}

/// Once-per-turn hero ability, stored as data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroAbility {
    /// Pay `cost`, look at the top card of the deck; if it is a non-attack
    /// action, banish it face up. It may be played from banished this turn.
    BanishTopNonAttackAction { cost: i32 },
}

impl HeroAbility {
    /// Fixed resource cost of the ability.
    #[must_use]
    pub const fn cost(self) -> i32 {
        match self {
            HeroAbility::BanishTopNonAttackAction { cost } => cost,
        }
    }
}

/// Hero template id to hero ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroAbilityTable(FxHashMap<TemplateId, HeroAbility>);

impl HeroAbilityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the ability for a hero.
    pub fn register(&mut self, hero: TemplateId, ability: HeroAbility) {
        self.0.insert(hero, ability);
    }

    #[must_use]
    pub fn with(mut self, hero: TemplateId, ability: HeroAbility) -> Self {
        self.register(hero, ability);
        self
    }

    #[must_use]
    pub fn get(&self, hero: TemplateId) -> Option<HeroAbility> {
        self.0.get(&hero).copied()
    }
}
