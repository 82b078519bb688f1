//! Engine configuration and player loadouts.
//!
//! Games are configured at startup by providing:
//! - `EngineConfig`: seed, life policy, hero-ability table, turn-one refill
//! - `PlayerSetup`: one player's hero, equipment, weapons and deck
//!
//! ```
//! use rust_tcg::cards::{HeroAbility, TemplateId};
//! use rust_tcg::core::{EngineConfig, LifePolicy};
//!
//! let config = EngineConfig::new()
//!     .with_seed(7)
//!     .with_life_policy(LifePolicy::AllowNegative)
//!     .with_hero_ability(TemplateId::new(1), HeroAbility::BanishTopNonAttackAction { cost: 3 });
//!
//! assert_eq!(config.seed, Some(7));
//! assert!(config.refill_second_player_on_first_turn);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{CardTemplate, HeroAbility, HeroAbilityTable, TemplateId};

/// How life totals react to damage below zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifePolicy {
    /// Life never drops below zero.
    #[default]
    ClampAtZero,
    /// Life may go negative; game over still triggers at <= 0.
    AllowNegative,
}

/// Engine-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Shuffle seed. `None` seeds from ambient randomness.
    pub seed: Option<u64>,

    pub life_policy: LifePolicy,

    /// On turn one the non-turn player also refills to intellect at end of
    /// turn, evening out the opening draw.
    pub refill_second_player_on_first_turn: bool,

    pub hero_abilities: HeroAbilityTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            life_policy: LifePolicy::default(),
            refill_second_player_on_first_turn: true,
            hero_abilities: HeroAbilityTable::new(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_life_policy(mut self, policy: LifePolicy) -> Self {
        self.life_policy = policy;
        self
    }

    #[must_use]
    pub fn without_first_turn_refill(mut self) -> Self {
        self.refill_second_player_on_first_turn = false;
        self
    }

    #[must_use]
    pub fn with_hero_ability(mut self, hero: TemplateId, ability: HeroAbility) -> Self {
        self.hero_abilities.register(hero, ability);
        self
    }
}

/// One player's starting loadout.
///
/// Equipment goes to the slot named by its Head/Chest/Arms/Legs subtype.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSetup {
    pub hero: Arc<CardTemplate>,
    pub equipment: Vec<Arc<CardTemplate>>,
    pub weapons: Vec<Arc<CardTemplate>>,
    pub deck: Vec<Arc<CardTemplate>>,
}

impl PlayerSetup {
    #[must_use]
    pub fn new(hero: Arc<CardTemplate>) -> Self {
        Self {
            hero,
            equipment: Vec::new(),
            weapons: Vec::new(),
            deck: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_equipment(mut self, card: Arc<CardTemplate>) -> Self {
        self.equipment.push(card);
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, card: Arc<CardTemplate>) -> Self {
        self.weapons.push(card);
        self
    }

    /// Add `copies` of a card to the deck.
    #[must_use]
    pub fn with_cards(mut self, card: &Arc<CardTemplate>, copies: usize) -> Self {
        self.deck
            .extend(std::iter::repeat_with(|| Arc::clone(card)).take(copies));
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Vec<Arc<CardTemplate>>) -> Self {
        self.deck = deck;
        self
    }

    /// Cards this player starts with, hero included.
    #[must_use]
    pub fn card_count(&self) -> usize {
        1 + self.equipment.len() + self.weapons.len() + self.deck.len()
    }
}
