//! Card instances - one physical copy of a card.
//!
//! `CardInstance` pairs a shared template with the mutable per-copy state:
//! counters, temporary modifiers, tap and facing. Owner is fixed at
//! creation; controller is only set while the card is on the combat chain.
//!
//! ## Effective values
//!
//! `effective_power`/`effective_defense` are `max(0, base + counters + temp)`.
//! A template without the base property yields `None`, never `Some(0)`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardTemplate;
use super::keywords::Keyword;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// A physical card in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    id: InstanceId,
    template: Arc<CardTemplate>,
    owner: PlayerId,

    /// Set while on the combat chain, `None` otherwise.
    pub controller: Option<PlayerId>,

    pub power_counters: i32,
    pub defense_counters: i32,

    /// Until-end-of-turn modifiers.
    pub temp_power: i32,
    pub temp_defense: i32,
    pub temp_keywords: SmallVec<[Keyword; 2]>,

    pub tapped: bool,
    pub face_up: bool,

    /// Banished by an effect that lets its owner play it this turn.
    pub playable_from_banished: bool,
}

impl CardInstance {
    /// Create a fresh, face-down, untapped copy.
    #[must_use]
    pub fn new(id: InstanceId, template: Arc<CardTemplate>, owner: PlayerId) -> Self {
        Self {
            id,
            template,
            owner,
            controller: None,
            power_counters: 0,
            defense_counters: 0,
            temp_power: 0,
            temp_defense: 0,
            temp_keywords: SmallVec::new(),
            tapped: false,
            face_up: false,
            playable_from_banished: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[must_use]
    pub fn template(&self) -> &CardTemplate {
        &self.template
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Current power, or `None` if the card has no power.
    #[must_use]
    pub fn effective_power(&self) -> Option<i32> {
        self.template
            .power
            .map(|base| (base + self.power_counters + self.temp_power).max(0))
    }

    /// Current defense, or `None` if the card has no defense.
    #[must_use]
    pub fn effective_defense(&self) -> Option<i32> {
        self.template
            .defense
            .map(|base| (base + self.defense_counters + self.temp_defense).max(0))
    }

    /// Keyword printed on the card or granted this turn.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.template.has_keyword(keyword) || self.temp_keywords.contains(&keyword)
    }

    /// Keyword parameter. Granted keywords without a printed value read as 0.
    #[must_use]
    pub fn keyword_value(&self, keyword: Keyword) -> Option<u32> {
        self.template.keywords.get(keyword).or_else(|| {
            self.temp_keywords
                .contains(&keyword)
                .then_some(0)
        })
    }

    /// Grant a keyword until end of turn.
    pub fn grant_keyword(&mut self, keyword: Keyword) {
        if !self.temp_keywords.contains(&keyword) {
            self.temp_keywords.push(keyword);
        }
    }

    /// Clear until-end-of-turn modifiers and per-turn counters.
    pub fn clear_turn_modifiers(&mut self) {
        self.temp_power = 0;
        self.temp_defense = 0;
        self.temp_keywords.clear();
        self.power_counters = 0;
        self.defense_counters = 0;
    }

    /// Reset everything that does not survive a move to a new zone.
    pub fn reset_for_zone_change(&mut self) {
        self.clear_turn_modifiers();
        self.controller = None;
        self.tapped = false;
        self.playable_from_banished = false;
    }
}
