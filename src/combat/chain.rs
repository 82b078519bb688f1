//! The combat chain: attacks in flight and their defenders.
//!
//! A chain opens when an attack is played and holds one `ChainLink` per
//! attack until it closes. While a link is held, the attacking card and any
//! hand defenders live on the link, not in a zone. Equipment defenders stay
//! in their slots and are referenced by id.
//!
//! ## Steps
//!
//! `None → Layer → Attack → Defend → Reaction → Damage → Resolution → Close`
//!
//! After Resolution the chain either closes or stays open at Resolution,
//! waiting for the turn player's next attack.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// Combat sub-state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatStep {
    /// No chain is open.
    #[default]
    None,
    Layer,
    Attack,
    Defend,
    Reaction,
    Damage,
    Resolution,
    Close,
}

/// A card defending a chain link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Defender {
    /// Card moved out of the defender's hand onto the link.
    Hand(CardInstance),
    /// Equipment that remains in its slot.
    Equipment { id: InstanceId, owner: PlayerId },
}

impl Defender {
    #[must_use]
    pub fn id(&self) -> InstanceId {
        match self {
            Defender::Hand(card) => card.id(),
            Defender::Equipment { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn is_equipment(&self) -> bool {
        matches!(self, Defender::Equipment { .. })
    }
}

/// One attack and everything that happened to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub attacker: PlayerId,
    pub attack: CardInstance,
    pub target: PlayerId,
    pub defenders: Vec<Defender>,
    pub damage_dealt: i32,
    pub did_hit: bool,
}

impl ChainLink {
    #[must_use]
    pub fn new(attacker: PlayerId, attack: CardInstance, target: PlayerId) -> Self {
        Self {
            attacker,
            attack,
            target,
            defenders: Vec::new(),
            damage_dealt: 0,
            did_hit: false,
        }
    }

    /// Defenders that came from hand.
    #[must_use]
    pub fn hand_defender_count(&self) -> usize {
        self.defenders
            .iter()
            .filter(|d| matches!(d, Defender::Hand(_)))
            .count()
    }

    /// Hand defenders that are action cards.
    #[must_use]
    pub fn action_defender_count(&self) -> usize {
        self.defenders
            .iter()
            .filter(|d| matches!(d, Defender::Hand(card) if card.template().is_action()))
            .count()
    }

    #[must_use]
    pub fn has_equipment_defender(&self) -> bool {
        self.defenders.iter().any(Defender::is_equipment)
    }

    #[must_use]
    pub fn is_defended_by(&self, id: InstanceId) -> bool {
        self.defenders.iter().any(|d| d.id() == id)
    }
}

/// The open (or closed) combat chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatChain {
    links: Vec<ChainLink>,
    open: bool,
    step: CombatStep,
}

impl CombatChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn step(&self) -> CombatStep {
        self.step
    }

    pub fn set_step(&mut self, step: CombatStep) {
        self.step = step;
    }

    /// An attack on the chain has not finished resolving.
    ///
    /// A chain left open at Resolution is waiting for the next attack and
    /// does not count.
    #[must_use]
    pub fn is_link_resolving(&self) -> bool {
        self.open && !matches!(self.step, CombatStep::None | CombatStep::Resolution)
    }

    #[must_use]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Link currently being resolved (the newest one).
    #[must_use]
    pub fn current_link(&self) -> Option<&ChainLink> {
        self.links.last()
    }

    pub fn current_link_mut(&mut self) -> Option<&mut ChainLink> {
        self.links.last_mut()
    }

    /// Add a link, opening the chain at the Layer step.
    pub fn push_link(&mut self, link: ChainLink) {
        self.links.push(link);
        self.open = true;
        self.step = CombatStep::Layer;
    }

    /// Close the chain and hand back its links.
    pub fn close(&mut self) -> Vec<ChainLink> {
        self.open = false;
        self.step = CombatStep::None;
        std::mem::take(&mut self.links)
    }

    /// Cards owned by `player` that currently sit on the chain.
    #[must_use]
    pub fn cards_held_by(&self, player: PlayerId) -> usize {
        self.held_cards().filter(|c| c.owner() == player).count()
    }

    /// Ids of every card the chain holds (attacks and hand defenders).
    pub fn held_ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.held_cards().map(CardInstance::id)
    }

    fn held_cards(&self) -> impl Iterator<Item = &CardInstance> + '_ {
        self.links.iter().flat_map(|link| {
            std::iter::once(&link.attack).chain(link.defenders.iter().filter_map(|d| match d {
                Defender::Hand(card) => Some(card),
                Defender::Equipment { .. } => None,
            }))
        })
    }
}
