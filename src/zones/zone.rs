//! A single owner-tagged card zone.
//!
//! Zones own the `CardInstance` values they contain, so moving a card means
//! removing it from one zone and adding it to another. Order is kept for
//! every zone but only the deck gives it meaning: index 0 is the bottom,
//! the last index is the top.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardInstance;
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// The named zones each player owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Pitch,
    Arsenal,
    Graveyard,
    Banished,
    Head,
    Chest,
    Arms,
    Legs,
    Weapon,
    Hero,
}

impl ZoneKind {
    /// Every zone kind, in a fixed order.
    pub const ALL: [ZoneKind; 12] = [
        ZoneKind::Deck,
        ZoneKind::Hand,
        ZoneKind::Pitch,
        ZoneKind::Arsenal,
        ZoneKind::Graveyard,
        ZoneKind::Banished,
        ZoneKind::Head,
        ZoneKind::Chest,
        ZoneKind::Arms,
        ZoneKind::Legs,
        ZoneKind::Weapon,
        ZoneKind::Hero,
    ];

    /// Equipment slots, in the order arcane damage walks them.
    pub const EQUIPMENT: [ZoneKind; 4] =
        [ZoneKind::Head, ZoneKind::Chest, ZoneKind::Arms, ZoneKind::Legs];

    /// Maximum cards the zone can hold, `None` for unlimited.
    #[must_use]
    pub const fn capacity(self) -> Option<usize> {
        match self {
            ZoneKind::Arsenal
            | ZoneKind::Head
            | ZoneKind::Chest
            | ZoneKind::Arms
            | ZoneKind::Legs
            | ZoneKind::Hero => Some(1),
            ZoneKind::Weapon => Some(2),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_equipment_slot(self) -> bool {
        matches!(
            self,
            ZoneKind::Head | ZoneKind::Chest | ZoneKind::Arms | ZoneKind::Legs
        )
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Position for inserting a card into an ordered zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (e.g., top of deck).
    Top,
    /// Add to bottom of zone.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

/// Zone insertion failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("{zone} is full (capacity {capacity})")]
    Full { zone: ZoneKind, capacity: usize },

    #[error("{0} is already in this zone")]
    Duplicate(InstanceId),
}

/// An owner-tagged collection of cards.
///
/// ```
/// use std::sync::Arc;
/// use rust_tcg::cards::{CardInstance, CardTemplate, TemplateId};
/// use rust_tcg::core::{InstanceId, PlayerId};
/// use rust_tcg::zones::{Zone, ZoneKind, ZonePosition};
///
/// let template = Arc::new(CardTemplate::new(TemplateId::new(1), "Card"));
/// let owner = PlayerId::new(0);
/// let mut deck = Zone::new(ZoneKind::Deck, owner);
///
/// deck.add(CardInstance::new(InstanceId(1), template.clone(), owner), None).unwrap();
/// deck.add(CardInstance::new(InstanceId(2), template, owner), Some(ZonePosition::Bottom)).unwrap();
///
/// assert_eq!(deck.peek_top().map(|c| c.id()), Some(InstanceId(1)));
/// assert_eq!(deck.draw_top().map(|c| c.id()), Some(InstanceId(1)));
/// assert_eq!(deck.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    kind: ZoneKind,
    owner: PlayerId,
    cards: Vec<CardInstance>,
}

impl Zone {
    /// Create an empty zone.
    #[must_use]
    pub fn new(kind: ZoneKind, owner: PlayerId) -> Self {
        Self {
            kind,
            owner,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Add a card. `position` defaults to the top.
    ///
    /// Fails if the zone is at capacity or already holds this instance. The
    /// card is dropped on failure.
    pub fn add(&mut self, card: CardInstance, position: Option<ZonePosition>) -> Result<(), ZoneError> {
        if self.contains(card.id()) {
            return Err(ZoneError::Duplicate(card.id()));
        }
        if let Some(capacity) = self.kind.capacity() {
            if self.cards.len() >= capacity {
                return Err(ZoneError::Full {
                    zone: self.kind,
                    capacity,
                });
            }
        }

        match position.unwrap_or(ZonePosition::Top) {
            ZonePosition::Top => self.cards.push(card),
            ZonePosition::Bottom => self.cards.insert(0, card),
            ZonePosition::Index(i) => {
                let idx = i.min(self.cards.len());
                self.cards.insert(idx, card);
            }
        }
        Ok(())
    }

    /// Remove a card by id. Absent cards are a no-op returning `None`.
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let pos = self.cards.iter().position(|c| c.id() == id)?;
        Some(self.cards.remove(pos))
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top (insertion order for unordered zones).
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CardInstance> {
        self.cards.iter_mut()
    }

    /// Ids of every card, in zone order.
    #[must_use]
    pub fn ids(&self) -> Vec<InstanceId> {
        self.cards.iter().map(CardInstance::id).collect()
    }

    // === Deck operations ===

    /// Remove and return the top card.
    pub fn draw_top(&mut self) -> Option<CardInstance> {
        self.cards.pop()
    }

    /// Look at the top card without removing it.
    #[must_use]
    pub fn peek_top(&self) -> Option<&CardInstance> {
        self.cards.last()
    }

    /// Shuffle the zone in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove every card, bottom to top.
    pub fn take_all(&mut self) -> Vec<CardInstance> {
        std::mem::take(&mut self.cards)
    }
}
