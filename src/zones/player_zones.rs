//! The full zone set owned by one player.

use serde::{Deserialize, Serialize};

use super::zone::{Zone, ZoneKind};
use crate::cards::{CardInstance, Subtype};
use crate::core::entity::InstanceId;
use crate::core::player::PlayerId;

/// Every zone belonging to one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    owner: PlayerId,
    pub deck: Zone,
    pub hand: Zone,
    pub pitch: Zone,
    pub arsenal: Zone,
    pub graveyard: Zone,
    pub banished: Zone,
    pub head: Zone,
    pub chest: Zone,
    pub arms: Zone,
    pub legs: Zone,
    pub weapons: Zone,
    pub hero: Zone,
}

impl PlayerZones {
    /// Create an empty zone set.
    #[must_use]
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            deck: Zone::new(ZoneKind::Deck, owner),
            hand: Zone::new(ZoneKind::Hand, owner),
            pitch: Zone::new(ZoneKind::Pitch, owner),
            arsenal: Zone::new(ZoneKind::Arsenal, owner),
            graveyard: Zone::new(ZoneKind::Graveyard, owner),
            banished: Zone::new(ZoneKind::Banished, owner),
            head: Zone::new(ZoneKind::Head, owner),
            chest: Zone::new(ZoneKind::Chest, owner),
            arms: Zone::new(ZoneKind::Arms, owner),
            legs: Zone::new(ZoneKind::Legs, owner),
            weapons: Zone::new(ZoneKind::Weapon, owner),
            hero: Zone::new(ZoneKind::Hero, owner),
        }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> &Zone {
        match kind {
            ZoneKind::Deck => &self.deck,
            ZoneKind::Hand => &self.hand,
            ZoneKind::Pitch => &self.pitch,
            ZoneKind::Arsenal => &self.arsenal,
            ZoneKind::Graveyard => &self.graveyard,
            ZoneKind::Banished => &self.banished,
            ZoneKind::Head => &self.head,
            ZoneKind::Chest => &self.chest,
            ZoneKind::Arms => &self.arms,
            ZoneKind::Legs => &self.legs,
            ZoneKind::Weapon => &self.weapons,
            ZoneKind::Hero => &self.hero,
        }
    }

    pub fn zone_mut(&mut self, kind: ZoneKind) -> &mut Zone {
        match kind {
            ZoneKind::Deck => &mut self.deck,
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::Pitch => &mut self.pitch,
            ZoneKind::Arsenal => &mut self.arsenal,
            ZoneKind::Graveyard => &mut self.graveyard,
            ZoneKind::Banished => &mut self.banished,
            ZoneKind::Head => &mut self.head,
            ZoneKind::Chest => &mut self.chest,
            ZoneKind::Arms => &mut self.arms,
            ZoneKind::Legs => &mut self.legs,
            ZoneKind::Weapon => &mut self.weapons,
            ZoneKind::Hero => &mut self.hero,
        }
    }

    /// Zone kind holding equipment of the given slot subtype.
    #[must_use]
    pub fn slot_for(subtype: Subtype) -> Option<ZoneKind> {
        match subtype {
            Subtype::Head => Some(ZoneKind::Head),
            Subtype::Chest => Some(ZoneKind::Chest),
            Subtype::Arms => Some(ZoneKind::Arms),
            Subtype::Legs => Some(ZoneKind::Legs),
            _ => None,
        }
    }

    /// Every zone, in `ZoneKind::ALL` order.
    pub fn all(&self) -> impl Iterator<Item = &Zone> {
        ZoneKind::ALL.into_iter().map(move |kind| self.zone(kind))
    }

    /// Equipment cards, head to legs.
    pub fn equipment(&self) -> impl Iterator<Item = &CardInstance> {
        ZoneKind::EQUIPMENT
            .into_iter()
            .flat_map(move |kind| self.zone(kind).iter())
    }

    /// Zone currently holding the card.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<ZoneKind> {
        ZoneKind::ALL
            .into_iter()
            .find(|&kind| self.zone(kind).contains(id))
    }

    /// Equipment slot holding the card.
    #[must_use]
    pub fn locate_equipment(&self, id: InstanceId) -> Option<ZoneKind> {
        ZoneKind::EQUIPMENT
            .into_iter()
            .find(|&kind| self.zone(kind).contains(id))
    }

    #[must_use]
    pub fn equipment_card(&self, id: InstanceId) -> Option<&CardInstance> {
        self.locate_equipment(id).and_then(|kind| self.zone(kind).get(id))
    }

    pub fn equipment_card_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        let kind = self.locate_equipment(id)?;
        self.zone_mut(kind).get_mut(id)
    }

    /// Total cards across all zones.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.all().map(Zone::len).sum()
    }
}
