//! Card templates - immutable card data.
//!
//! `CardTemplate` holds what every copy of a named card shares: types,
//! colour, numeric properties and keywords. Numeric properties are
//! `Option<i32>` so that "no defense" is distinct from "defense 0".
//!
//! Per-copy data (counters, modifiers, tap state) lives in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::keywords::{Keyword, KeywordMap};

/// Unique identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl TemplateId {
    /// Create a new template ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Action,
    AttackReaction,
    DefenseReaction,
    Instant,
    Equipment,
    Weapon,
    Hero,
    Resource,
    Token,
}

/// Class and talent supertypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Supertype {
    Generic,
    Brute,
    Guardian,
    Ninja,
    Warrior,
    Wizard,
    Mechanologist,
    Ranger,
    Runeblade,
    Illusionist,
    Light,
    Shadow,
    Elemental,
    Ice,
    Lightning,
    Earth,
    Draconic,
}

/// Functional subtypes; these change how the rules treat the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Attack,
    Aura,
    Item,
    Arrow,
    Head,
    Chest,
    Arms,
    Legs,
    OffHand,
    OneHanded,
    TwoHanded,
}

/// Pitch colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Blue,
    #[default]
    Colorless,
}

/// Immutable card data shared by every copy.
///
/// ```
/// use rust_tcg::cards::{CardTemplate, CardType, Keyword, Subtype, TemplateId};
///
/// let strike = CardTemplate::new(TemplateId::new(1), "Strike")
///     .with_type(CardType::Action)
///     .with_subtype(Subtype::Attack)
///     .with_cost(1)
///     .with_power(4)
///     .with_defense(2)
///     .with_pitch(1)
///     .with_keyword(Keyword::GoAgain, 0);
///
/// assert!(strike.is_attack());
/// assert_eq!(strike.power, Some(4));
/// assert_eq!(strike.arcane, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Unique identifier.
    pub id: TemplateId,
    /// Card name.
    pub name: String,
    pub types: SmallVec<[CardType; 2]>,
    pub supertypes: Vec<Supertype>,
    pub subtypes: Vec<Subtype>,
    /// Flavour subtypes with no rules meaning (Sword, Axe, ...).
    pub nonfunctional_subtypes: Vec<String>,
    pub color: Color,
    pub pitch: Option<i32>,
    pub cost: Option<i32>,
    pub power: Option<i32>,
    pub defense: Option<i32>,
    /// Arcane damage dealt when played or on hit.
    pub arcane: Option<i32>,
    /// Heroes only.
    pub life: Option<i32>,
    /// Heroes only: hand size refilled to at end of turn.
    pub intellect: Option<i32>,
    pub keywords: KeywordMap,
    /// Free rules text, not interpreted.
    pub text: String,
}

impl CardTemplate {
    /// Create a template with no types or properties.
    #[must_use]
    pub fn new(id: TemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: SmallVec::new(),
            supertypes: Vec::new(),
            subtypes: Vec::new(),
            nonfunctional_subtypes: Vec::new(),
            color: Color::Colorless,
            pitch: None,
            cost: None,
            power: None,
            defense: None,
            arcane: None,
            life: None,
            intellect: None,
            keywords: KeywordMap::new(),
            text: String::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.types.push(card_type);
        self
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: Supertype) -> Self {
        self.supertypes.push(supertype);
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtypes.push(subtype);
        self
    }

    #[must_use]
    pub fn with_nonfunctional_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.nonfunctional_subtypes.push(subtype.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_pitch(mut self, pitch: i32) -> Self {
        self.pitch = Some(pitch);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: i32) -> Self {
        self.power = Some(power);
        self
    }

    #[must_use]
    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = Some(defense);
        self
    }

    #[must_use]
    pub fn with_arcane(mut self, arcane: i32) -> Self {
        self.arcane = Some(arcane);
        self
    }

    #[must_use]
    pub fn with_life(mut self, life: i32) -> Self {
        self.life = Some(life);
        self
    }

    #[must_use]
    pub fn with_intellect(mut self, intellect: i32) -> Self {
        self.intellect = Some(intellect);
        self
    }

    /// Add a keyword; `param` is ignored by plain keywords, pass 0.
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword, param: u32) -> Self {
        self.keywords.insert(keyword, param);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    // === Classification ===

    #[must_use]
    pub fn has_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    #[must_use]
    pub fn has_subtype(&self, subtype: Subtype) -> bool {
        self.subtypes.contains(&subtype)
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        self.has_type(CardType::Action)
    }

    /// Attack action card.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.is_action() && self.has_subtype(Subtype::Attack)
    }

    /// Action card without the Attack subtype.
    #[must_use]
    pub fn is_non_attack_action(&self) -> bool {
        self.is_action() && !self.has_subtype(Subtype::Attack)
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.has_type(CardType::Instant)
    }

    #[must_use]
    pub fn is_equipment(&self) -> bool {
        self.has_type(CardType::Equipment)
    }

    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.has_type(CardType::Weapon)
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        self.has_type(CardType::Hero)
    }

    /// Cards that can be played from hand during the action phase.
    #[must_use]
    pub fn is_playable_in_action_phase(&self) -> bool {
        self.is_action() || self.is_instant()
    }

    /// Pitch value, treating "no pitch" as 0.
    #[must_use]
    pub fn pitch_value(&self) -> i32 {
        self.pitch.unwrap_or(0).max(0)
    }

    /// Resource cost, treating "no cost" as 0.
    #[must_use]
    pub fn cost_value(&self) -> i32 {
        self.cost.unwrap_or(0).max(0)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(keyword)
    }

    /// Equipment slot this card occupies, if it is equipment.
    #[must_use]
    pub fn equipment_slot(&self) -> Option<Subtype> {
        if !self.is_equipment() {
            return None;
        }
        [Subtype::Head, Subtype::Chest, Subtype::Arms, Subtype::Legs]
            .into_iter()
            .find(|slot| self.has_subtype(*slot))
    }
}
