//! Card system: templates, instances, keywords, heroes, and registry.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Immutable data shared by every copy of a card
//! - `CardInstance`: One physical copy with counters and modifiers
//! - `Keyword` / `KeywordMap`: Closed keyword set with parameters
//! - `HeroState`: Life total and per-turn currencies
//! - `HeroAbility` / `HeroAbilityTable`: Hero abilities as data
//! - `CardRegistry`: Template lookup by id and name

pub mod definition;
pub mod hero;
pub mod instance;
pub mod keywords;
pub mod registry;

pub use definition::{CardTemplate, CardType, Color, Subtype, Supertype, TemplateId};
pub use hero::{HeroAbility, HeroAbilityTable, HeroState};
pub use instance::CardInstance;
pub use keywords::{Keyword, KeywordMap};
pub use registry::{CardRegistry, RegistryError};
