//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `ZoneKind`: The named zones (deck, hand, pitch, equipment slots, ...)
//! - `Zone`: Owner-tagged collection of card instances
//! - `ZonePosition`: Position specifier for the ordered deck
//! - `PlayerZones`: One player's complete zone set

pub mod player_zones;
pub mod zone;

pub use player_zones::PlayerZones;
pub use zone::{Zone, ZoneError, ZoneKind, ZonePosition};
