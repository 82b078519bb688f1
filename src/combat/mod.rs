//! Combat: the chain of attacks, defender declaration, damage, and
//! arcane damage.
//!
//! ## Key Types
//!
//! - `CombatChain`: open links and the current `CombatStep`
//! - `ChainLink`: one attack, its target and defenders
//! - `CombatEngine`: drives a link through its steps

pub mod arcane;
pub mod chain;
pub mod engine;

pub use arcane::deal_arcane_damage;
pub use chain::{ChainLink, CombatChain, CombatStep, Defender};
pub use engine::{CombatEngine, CombatOutcome};
