//! Rules: the engine trait, the two-player game engine, and turn structure.
//!
//! ## Key Types
//!
//! - `RulesEngine`: the driver-facing seam (legal actions, execute, result)
//! - `GameEngine`: the implementation owning a `GameState`
//! - `GameResult`: winner or draw

pub mod engine;
pub mod game;
pub mod handlers;
pub mod legal;
pub mod turn;

pub use engine::{GameResult, RulesEngine};
pub use game::GameEngine;
