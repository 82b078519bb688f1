//! Rules engine trait.
//!
//! The seam between the game and whatever drives it (a heuristic bot, an
//! RL loop, a test). Drivers only see:
//! - What actions are legal for a player
//! - Executing one action and reading its result
//! - Whether and how the game ended

use serde::{Deserialize, Serialize};

use crate::core::action::{Action, ActionResult};
use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Both heroes fell at once.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty unless `player` holds active status
/// - `execute_action`: never panics; rejected actions return a failed result
/// - `result`: `None` while the game continues
pub trait RulesEngine {
    /// Every action `player` may take right now.
    fn legal_actions(&self, player: PlayerId) -> Vec<Action>;

    /// Apply one action.
    fn execute_action(&mut self, action: &Action) -> ActionResult;

    /// How the game ended, if it has.
    fn result(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    fn is_terminal(&self) -> bool {
        self.result().is_some()
    }

    /// Execute the first legal action for `player`, if any.
    ///
    /// Useful as a trivial policy for smoke tests and simulations.
    fn step_first_legal(&mut self, player: PlayerId) -> Option<ActionResult> {
        let action = self.legal_actions(player).into_iter().next()?;
        Some(self.execute_action(&action))
    }
}
