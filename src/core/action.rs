//! The action/result contract.
//!
//! `Action` is the only way to mutate a game; `ActionResult` is the uniform
//! reply. A failed result means the action was rejected, but state may
//! already have partially advanced (auto-pitched cards are not returned).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::InstanceId;
use super::player::PlayerId;

/// Kind of action a player can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    PitchCard,
    PlayCardFromHand,
    PlayCardFromBanished,
    DeclareDefenders,
    ActivateHeroAbility,
    EndPhase,
}

/// A complete player action.
///
/// ```
/// use rust_tcg::core::{Action, ActionType, InstanceId, PlayerId};
///
/// let play = Action::play_from_hand(PlayerId::new(0), InstanceId(12), PlayerId::new(1));
/// assert_eq!(play.action_type, ActionType::PlayCardFromHand);
/// assert_eq!(play.card_instance_id, Some(InstanceId(12)));
///
/// let block = Action::declare_defenders(PlayerId::new(1), &[InstanceId(30), InstanceId(31)]);
/// assert_eq!(block.defender_ids.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub action_type: ActionType,
    pub player_id: PlayerId,
    pub card_instance_id: Option<InstanceId>,
    pub target_ids: SmallVec<[PlayerId; 1]>,
    pub defender_ids: SmallVec<[InstanceId; 4]>,
}

impl Action {
    /// An action with no card, targets or defenders.
    #[must_use]
    pub fn new(action_type: ActionType, player_id: PlayerId) -> Self {
        Self {
            action_type,
            player_id,
            card_instance_id: None,
            target_ids: SmallVec::new(),
            defender_ids: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: InstanceId) -> Self {
        self.card_instance_id = Some(card);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: PlayerId) -> Self {
        self.target_ids.push(target);
        self
    }

    #[must_use]
    pub fn pitch(player: PlayerId, card: InstanceId) -> Self {
        Self::new(ActionType::PitchCard, player).with_card(card)
    }

    #[must_use]
    pub fn play_from_hand(player: PlayerId, card: InstanceId, target: PlayerId) -> Self {
        Self::new(ActionType::PlayCardFromHand, player)
            .with_card(card)
            .with_target(target)
    }

    #[must_use]
    pub fn play_from_banished(player: PlayerId, card: InstanceId, target: PlayerId) -> Self {
        Self::new(ActionType::PlayCardFromBanished, player)
            .with_card(card)
            .with_target(target)
    }

    #[must_use]
    pub fn declare_defenders(player: PlayerId, defenders: &[InstanceId]) -> Self {
        let mut action = Self::new(ActionType::DeclareDefenders, player);
        action.defender_ids = SmallVec::from_slice(defenders);
        action
    }

    #[must_use]
    pub fn no_defenders(player: PlayerId) -> Self {
        Self::new(ActionType::DeclareDefenders, player)
    }

    #[must_use]
    pub fn hero_ability(player: PlayerId) -> Self {
        Self::new(ActionType::ActivateHeroAbility, player)
    }

    #[must_use]
    pub fn end_phase(player: PlayerId) -> Self {
        Self::new(ActionType::EndPhase, player)
    }
}

/// Uniform outcome of `execute_action`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub damage_dealt: i32,
    pub arcane_damage_dealt: i32,
    pub cards_drawn: u32,
    pub message: String,
    pub action_points_gained: i32,
}

impl ActionResult {
    /// Successful result with a message and no side numbers.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Rejected action.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Self::default()
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Turn number when the action was taken.
    pub turn: u32,
    /// Sequence number across the whole game.
    pub sequence: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let p0 = PlayerId::new(0);

        let pitch = Action::pitch(p0, InstanceId(4));
        assert_eq!(pitch.action_type, ActionType::PitchCard);
        assert!(pitch.target_ids.is_empty());

        let none = Action::no_defenders(PlayerId::new(1));
        assert_eq!(none.action_type, ActionType::DeclareDefenders);
        assert!(none.defender_ids.is_empty());

        let end = Action::end_phase(p0);
        assert_eq!(end.card_instance_id, None);
    }

    #[test]
    fn test_action_equality() {
        let a1 = Action::play_from_hand(PlayerId::new(0), InstanceId(5), PlayerId::new(1));
        let a2 = Action::play_from_hand(PlayerId::new(0), InstanceId(5), PlayerId::new(1));
        let a3 = Action::play_from_hand(PlayerId::new(0), InstanceId(6), PlayerId::new(1));

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_result_constructors() {
        let ok = ActionResult::ok("done");
        assert!(ok.success);
        assert_eq!(ok.damage_dealt, 0);

        let failed = ActionResult::failure("nope");
        assert!(!failed.success);
        assert_eq!(failed.message, "nope");
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::declare_defenders(PlayerId::new(1), &[InstanceId(5), InstanceId(10)]);
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
