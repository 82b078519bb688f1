//! Restriction/requirement/allowance precedence.
//!
//! `check_action` decides whether an action is permitted:
//! 1. Keep effects whose predicate holds in the context.
//! 2. Keep those that apply to the action.
//! 3. Any restriction forbids it, whatever else applies.
//! 4. Otherwise any requirement or allowance permits it.
//! 5. Otherwise it is forbidden: nothing is permitted by default.
//!
//! Requirements are reported, not enforced; forcing a play is up to the
//! caller.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::effect::{ActionKind, EffectKind, PrecedenceEffect, PrecedenceError};
use super::predicate::PrecedenceContext;
use crate::core::entity::InstanceId;

/// Verdict and the effects that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecedenceOutcome<'a> {
    pub permitted: bool,
    pub restrictions: Vec<&'a PrecedenceEffect>,
    pub requirements: Vec<&'a PrecedenceEffect>,
    pub allowances: Vec<&'a PrecedenceEffect>,
}

/// A collection of precedence effects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecedenceResolver {
    effects: Vec<PrecedenceEffect>,
}

impl PrecedenceResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, effect: PrecedenceEffect) {
        self.effects.push(effect);
    }

    /// Parse and add an effect from a grammar identifier.
    pub fn add_identifier(&mut self, kind: EffectKind, identifier: &str) -> Result<(), PrecedenceError> {
        self.add(PrecedenceEffect::from_identifier(kind, identifier)?);
        Ok(())
    }

    /// Drop every effect created by `source`. Returns how many were removed.
    pub fn remove_by_source(&mut self, source: InstanceId) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.source != Some(source));
        before - self.effects.len()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    #[must_use]
    pub fn effects(&self) -> &[PrecedenceEffect] {
        &self.effects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Decide whether `action` is permitted in `context`.
    #[must_use]
    pub fn check_action(&self, action: ActionKind, context: &PrecedenceContext) -> PrecedenceOutcome<'_> {
        let mut outcome = PrecedenceOutcome {
            permitted: false,
            restrictions: Vec::new(),
            requirements: Vec::new(),
            allowances: Vec::new(),
        };

        for effect in self
            .effects
            .iter()
            .filter(|e| e.is_active(context) && e.applies_to(action))
        {
            match effect.kind {
                EffectKind::Restriction => outcome.restrictions.push(effect),
                EffectKind::Requirement => outcome.requirements.push(effect),
                EffectKind::Allowance => outcome.allowances.push(effect),
            }
        }

        outcome.permitted = outcome.restrictions.is_empty()
            && !(outcome.requirements.is_empty() && outcome.allowances.is_empty());
        trace!(
            %action,
            permitted = outcome.permitted,
            restrictions = outcome.restrictions.len(),
            "precedence check"
        );
        outcome
    }

    /// `check_action` keyed by an action-kind name.
    pub fn check_identifier(
        &self,
        identifier: &str,
        context: &PrecedenceContext,
    ) -> Result<PrecedenceOutcome<'_>, PrecedenceError> {
        let action = identifier.parse::<ActionKind>()?;
        Ok(self.check_action(action, context))
    }

    #[must_use]
    pub fn is_permitted(&self, action: ActionKind, context: &PrecedenceContext) -> bool {
        self.check_action(action, context).permitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precedence::{ActionMatcher, ContextPredicate};

    #[test]
    fn test_default_forbidden() {
        let resolver = PrecedenceResolver::new();
        let outcome = resolver.check_action(ActionKind::Pitch, &PrecedenceContext::new());

        assert!(!outcome.permitted);
        assert!(outcome.restrictions.is_empty());
    }

    #[test]
    fn test_restriction_beats_allowance() {
        let mut resolver = PrecedenceResolver::new();
        resolver.add(PrecedenceEffect::allowance(ActionMatcher::Kind(ActionKind::PlayCard)));
        resolver.add(PrecedenceEffect::restriction(ActionMatcher::Kind(ActionKind::PlayAttack)));
        let ctx = PrecedenceContext::new();

        let attack = resolver.check_action(ActionKind::PlayAttack, &ctx);
        assert!(!attack.permitted);
        assert_eq!(attack.allowances.len(), 1);
        assert_eq!(attack.restrictions.len(), 1);

        assert!(resolver.is_permitted(ActionKind::PlayInstant, &ctx));
    }

    #[test]
    fn test_inactive_predicate_is_ignored() {
        let mut resolver = PrecedenceResolver::new();
        resolver.add(PrecedenceEffect::allowance(ActionMatcher::Kind(ActionKind::EndPhase)));
        resolver.add(
            PrecedenceEffect::restriction(ActionMatcher::Kind(ActionKind::EndPhase))
                .with_predicate(ContextPredicate::InCombat),
        );

        assert!(resolver.is_permitted(ActionKind::EndPhase, &PrecedenceContext::new()));
        assert!(!resolver.is_permitted(
            ActionKind::EndPhase,
            &PrecedenceContext::new().with_combat(true)
        ));
    }

    #[test]
    fn test_remove_by_source() {
        let mut resolver = PrecedenceResolver::new();
        resolver.add(
            PrecedenceEffect::restriction(ActionMatcher::Kind(ActionKind::Pitch)).with_source(InstanceId(3)),
        );
        resolver.add(PrecedenceEffect::allowance(ActionMatcher::Kind(ActionKind::Pitch)));

        assert_eq!(resolver.remove_by_source(InstanceId(3)), 1);
        assert_eq!(resolver.remove_by_source(InstanceId(3)), 0);
        assert_eq!(resolver.len(), 1);
        assert!(resolver.is_permitted(ActionKind::Pitch, &PrecedenceContext::new()));
    }

    #[test]
    fn test_unknown_identifier() {
        let resolver = PrecedenceResolver::new();
        let err = resolver
            .check_identifier("attack", &PrecedenceContext::new())
            .unwrap_err();

        assert_eq!(err, PrecedenceError::UnknownAction("attack".to_string()));
    }
}
