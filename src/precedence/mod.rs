//! Restriction/requirement/allowance resolution, independent of the turn
//! engine.
//!
//! ## Key Types
//!
//! - `PrecedenceEffect`: a tagged effect with a matcher, predicate and source
//! - `ActionKind`: the closed set of actions effects can name
//! - `ContextPredicate`: structured condition on a `PrecedenceContext`
//! - `PrecedenceResolver`: holds effects and answers `check_action`

pub mod effect;
pub mod predicate;
pub mod resolver;

pub use effect::{ActionKind, ActionMatcher, EffectKind, PrecedenceEffect, PrecedenceError};
pub use predicate::{ContextPredicate, PrecedenceContext};
pub use resolver::{PrecedenceOutcome, PrecedenceResolver};
