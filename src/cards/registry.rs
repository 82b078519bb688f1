//! Card registry for template lookup.
//!
//! The `CardRegistry` stores the immutable templates for a game and hands
//! out shared `Arc` handles. Loading templates from an external card
//! database is the caller's job; the registry only accepts them.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{CardTemplate, TemplateId};

/// Registry failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("template {0} already registered")]
    DuplicateId(TemplateId),

    #[error("template named '{0}' already registered")]
    DuplicateName(String),

    #[error("no template named '{0}'")]
    UnknownName(String),
}

/// Registry of card templates.
///
/// ```
/// use rust_tcg::cards::{CardRegistry, CardTemplate, TemplateId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardTemplate::new(TemplateId::new(1), "Strike").with_power(4)).unwrap();
///
/// let found = registry.get_by_name("Strike").unwrap();
/// assert_eq!(found.power, Some(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<TemplateId, Arc<CardTemplate>>,
    names: FxHashMap<String, TemplateId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Ids and names must both be unique.
    pub fn register(&mut self, card: CardTemplate) -> Result<Arc<CardTemplate>, RegistryError> {
        if self.cards.contains_key(&card.id) {
            return Err(RegistryError::DuplicateId(card.id));
        }
        if self.names.contains_key(&card.name) {
            return Err(RegistryError::DuplicateName(card.name));
        }

        let card = Arc::new(card);
        self.names.insert(card.name.clone(), card.id);
        self.cards.insert(card.id, Arc::clone(&card));
        Ok(card)
    }

    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&Arc<CardTemplate>> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<CardTemplate>> {
        self.names.get(name).and_then(|id| self.cards.get(id))
    }

    /// Resolve a list of names into template handles, in order.
    pub fn templates_from_names(&self, names: &[&str]) -> Result<Vec<Arc<CardTemplate>>, RegistryError> {
        names
            .iter()
            .map(|name| {
                self.get_by_name(name)
                    .cloned()
                    .ok_or_else(|| RegistryError::UnknownName((*name).to_string()))
            })
            .collect()
    }

    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all templates.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardTemplate::new(TemplateId::new(1), "Test Card"))
            .unwrap();

        assert_eq!(registry.get(TemplateId::new(1)).unwrap().name, "Test Card");
        assert!(registry.get(TemplateId::new(99)).is_none());
        assert!(registry.contains(TemplateId::new(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = CardRegistry::new();
        registry.register(CardTemplate::new(TemplateId::new(1), "A")).unwrap();

        let err = registry
            .register(CardTemplate::new(TemplateId::new(1), "B"))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(TemplateId::new(1)));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = CardRegistry::new();
        registry.register(CardTemplate::new(TemplateId::new(1), "A")).unwrap();

        let err = registry
            .register(CardTemplate::new(TemplateId::new(2), "A"))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("A".to_string()));
    }

    #[test]
    fn test_templates_from_names() {
        let mut registry = CardRegistry::new();
        registry.register(CardTemplate::new(TemplateId::new(1), "A")).unwrap();
        registry.register(CardTemplate::new(TemplateId::new(2), "B")).unwrap();

        let deck = registry.templates_from_names(&["B", "A", "B"]).unwrap();
        let ids: Vec<_> = deck.iter().map(|t| t.id.raw()).collect();
        assert_eq!(ids, vec![2, 1, 2]);
        assert!(Arc::ptr_eq(&deck[0], &deck[2]));

        let err = registry.templates_from_names(&["C"]).unwrap_err();
        assert_eq!(err, RegistryError::UnknownName("C".to_string()));
    }
}
