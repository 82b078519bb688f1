//! Keyword tags and their parameters.
//!
//! Keywords are a closed set. Parameterised keywords (Arcane Barrier N,
//! Piercing N) store their value in the `KeywordMap`; the rest store 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Rules keyword carried by a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Keyword {
    /// Gain an action point when the card resolves.
    GoAgain,
    /// Can't be defended by more than one card from hand.
    Dominate,
    /// Can't be defended by more than one action card.
    Overpower,
    /// Piercing N: +N power while defended by equipment.
    Piercing,
    /// Arcane Barrier N: spend resources to prevent arcane damage.
    ArcaneBarrier,
    /// Gets a -1 defense counter after it defends.
    Battleworn,
    /// Destroyed after it defends.
    BladeBreak,
    /// Gets a -1 defense counter after it defends; destroyed at 0 defense.
    Temper,
    /// Loses all of its defense after it defends.
    Guardwell,
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Keyword::GoAgain => "Go again",
            Keyword::Dominate => "Dominate",
            Keyword::Overpower => "Overpower",
            Keyword::Piercing => "Piercing",
            Keyword::ArcaneBarrier => "Arcane Barrier",
            Keyword::Battleworn => "Battleworn",
            Keyword::BladeBreak => "Blade Break",
            Keyword::Temper => "Temper",
            Keyword::Guardwell => "Guardwell",
        };
        f.write_str(name)
    }
}

/// Keyword tag to parameter map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMap(FxHashMap<Keyword, u32>);

impl KeywordMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a keyword and its parameter (0 for plain keywords).
    pub fn insert(&mut self, keyword: Keyword, param: u32) {
        self.0.insert(keyword, param);
    }

    /// Check for a keyword.
    #[must_use]
    pub fn contains(&self, keyword: Keyword) -> bool {
        self.0.contains_key(&keyword)
    }

    /// Parameter of a keyword, if present.
    #[must_use]
    pub fn get(&self, keyword: Keyword) -> Option<u32> {
        self.0.get(&keyword).copied()
    }

    /// Number of keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no keywords are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (keyword, parameter) pairs in keyword order.
    pub fn iter(&self) -> impl Iterator<Item = (Keyword, u32)> {
        let mut entries: Vec<_> = self.0.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries.into_iter()
    }
}

impl FromIterator<(Keyword, u32)> for KeywordMap {
    fn from_iter<I: IntoIterator<Item = (Keyword, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_map_params() {
        let mut map = KeywordMap::new();
        map.insert(Keyword::GoAgain, 0);
        map.insert(Keyword::ArcaneBarrier, 2);

        assert!(map.contains(Keyword::GoAgain));
        assert_eq!(map.get(Keyword::ArcaneBarrier), Some(2));
        assert_eq!(map.get(Keyword::Dominate), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_iter_is_sorted() {
        let map: KeywordMap = [(Keyword::Temper, 0), (Keyword::GoAgain, 0), (Keyword::Piercing, 1)]
            .into_iter()
            .collect();

        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Keyword::GoAgain, Keyword::Piercing, Keyword::Temper]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Keyword::BladeBreak.to_string(), "Blade Break");
    }
}
