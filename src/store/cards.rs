//! In-memory card store.
//!
//! Cards keep their insertion order, which is the order quizzes walk through
//! them and the order they are exported in. Wrong answer counts live in a
//! separate map keyed by term; a term with no entry has a count of zero.

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::models::Card;

/// Rejections produced by card store mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("the card {0:?} already exists")]
    TermExists(String),

    #[error("the definition {0:?} already exists")]
    DefinitionExists(String),

    #[error("there is no card {0:?}")]
    NoSuchCard(String),
}

#[derive(Debug, Clone)]
struct Entry {
    term: String,
    definition: String,
}

/// Ordered term -> definition mapping with per-term wrong answer statistics.
#[derive(Debug, Default)]
pub struct CardStore {
    entries: Vec<Entry>,
    /// Absent terms have zero wrong answers. Zero is never stored.
    stats: HashMap<String, u32>,
}

/// Terms sharing the highest wrong answer count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HardestCards {
    pub terms: Vec<String>,
    pub wrong_count: u32,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.position(term).is_some()
    }

    /// Adds a new card at the end of the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::TermExists` if the term is already present and
    /// `StoreError::DefinitionExists` if any card already uses the definition.
    /// The store is left untouched in both cases.
    pub fn add(&mut self, term: &str, definition: &str) -> Result<(), StoreError> {
        if self.contains_term(term) {
            return Err(StoreError::TermExists(term.to_string()));
        }
        if self.find_term_by_definition(definition).is_some() {
            return Err(StoreError::DefinitionExists(definition.to_string()));
        }

        debug!("Adding card {:?}", term);
        self.entries.push(Entry {
            term: term.to_string(),
            definition: definition.to_string(),
        });
        Ok(())
    }

    /// Removes a card together with its statistics.
    pub fn remove(&mut self, term: &str) -> Result<Card, StoreError> {
        let index = self
            .position(term)
            .ok_or_else(|| StoreError::NoSuchCard(term.to_string()))?;

        debug!("Removing card {:?}", term);
        let entry = self.entries.remove(index);
        let wrong_count = self.stats.remove(term).unwrap_or(0);
        Ok(Card::new(entry.term, entry.definition).with_wrong_count(wrong_count))
    }

    /// Inserts or overwrites a card, replacing its definition and statistics.
    ///
    /// An existing card keeps its position. Unlike [`CardStore::add`] no
    /// duplicate definition check is made; loaded files are trusted.
    pub fn upsert(&mut self, card: Card) {
        let Card {
            term,
            definition,
            wrong_count,
        } = card;

        if wrong_count == 0 {
            self.stats.remove(&term);
        } else {
            self.stats.insert(term.clone(), wrong_count);
        }

        match self.position(&term) {
            Some(index) => self.entries[index].definition = definition,
            None => self.entries.push(Entry { term, definition }),
        }
    }

    pub fn lookup_definition(&self, term: &str) -> Option<&str> {
        self.position(term)
            .map(|index| self.entries[index].definition.as_str())
    }

    /// Returns the first term whose definition equals `definition` exactly.
    pub fn find_term_by_definition(&self, definition: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.definition == definition)
            .map(|entry| entry.term.as_str())
    }

    pub fn wrong_count(&self, term: &str) -> u32 {
        self.stats.get(term).copied().unwrap_or(0)
    }

    /// Increments the wrong answer count of `term` and returns the new count.
    pub fn record_wrong_answer(&mut self, term: &str) -> u32 {
        let count = self.stats.entry(term.to_string()).or_insert(0);
        *count += 1;
        debug!("Wrong answer for {:?}, count is now {}", term, count);
        *count
    }

    /// Forgets every recorded wrong answer.
    pub fn reset_stats(&mut self) {
        debug!("Clearing statistics for {} terms", self.stats.len());
        self.stats.clear();
    }

    /// Finds the cards answered wrong most often, listed in store order.
    ///
    /// Returns an empty result with a count of zero when no wrong answers
    /// have been recorded.
    pub fn hardest_cards(&self) -> HardestCards {
        let Some(max) = self.stats.values().copied().max() else {
            return HardestCards::default();
        };

        let terms = self
            .entries
            .iter()
            .filter(|entry| self.stats.get(&entry.term) == Some(&max))
            .map(|entry| entry.term.clone())
            .collect();

        HardestCards {
            terms,
            wrong_count: max,
        }
    }

    /// Iterates over the cards in store order, statistics included.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.entries.iter().map(|entry| {
            Card::new(entry.term.clone(), entry.definition.clone())
                .with_wrong_count(self.wrong_count(&entry.term))
        })
    }

    /// Terms in store order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.term.as_str())
    }

    fn position(&self, term: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.term == term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(cards: &[(&str, &str)]) -> CardStore {
        let mut store = CardStore::new();
        for (term, definition) in cards {
            store.add(term, definition).unwrap();
        }
        store
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let store = store_with(&[("dog", "animal"), ("apple", "fruit"), ("cat", "feline")]);
        let terms: Vec<&str> = store.terms().collect();
        assert_eq!(terms, vec!["dog", "apple", "cat"]);
    }

    #[test]
    fn test_add_duplicate_term_keeps_original_definition() {
        let mut store = store_with(&[("dog", "animal")]);
        let result = store.add("dog", "pet");
        assert_eq!(result, Err(StoreError::TermExists("dog".to_string())));
        assert_eq!(store.lookup_definition("dog"), Some("animal"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_duplicate_definition_rejected_for_new_term() {
        let mut store = store_with(&[("dog", "animal")]);
        let result = store.add("cow", "animal");
        assert_eq!(
            result,
            Err(StoreError::DefinitionExists("animal".to_string()))
        );
        assert!(!store.contains_term("cow"));
    }

    #[test]
    fn test_definitions_compare_exactly() {
        let mut store = store_with(&[("dog", "animal")]);
        assert!(store.add("cow", "Animal").is_ok());
        assert!(store.add("pig", "animal ").is_ok());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_missing_term_changes_nothing() {
        let mut store = store_with(&[("dog", "animal")]);
        store.record_wrong_answer("dog");
        let result = store.remove("cat");
        assert_eq!(result, Err(StoreError::NoSuchCard("cat".to_string())));
        assert_eq!(store.len(), 1);
        assert_eq!(store.wrong_count("dog"), 1);
    }

    #[test]
    fn test_remove_drops_card_and_stats() {
        let mut store = store_with(&[("dog", "animal"), ("cat", "feline")]);
        store.record_wrong_answer("dog");
        store.record_wrong_answer("dog");

        let removed = store.remove("dog").unwrap();
        assert_eq!(removed, Card::new("dog", "animal").with_wrong_count(2));
        assert!(!store.contains_term("dog"));
        assert_eq!(store.wrong_count("dog"), 0);
        assert_eq!(store.hardest_cards(), HardestCards::default());

        // The term and its definition are free again.
        assert!(store.add("dog", "animal").is_ok());
    }

    #[test]
    fn test_find_term_by_definition() {
        let store = store_with(&[("dog", "animal"), ("cat", "feline")]);
        assert_eq!(store.find_term_by_definition("feline"), Some("cat"));
        assert_eq!(store.find_term_by_definition("bird"), None);
        assert_eq!(store.lookup_definition("cat"), Some("feline"));
        assert_eq!(store.lookup_definition("bird"), None);
    }

    #[test]
    fn test_hardest_card_single_term() {
        let mut store = store_with(&[("dog", "animal"), ("cat", "feline")]);
        for _ in 0..3 {
            store.record_wrong_answer("cat");
        }
        assert_eq!(
            store.hardest_cards(),
            HardestCards {
                terms: vec!["cat".to_string()],
                wrong_count: 3,
            }
        );

        store.reset_stats();
        assert_eq!(store.hardest_cards(), HardestCards::default());
        assert_eq!(store.wrong_count("cat"), 0);
    }

    #[test]
    fn test_hardest_cards_ties_in_store_order() {
        let mut store = store_with(&[("a", "1"), ("b", "2"), ("c", "3")]);
        store.record_wrong_answer("c");
        store.record_wrong_answer("c");
        store.record_wrong_answer("a");
        store.record_wrong_answer("b");
        store.record_wrong_answer("a");

        let hardest = store.hardest_cards();
        assert_eq!(hardest.terms, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(hardest.wrong_count, 2);
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut store = store_with(&[("dog", "animal"), ("cat", "feline")]);
        store.record_wrong_answer("dog");

        store.upsert(Card::new("dog", "canine").with_wrong_count(5));
        store.upsert(Card::new("cow", "bovine"));

        let cards: Vec<Card> = store.cards().collect();
        assert_eq!(
            cards,
            vec![
                Card::new("dog", "canine").with_wrong_count(5),
                Card::new("cat", "feline"),
                Card::new("cow", "bovine"),
            ]
        );
    }

    #[test]
    fn test_upsert_with_zero_count_clears_stats() {
        let mut store = store_with(&[("dog", "animal")]);
        store.record_wrong_answer("dog");
        store.upsert(Card::new("dog", "animal"));
        assert_eq!(store.wrong_count("dog"), 0);
        assert_eq!(store.hardest_cards(), HardestCards::default());
    }
}
