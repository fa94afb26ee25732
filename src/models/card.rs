//! Flashcard data structures and the card file record codec.
//!
//! A card file holds one card per line in the form
//! `term : definition, wrong_count`. Fields are separated by `:` and `,` and
//! trimmed of surrounding whitespace, so a term or definition containing either
//! delimiter cannot be stored in this format.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Characters that separate the three fields of a card record.
pub const FIELD_DELIMITERS: [char; 2] = [':', ','];

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub term: String,
    pub definition: String,
    /// Number of wrong answers since creation or the last stats reset.
    pub wrong_count: u32,
}

impl Card {
    /// Creates a card with no recorded mistakes.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            wrong_count: 0,
        }
    }

    /// Returns the card with its wrong answer count replaced.
    pub fn with_wrong_count(mut self, wrong_count: u32) -> Self {
        self.wrong_count = wrong_count;
        self
    }
}

/// Reasons a card file line can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 fields (term : definition, count), found {0}")]
    FieldCount(usize),

    #[error("wrong answer count {0:?} is not a non-negative integer")]
    Count(String),

    #[error("term must not be empty")]
    EmptyTerm,
}

/// Parses a single card file line.
///
/// Splitting follows the persisted format exactly: the line is cut at every
/// `:` and `,`, trailing empty fields are discarded, and exactly three fields
/// must remain.
impl FromStr for Card {
    type Err = RecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields: Vec<&str> = line.split(FIELD_DELIMITERS).collect();
        while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }

        let [term, definition, count] = fields.as_slice() else {
            return Err(RecordError::FieldCount(fields.len()));
        };

        let term = term.trim();
        if term.is_empty() {
            return Err(RecordError::EmptyTerm);
        }

        let count = count.trim();
        let wrong_count = count
            .parse::<u32>()
            .map_err(|_| RecordError::Count(count.to_string()))?;

        Ok(Card::new(term, definition.trim()).with_wrong_count(wrong_count))
    }
}

/// Formats the card as a card file line (without the trailing newline).
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}, {}", self.term, self.definition, self.wrong_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_card_display_matches_file_format() {
        let card = Card::new("dog", "animal").with_wrong_count(3);
        assert_eq!(card.to_string(), "dog : animal, 3");
    }

    #[rstest]
    #[case("dog : animal, 3", "dog", "animal", 3)]
    #[case("dog:animal,0", "dog", "animal", 0)]
    #[case("  big cat  :   a large feline ,  12  ", "big cat", "a large feline", 12)]
    #[case("dog : animal, 3,", "dog", "animal", 3)] // trailing empty field is dropped
    fn test_parse_valid_lines(
        #[case] line: &str,
        #[case] term: &str,
        #[case] definition: &str,
        #[case] wrong_count: u32,
    ) {
        let card: Card = line.parse().unwrap();
        assert_eq!(card.term, term);
        assert_eq!(card.definition, definition);
        assert_eq!(card.wrong_count, wrong_count);
    }

    #[rstest]
    #[case("dog animal 3", RecordError::FieldCount(1))]
    #[case("dog : animal", RecordError::FieldCount(2))]
    #[case("time : 10:30, 1", RecordError::FieldCount(4))]
    #[case("dog : animal, three", RecordError::Count("three".to_string()))]
    #[case("dog : animal, -1", RecordError::Count("-1".to_string()))]
    #[case("   : animal, 1", RecordError::EmptyTerm)]
    fn test_parse_malformed_lines(#[case] line: &str, #[case] expected: RecordError) {
        assert_eq!(line.parse::<Card>(), Err(expected));
    }

    #[test]
    fn test_display_then_parse_preserves_card() {
        let card = Card::new("capital of France", "Paris").with_wrong_count(7);
        let parsed: Card = card.to_string().parse().unwrap();
        assert_eq!(parsed, card);
    }
}
