//! Defines the data structures and models used throughout the application.
//!
//! Currently this is the flashcard itself plus the line-oriented record format
//! used to persist cards to disk.

mod card;

pub use card::*;
