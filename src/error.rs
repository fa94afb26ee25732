//! Crate-wide error type `AppError` and the matching `Result` alias.
//!
//! Card store and card file errors have their own enums next to the code that
//! produces them; they convert into `AppError` with `?`. `std::io::Error` is not
//! `Clone`, so it is wrapped in `Arc`.

use std::sync::Arc;
use thiserror::Error;

use crate::models::RecordError;
use crate::store::StoreError;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Error related to standard I/O operations (files or the terminal).
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// A line of a card file could not be parsed.
    #[error("Card File Error: {0}")]
    Record(#[from] RecordError),

    /// A card store operation was rejected (duplicate term, missing card, ...).
    #[error("Card Store Error: {0}")]
    Store(#[from] StoreError),

    /// The answer to "How many times to ask?" was not a non-negative number.
    #[error("Invalid question count: {0:?}")]
    InvalidCount(String),

    /// Standard input reached end of file while a line was expected.
    #[error("Input stream closed")]
    InputClosed,
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---
// Arc is used for non-Clone error types.

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}
