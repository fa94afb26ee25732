//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes startup argument parsing and configuration, the transcript-keeping
//! console, and the interactive command loop that drives a flashcard session.

mod args;
mod commands;
mod console;

pub use args::*;
pub use commands::*;
pub use console::*;
