//! Session state: the card store, its file format, and the session transcript.

mod card_file;
mod cards;
mod session_log;

pub use cards::*;
pub use session_log::*;
