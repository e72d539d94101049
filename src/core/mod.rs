//! Core domain types for the Wordle assistant
//!
//! Pure value types with no I/O: words, clue codes, and the turn history.

mod clue;
mod history;
mod word;

pub use clue::{Clue, ClueCode, ClueError};
pub use history::{HistoryEntry, HistoryLog, InvariantViolation};
pub use word::{WORD_LENGTH, Word, WordError};
