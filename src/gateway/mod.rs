//! Solver gateway contract
//!
//! The solver is an external service: it receives the full ordered turn
//! history on every call and answers with the next word to try. The session
//! controller never talks to it directly; callers hand the controller's
//! `PendingRequest` to a gateway and feed the result back.

pub mod http;

use crate::core::{HistoryEntry, Word};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpGateway;

/// Failure to obtain a suggestion from the solver
///
/// Callers treat every variant the same way; the split exists for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(String),
    #[error("solver responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed solver response: {0}")]
    Malformed(String),
}

/// Anything that can turn a turn history into the next suggestion
pub trait SolverGateway {
    /// Suggest the next word given every finalized turn, oldest first
    ///
    /// # Errors
    /// Returns `GatewayError` on any transport or protocol problem.
    fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError>;
}

impl<G: SolverGateway + ?Sized> SolverGateway for &G {
    fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError> {
        (**self).suggest(history)
    }
}

impl<G: SolverGateway + ?Sized> SolverGateway for Box<G> {
    fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError> {
        (**self).suggest(history)
    }
}

impl<G: SolverGateway + ?Sized> SolverGateway for std::sync::Arc<G> {
    fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError> {
        (**self).suggest(history)
    }
}

/// One history entry as sent to the solver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverRequestItem {
    pub word: String,
    pub clue: String,
}

impl From<&HistoryEntry> for SolverRequestItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            word: entry.word().text().to_string(),
            clue: entry.clue().to_string(),
        }
    }
}

/// Solver reply body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverResponse {
    pub guess: String,
}

impl SolverResponse {
    /// Validate the suggested guess
    ///
    /// # Errors
    /// Returns `GatewayError::Malformed` if the guess is not a 5-letter word.
    pub fn into_word(self) -> Result<Word, GatewayError> {
        Word::new(&self.guess)
            .map_err(|e| GatewayError::Malformed(format!("guess '{}': {e}", self.guess)))
    }
}

/// Build the request body for a history
#[must_use]
pub fn request_body(history: &[HistoryEntry]) -> Vec<SolverRequestItem> {
    history.iter().map(SolverRequestItem::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_items_use_wire_alphabet() {
        let history = vec![HistoryEntry::new(
            Word::new("CRANE").unwrap(),
            "GY-__".parse().unwrap(),
        )];

        let body = serde_json::to_value(request_body(&history)).unwrap();
        assert_eq!(
            body,
            serde_json::json!([{ "word": "crane", "clue": "gyxxx" }])
        );
    }

    #[test]
    fn empty_history_is_empty_array() {
        let body = serde_json::to_string(&request_body(&[])).unwrap();
        assert_eq!(body, "[]");
    }

    #[test]
    fn response_guess_is_validated() {
        let ok = SolverResponse {
            guess: "Spout".to_string(),
        };
        assert_eq!(ok.into_word().unwrap().text(), "spout");

        let bad = SolverResponse {
            guess: "toolong".to_string(),
        };
        assert!(matches!(bad.into_word(), Err(GatewayError::Malformed(_))));
    }
}
