use super::Phase;
use crate::core::InvariantViolation;
use thiserror::Error;

/// Errors returned by session operations
///
/// None of these are user-recoverable in the sense of a retry: they reject an
/// action that is not valid right now, or report a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),

    #[error("cannot {action} while {phase}")]
    NotAllowed { action: &'static str, phase: Phase },

    #[error("clue position {position} out of range (length {len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("clue has {got} codes, expected {expected}")]
    ClueLength { expected: usize, got: usize },
}
