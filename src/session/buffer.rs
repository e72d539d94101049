//! The clue being built for the current suggestion

use super::SessionError;
use crate::core::{Clue, ClueCode};

/// Something whose clue tiles can be toggled by position
///
/// The rendering layer only ever talks to this capability; it never edits
/// clue state directly.
pub trait Toggleable {
    /// Advance the code at `position` to the next one in the cycle
    ///
    /// # Errors
    /// Returns `SessionError` when the position is out of range or toggling is
    /// not currently allowed.
    fn toggle_at(&mut self, position: usize) -> Result<(), SessionError>;
}

/// Mutable clue for the word currently on screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClueBuffer {
    clue: Clue,
}

impl ClueBuffer {
    /// A buffer of `len` absent codes
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            clue: Clue::absent(len),
        }
    }

    /// Advance the code at `position`, leaving every other position alone
    ///
    /// # Errors
    /// Returns `SessionError::PositionOutOfRange` if `position >= len`.
    pub fn toggle(&mut self, position: usize) -> Result<ClueCode, SessionError> {
        let len = self.clue.len();
        let code = self
            .clue
            .codes_mut()
            .get_mut(position)
            .ok_or(SessionError::PositionOutOfRange { position, len })?;
        *code = code.next();
        Ok(*code)
    }

    /// Set every position back to absent, resizing to `len`
    pub fn reset(&mut self, len: usize) {
        self.clue = Clue::absent(len);
    }

    #[must_use]
    pub fn is_all_correct(&self) -> bool {
        self.clue.is_all_correct()
    }

    #[must_use]
    pub fn clue(&self) -> &Clue {
        &self.clue
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clue.is_empty()
    }
}

impl Toggleable for ClueBuffer {
    fn toggle_at(&mut self, position: usize) -> Result<(), SessionError> {
        self.toggle(position).map(|_| ())
    }
}
