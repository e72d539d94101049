//! Finalized turns and the append-only log that holds them

use super::{Clue, Word};
use thiserror::Error;

/// A malformed history entry reached the log
///
/// Correct UI usage never produces one; hitting it means a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: clue length {clue_len} does not match word length {word_len} for '{word}'")]
pub struct InvariantViolation {
    pub word: String,
    pub word_len: usize,
    pub clue_len: usize,
}

/// One completed turn: the suggested word and the clue the user gave for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    word: Word,
    clue: Clue,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(word: Word, clue: Clue) -> Self {
        Self { word, clue }
    }

    #[inline]
    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    #[inline]
    #[must_use]
    pub fn clue(&self) -> &Clue {
        &self.clue
    }

    /// Check that the clue covers exactly the letters of the word
    ///
    /// # Errors
    /// Returns `InvariantViolation` when the lengths differ.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.clue.len() == self.word.len() {
            Ok(())
        } else {
            Err(InvariantViolation {
                word: self.word.text().to_string(),
                word_len: self.word.len(),
                clue_len: self.clue.len(),
            })
        }
    }
}

/// Ordered record of finalized turns, oldest first
///
/// Entries can only be appended; nothing is ever reordered, edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the end of the log
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the entry's clue and word lengths differ;
    /// the log is left untouched.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), InvariantViolation> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }

    /// The most recent entry, if any
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Copy of the log with one more entry at the end
    ///
    /// Used to build the request for a turn without committing it.
    #[must_use]
    pub fn with_pending(&self, entry: &HistoryEntry) -> Vec<HistoryEntry> {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry.clone());
        entries
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str, clue: &str) -> HistoryEntry {
        HistoryEntry::new(Word::new(word).unwrap(), clue.parse().unwrap())
    }

    #[test]
    fn empty_log_has_no_last() {
        let log = HistoryLog::new();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn append_preserves_submission_order() {
        let mut log = HistoryLog::new();
        let turns = [
            entry("crane", "gxxxx"),
            entry("spout", "xyxxx"),
            entry("civil", "gxgxx"),
        ];

        for (i, turn) in turns.iter().enumerate() {
            log.append(turn.clone()).unwrap();
            assert_eq!(log.len(), i + 1);
            // Earlier entries never change
            assert_eq!(log.entries(), &turns[..=i]);
        }

        assert_eq!(log.last(), Some(&turns[2]));
    }

    #[test]
    fn append_rejects_length_mismatch() {
        let mut log = HistoryLog::new();
        log.append(entry("crane", "gxxxx")).unwrap();

        let bad = entry("slate", "gxx");
        let err = log.append(bad).unwrap_err();

        assert_eq!(err.word_len, 5);
        assert_eq!(err.clue_len, 3);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn with_pending_does_not_commit() {
        let mut log = HistoryLog::new();
        log.append(entry("crane", "gxxxx")).unwrap();

        let pending = entry("spout", "xxxxx");
        let request = log.with_pending(&pending);

        assert_eq!(request.len(), 2);
        assert_eq!(request[1], pending);
        assert_eq!(log.len(), 1);
    }
}
