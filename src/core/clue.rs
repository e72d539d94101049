//! Clue feedback codes and their string encoding
//!
//! A clue records, per letter position, how a guess compared to the hidden
//! answer:
//! - `x` = absent (letter not in word)
//! - `y` = misplaced (letter in word, wrong position)
//! - `g` = correct (letter in correct position)
//!
//! The `xyg` string form is what travels to the solver.

use std::fmt;
use thiserror::Error;

use super::word::WORD_LENGTH;

/// Feedback for a single letter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClueCode {
    #[default]
    Absent,
    Misplaced,
    Correct,
}

impl ClueCode {
    /// All codes in toggle order
    pub const CYCLE: [Self; 3] = [Self::Absent, Self::Misplaced, Self::Correct];

    /// The code that follows this one when a tile is toggled
    ///
    /// `absent → misplaced → correct → absent`
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Absent => Self::Misplaced,
            Self::Misplaced => Self::Correct,
            Self::Correct => Self::Absent,
        }
    }

    /// Number of toggles needed to go from `self` to `target`
    #[must_use]
    pub fn steps_to(self, target: Self) -> usize {
        let mut code = self;
        let mut steps = 0;
        while code != target {
            code = code.next();
            steps += 1;
        }
        steps
    }

    /// Wire character (`x`, `y` or `g`)
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Absent => 'x',
            Self::Misplaced => 'y',
            Self::Correct => 'g',
        }
    }

    /// Parse a single clue character
    ///
    /// Accepts the wire alphabet in either case plus the usual aliases:
    /// `-`/`_`/⬜ for absent, 🟨 for misplaced, 🟩 for correct.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'x' | 'X' | '-' | '_' | '⬜' => Some(Self::Absent),
            'y' | 'Y' | '🟨' => Some(Self::Misplaced),
            'g' | 'G' | '🟩' => Some(Self::Correct),
            _ => None,
        }
    }

    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Absent => '⬜',
            Self::Misplaced => '🟨',
            Self::Correct => '🟩',
        }
    }
}

/// Error returned when a clue string cannot be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClueError {
    #[error("Clue must not be empty")]
    Empty,
    #[error("Invalid clue character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

/// Ordered feedback codes for one guess
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clue(Vec<ClueCode>);

impl Clue {
    /// A clue of `len` absent codes
    #[must_use]
    pub fn absent(len: usize) -> Self {
        Self(vec![ClueCode::Absent; len])
    }

    /// A clue of `len` correct codes
    #[must_use]
    pub fn all_correct(len: usize) -> Self {
        Self(vec![ClueCode::Correct; len])
    }

    #[must_use]
    pub fn from_codes(codes: Vec<ClueCode>) -> Self {
        Self(codes)
    }

    #[inline]
    #[must_use]
    pub fn codes(&self) -> &[ClueCode] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<ClueCode> {
        self.0.get(position).copied()
    }

    pub(crate) fn codes_mut(&mut self) -> &mut [ClueCode] {
        &mut self.0
    }

    /// True iff every position is correct (the win predicate)
    ///
    /// An empty clue is never a win.
    #[must_use]
    pub fn is_all_correct(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&code| code == ClueCode::Correct)
    }

    /// Render as an emoji string like "🟩🟨⬜⬜⬜"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|code| code.to_emoji()).collect()
    }
}

impl Default for Clue {
    fn default() -> Self {
        Self::absent(WORD_LENGTH)
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in &self.0 {
            write!(f, "{}", code.as_char())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Clue {
    type Err = ClueError;

    /// Decode a clue string such as "gyxxx" or "🟩🟨⬜⬜⬜"
    ///
    /// Length is not checked here; pairing a clue with its word is where the
    /// lengths must agree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ClueError::Empty);
        }

        s.chars()
            .enumerate()
            .map(|(position, ch)| {
                ClueCode::from_char(ch).ok_or(ClueError::InvalidCharacter { ch, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycle_order() {
        assert_eq!(ClueCode::Absent.next(), ClueCode::Misplaced);
        assert_eq!(ClueCode::Misplaced.next(), ClueCode::Correct);
        assert_eq!(ClueCode::Correct.next(), ClueCode::Absent);
    }

    #[test]
    fn toggle_cycle_closes_in_three_steps() {
        for code in ClueCode::CYCLE {
            assert_eq!(code.next().next().next(), code);
            assert_ne!(code.next(), code);
            assert_ne!(code.next().next(), code);
        }
    }

    #[test]
    fn steps_between_codes() {
        assert_eq!(ClueCode::Absent.steps_to(ClueCode::Absent), 0);
        assert_eq!(ClueCode::Absent.steps_to(ClueCode::Correct), 2);
        assert_eq!(ClueCode::Correct.steps_to(ClueCode::Misplaced), 2);
        assert_eq!(ClueCode::Misplaced.steps_to(ClueCode::Correct), 1);
    }

    #[test]
    fn clue_default_is_all_absent() {
        assert_eq!(Clue::default().to_string(), "xxxxx");
    }

    #[test]
    fn clue_parse_aliases() {
        let wire: Clue = "gyxxg".parse().unwrap();
        let upper: Clue = "GY--G".parse().unwrap();
        let emoji: Clue = "🟩🟨⬜_🟩".parse().unwrap();

        assert_eq!(wire, upper);
        assert_eq!(wire, emoji);
        assert_eq!(emoji.to_string(), "gyxxg");
    }

    #[test]
    fn clue_parse_invalid() {
        assert_eq!("".parse::<Clue>(), Err(ClueError::Empty));
        assert_eq!(
            "gxbxx".parse::<Clue>(),
            Err(ClueError::InvalidCharacter {
                ch: 'b',
                position: 2
            })
        );
    }

    #[test]
    fn clue_string_form_round_trips_for_every_code_combination() {
        let alphabet = ['x', 'y', 'g'];
        for n in 0..243usize {
            let mut encoded = String::new();
            let mut rest = n;
            for _ in 0..5 {
                encoded.push(alphabet[rest % 3]);
                rest /= 3;
            }

            let clue: Clue = encoded.parse().unwrap();
            assert_eq!(clue.len(), 5);
            assert_eq!(clue.to_string(), encoded);
        }
    }

    #[test]
    fn all_correct_predicate() {
        assert!("ggggg".parse::<Clue>().unwrap().is_all_correct());
        assert!(Clue::all_correct(5).is_all_correct());
        assert!(!"ggggy".parse::<Clue>().unwrap().is_all_correct());
        assert!(!"xgggg".parse::<Clue>().unwrap().is_all_correct());
        assert!(!Clue::absent(0).is_all_correct());
    }

    #[test]
    fn clue_to_emoji() {
        let clue: Clue = "gyxxx".parse().unwrap();
        assert_eq!(clue.to_emoji(), "🟩🟨⬜⬜⬜");
    }
}
