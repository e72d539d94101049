//! Formatting utilities for terminal output

use crate::core::{Clue, ClueCode, Word};
use colored::{ColoredString, Colorize};

/// Paint one letter as a coloured tile
#[must_use]
pub fn paint_tile(letter: char, code: ClueCode) -> ColoredString {
    let tile = format!(" {} ", letter.to_ascii_uppercase()).black().bold();
    match code {
        ClueCode::Correct => tile.on_green(),
        ClueCode::Misplaced => tile.on_yellow(),
        ClueCode::Absent => tile.on_white(),
    }
}

/// Paint a word letter by letter using its clue
///
/// Positions the clue does not cover are painted absent. Falls back to
/// `bracket_word` when colour output is off.
#[must_use]
pub fn paint_word(word: &Word, clue: &Clue) -> String {
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return bracket_word(word, clue);
    }

    word.letters()
        .enumerate()
        .map(|(i, letter)| {
            paint_tile(letter, clue.get(i).unwrap_or_default()).to_string()
        })
        .collect()
}

/// Plain-text tile row such as "[C][R]{A}(N)[E]"
///
/// `[]` absent, `()` misplaced, `{}` correct. Used where colour is off.
#[must_use]
pub fn bracket_word(word: &Word, clue: &Clue) -> String {
    word.letters()
        .enumerate()
        .map(|(i, letter)| {
            let letter = letter.to_ascii_uppercase();
            match clue.get(i).unwrap_or_default() {
                ClueCode::Absent => format!("[{letter}]"),
                ClueCode::Misplaced => format!("({letter})"),
                ClueCode::Correct => format!("{{{letter}}}"),
            }
        })
        .collect()
}

/// Position markers shown under a word: " 1  2  3  4  5 "
#[must_use]
pub fn position_ruler(len: usize) -> String {
    (1..=len).map(|i| format!(" {i} ")).collect()
}
