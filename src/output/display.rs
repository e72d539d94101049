//! Display functions for line mode

use super::formatters::{paint_word, position_ruler};
use crate::core::HistoryLog;
use crate::session::{Phase, SessionState};
use colored::Colorize;

pub fn print_banner() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Wordle Bot - Line Mode                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

pub fn print_instructions() {
    println!("I'll ask the solver for a word to try. After each guess, tell me the colours:\n");
    println!("  - Type a clue like 'gyxxx' (g = green, y = yellow, x = gray)");
    println!("  - Or type 1-5 to cycle a single tile (gray → yellow → green)");
    println!("  - Then 'submit' (or just Enter) to send it, 'win' if you got it!\n");
    println!("Commands: 'retry' after a failed start, 'new' for a new session, 'quit' to exit\n");
}

/// Print every finalized turn, oldest first
pub fn print_history(history: &HistoryLog) {
    if history.is_empty() {
        return;
    }

    println!("{}", "History:".bright_cyan().bold());
    for (i, entry) in history.iter().enumerate() {
        println!(
            "  Guess {}: {} {}",
            (i + 1).to_string().bright_black(),
            paint_word(entry.word(), entry.clue()),
            entry.clue().to_emoji()
        );
    }
    println!();
}

/// Print the current suggestion and the clue being built for it
pub fn print_turn(state: &SessionState) {
    let Some(word) = state.current_word() else {
        return;
    };

    println!("{}", "─".repeat(60).cyan());
    println!("Turn {}", state.history().len() + 1);
    println!("{}", "─".repeat(60).cyan());
    println!(
        "\n🤖 Wordle Bot recommends your next guess is: {}",
        paint_word(word, &state.previous_clue())
    );
    println!(
        "   Your clue:                                  {}",
        paint_word(word, state.pending_clue())
    );
    println!(
        "                                               {}\n",
        position_ruler(word.len()).bright_black()
    );
}

/// Print the session error, if any
pub fn print_error(state: &SessionState) {
    if let Some(message) = state.error_message() {
        let hint = match state.phase() {
            Phase::Errored => " (type 'retry' to try again)",
            _ => " (submit again to retry)",
        };
        println!("{}{}\n", format!("❌ {message}").red(), hint.bright_black());
    }
}

pub fn print_win(history: &HistoryLog) {
    println!("\n{}", "═".repeat(70).bright_cyan());
    println!(
        "{}",
        "    🎉 🎊 ✨  Y O U ' V E   W O N   T H E   G A M E !  ✨ 🎊 🎉    "
            .bright_green()
            .bold()
    );
    println!("{}", "═".repeat(70).bright_cyan());
    println!(
        "\n  Solved in {} {}\n",
        history.len().to_string().bright_cyan().bold(),
        if history.len() == 1 { "guess" } else { "guesses" }
    );
    print_history(history);
}
