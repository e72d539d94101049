//! Simple interactive CLI mode
//!
//! Text-based session without the TUI. Solver calls run inline while a
//! spinner is shown.

use crate::core::Clue;
use crate::gateway::SolverGateway;
use crate::output::{print_banner, print_error, print_history, print_instructions, print_turn, print_win};
use crate::session::{Phase, Resolution, SessionController, SessionError, TurnOutcome};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// One line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewSession,
    Retry,
    Submit,
    Win,
    /// Cycle the tile at this zero-based position
    Toggle(usize),
    /// Set the whole clue and submit it
    Clue(Clue),
    Invalid(String),
}

/// Interpret a line of input
#[must_use]
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "n" => Command::NewSession,
        "retry" | "r" => Command::Retry,
        "" | "submit" | "s" => Command::Submit,
        "win" | "correct" | "solved" => Command::Win,
        digit @ ("1" | "2" | "3" | "4" | "5") => {
            // Safe: matched a single ASCII digit 1-5
            Command::Toggle(usize::from(digit.as_bytes()[0] - b'1'))
        }
        _ => input
            .parse::<Clue>()
            .map_or_else(|e| Command::Invalid(e.to_string()), Command::Clue),
    }
}

/// Run the simple interactive CLI mode on stdin
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple<G: SolverGateway + ?Sized>(gateway: &G) -> Result<()> {
    let stdin = io::stdin();
    run_simple_with(gateway, stdin.lock())
}

/// Run the line-mode session reading commands from `reader`
///
/// Ends on `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing the prompt fails.
pub fn run_simple_with<G, R>(gateway: &G, mut reader: R) -> Result<()>
where
    G: SolverGateway + ?Sized,
    R: BufRead,
{
    print_banner();
    print_instructions();

    let mut controller = start_session(gateway);

    loop {
        match controller.phase() {
            Phase::Won => {
                print_win(controller.state().history());

                let Some(answer) = read_input(&mut reader, "Play again? (yes/no)")? else {
                    return Ok(());
                };
                if matches!(answer.to_lowercase().as_str(), "yes" | "y") {
                    println!("\n🔄 New session started!\n");
                    controller = start_session(gateway);
                    continue;
                }
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Phase::Ready => {
                print_history(controller.state().history());
                print_turn(controller.state());
                print_error(controller.state());
            }
            _ => print_error(controller.state()),
        }

        let Some(input) = read_input(&mut reader, "Clue, tile number, or command")? else {
            return Ok(());
        };

        match parse_command(&input) {
            Command::Quit => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Command::NewSession => {
                println!("\n🔄 New session started!\n");
                controller = start_session(gateway);
            }
            Command::Retry => {
                let result = with_spinner("Asking the solver for a first word...", || {
                    controller.retry_with(gateway)
                });
                report(result.map(|_| ()));
            }
            Command::Toggle(position) => {
                report(controller.toggle_clue_at(position).map(|_| ()));
            }
            Command::Submit => submit(&mut controller, gateway),
            Command::Win => {
                let len = controller.state().pending_clue().len();
                if report(apply_clue(&mut controller, &Clue::all_correct(len))) {
                    submit(&mut controller, gateway);
                }
            }
            Command::Clue(clue) => {
                if report(apply_clue(&mut controller, &clue)) {
                    submit(&mut controller, gateway);
                }
            }
            Command::Invalid(reason) => {
                println!("❌ {reason}. Use g/y/x, a tile number 1-5, or a command.\n");
            }
        }
    }
}

/// Drive the pending clue to `target` through tile toggles
///
/// # Errors
///
/// Fails if the session is not accepting clues or the clue length does not
/// match the current word.
pub fn apply_clue(controller: &mut SessionController, target: &Clue) -> Result<(), SessionError> {
    let current = controller.state().pending_clue().clone();
    if target.len() != current.len() {
        return Err(SessionError::ClueLength {
            expected: current.len(),
            got: target.len(),
        });
    }

    for (position, (&from, &to)) in current.codes().iter().zip(target.codes()).enumerate() {
        for _ in 0..from.steps_to(to) {
            controller.toggle_clue_at(position)?;
        }
    }
    debug_assert_eq!(controller.state().pending_clue(), target);
    Ok(())
}

fn submit<G: SolverGateway + ?Sized>(controller: &mut SessionController, gateway: &G) {
    let result = with_spinner("Asking the solver for the next word...", || {
        controller.submit_with(gateway)
    });

    match result {
        Ok(TurnOutcome::Won | TurnOutcome::Resolved(Resolution::Suggested(_))) => {}
        // The message is on the session state and printed with the next turn
        Ok(TurnOutcome::Resolved(Resolution::Failed(_) | Resolution::Stale)) => {}
        Err(e) => println!("❌ {e}\n"),
    }
}

fn start_session<G: SolverGateway + ?Sized>(gateway: &G) -> SessionController {
    with_spinner("Asking the solver for a first word...", || {
        SessionController::start(gateway)
    })
}

/// Print a rejected action; true if it went through
fn report(result: Result<(), SessionError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            println!("❌ {e}\n");
            false
        }
    }
}

fn with_spinner<T>(message: &'static str, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = f();
    spinner.finish_and_clear();
    result
}

/// Prompt and read one trimmed line; `None` at end of input
fn read_input<R: BufRead>(reader: &mut R, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .context("Failed to read input")?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HistoryEntry, Word};
    use crate::gateway::GatewayError;
    use std::cell::RefCell;
    use std::io::Cursor;

    /// Suggests words from a fixed list and counts the calls
    struct ListGateway {
        words: Vec<&'static str>,
        calls: RefCell<Vec<usize>>,
    }

    impl ListGateway {
        fn new(words: &[&'static str]) -> Self {
            Self {
                words: words.to_vec(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SolverGateway for ListGateway {
        fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError> {
            self.calls.borrow_mut().push(history.len());
            self.words
                .get(history.len())
                .map(|w| Word::new(*w).unwrap())
                .ok_or_else(|| GatewayError::Transport("out of words".to_string()))
        }
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("  Q "), Command::Quit);
        assert_eq!(parse_command("new"), Command::NewSession);
        assert_eq!(parse_command("retry"), Command::Retry);
        assert_eq!(parse_command(""), Command::Submit);
        assert_eq!(parse_command("win"), Command::Win);
        assert_eq!(parse_command("1"), Command::Toggle(0));
        assert_eq!(parse_command("5"), Command::Toggle(4));
        assert_eq!(
            parse_command("GYxx-"),
            Command::Clue("gyxxx".parse().unwrap())
        );
        assert!(matches!(parse_command("6"), Command::Invalid(_)));
        assert!(matches!(parse_command("hello"), Command::Invalid(_)));
    }

    #[test]
    fn apply_clue_uses_toggles() {
        let gateway = ListGateway::new(&["crane"]);
        let mut controller = SessionController::start(&gateway);
        controller.toggle_clue_at(0).unwrap();

        apply_clue(&mut controller, &"gyxxg".parse().unwrap()).unwrap();
        assert_eq!(controller.state().pending_clue().to_string(), "gyxxg");
    }

    #[test]
    fn apply_clue_rejects_wrong_length() {
        let gateway = ListGateway::new(&["crane"]);
        let mut controller = SessionController::start(&gateway);

        assert!(apply_clue(&mut controller, &"gyx".parse().unwrap()).is_err());
        assert!(apply_clue(&mut controller, &"gyxxxx".parse().unwrap()).is_err());
        assert_eq!(controller.state().pending_clue().to_string(), "xxxxx");
    }

    #[test]
    fn quits_immediately() {
        let gateway = ListGateway::new(&["crane"]);
        run_simple_with(&gateway, Cursor::new("quit\n")).unwrap();
        assert_eq!(*gateway.calls.borrow(), vec![0]);
    }

    #[test]
    fn typed_clues_advance_turns() {
        let gateway = ListGateway::new(&["crane", "spout", "civil"]);
        run_simple_with(&gateway, Cursor::new("gxxxx\nxyxxx\nquit\n")).unwrap();
        assert_eq!(*gateway.calls.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn win_stops_requesting() {
        let gateway = ListGateway::new(&["crane", "spout"]);
        run_simple_with(&gateway, Cursor::new("1\n1\nsubmit\nwin\nno\n")).unwrap();
        // Start, one turn; the win issues no call
        assert_eq!(*gateway.calls.borrow(), vec![0, 1]);
    }

    #[test]
    fn play_again_starts_new_session() {
        let gateway = ListGateway::new(&["crane"]);
        run_simple_with(&gateway, Cursor::new("ggggg\nyes\nquit\n")).unwrap();
        assert_eq!(*gateway.calls.borrow(), vec![0, 0]);
    }

    #[test]
    fn failed_turn_can_be_resubmitted() {
        // Only a first word: every turn request fails
        let gateway = ListGateway::new(&["crane"]);
        run_simple_with(&gateway, Cursor::new("yxxxx\n\nquit\n")).unwrap();
        assert_eq!(*gateway.calls.borrow(), vec![0, 1, 1]);
    }

    #[test]
    fn end_of_input_exits() {
        let gateway = ListGateway::new(&["crane"]);
        run_simple_with(&gateway, Cursor::new("3\n")).unwrap();
    }
}
