//! Terminal output formatting
//!
//! Display utilities for line mode and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_banner, print_error, print_history, print_instructions, print_turn, print_win};
