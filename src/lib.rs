//! Wordle Bot
//!
//! Client-side assistant for a remote Wordle solver. The user reports the
//! colours Wordle showed for the suggested word; the session relays the whole
//! guess/clue history to the solver and shows the next suggestion.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use wordle_bot::gateway::HttpGateway;
//! use wordle_bot::session::{SessionController, TurnOutcome};
//!
//! let endpoint = "http://127.0.0.1:8000/wordle".parse().unwrap();
//! let gateway = HttpGateway::new(endpoint, Duration::from_secs(10)).unwrap();
//!
//! let mut session = SessionController::start(&gateway);
//! session.toggle_clue_at(0).unwrap(); // gray → yellow
//! let outcome = session.submit_with(&gateway).unwrap();
//! assert_ne!(outcome, TurnOutcome::Won);
//! ```

// Core domain types
pub mod core;

// Clue entry and the turn state machine
pub mod session;

// Solver transport
pub mod gateway;

// Runtime configuration
pub mod config;

// Tracing setup
pub mod logging;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
