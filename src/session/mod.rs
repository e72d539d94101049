//! Interactive session: clue entry, turn history and the solver round-trip

mod buffer;
mod controller;
mod error;

pub use buffer::{ClueBuffer, Toggleable};
pub use controller::{
    PendingRequest, Phase, RequestKind, RequestTicket, Resolution, SessionController,
    SessionState, SubmitOutcome, TurnOutcome,
};
pub use error::SessionError;
