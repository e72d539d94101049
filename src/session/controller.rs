//! Session state machine
//!
//! `Initializing → Ready ⇄ Submitting → {Ready, Errored, Won}`
//!
//! The controller never performs I/O inside a transition. Anything that needs
//! the solver returns a `PendingRequest`; the caller runs it through a
//! `SolverGateway` (inline or on a worker thread) and hands the result back
//! to `resolve`. Each request carries a ticket, and a result whose ticket is
//! not the outstanding one is dropped.

use super::{ClueBuffer, SessionError, Toggleable};
use crate::core::{Clue, ClueCode, HistoryEntry, HistoryLog, WORD_LENGTH, Word};
use crate::gateway::{GatewayError, SolverGateway};
use std::fmt;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the first suggestion
    Initializing,
    /// A suggestion is on screen and the user is entering clues
    Ready,
    /// A turn has been sent to the solver
    Submitting,
    /// The first suggestion could not be fetched
    Errored,
    /// The last submitted clue was all correct; terminal
    Won,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Initializing => "initializing",
            Self::Ready => "ready",
            Self::Submitting => "submitting",
            Self::Errored => "errored",
            Self::Won => "won",
        };
        f.write_str(name)
    }
}

/// Identifies one solver request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// First suggestion of the session (empty history)
    Initial,
    /// Next suggestion after a submitted turn
    Turn,
}

/// A solver call the caller must perform and then `resolve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    ticket: RequestTicket,
    kind: RequestKind,
    history: Vec<HistoryEntry>,
}

impl PendingRequest {
    #[must_use]
    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Full ordered history to send, including the turn being submitted
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Run the request through a gateway
    ///
    /// # Errors
    /// Passes through the gateway's `GatewayError`.
    pub fn send<G: SolverGateway + ?Sized>(&self, gateway: &G) -> Result<Word, GatewayError> {
        gateway.suggest(&self.history)
    }
}

/// Result of a submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The clue was all correct; the entry is recorded and no request follows
    Won,
    /// The turn must be sent to the solver
    Request(PendingRequest),
}

/// What `resolve` did with a gateway result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A new suggestion is on screen
    Suggested(Word),
    /// The call failed; see `SessionState::error_message`
    Failed(GatewayError),
    /// The result did not belong to the outstanding request and was ignored
    Stale,
}

/// Result of a submit performed inline with `submit_with`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Won,
    Resolved(Resolution),
}

/// Read-only snapshot of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    current_word: Option<Word>,
    pending_clue: ClueBuffer,
    history: HistoryLog,
    phase: Phase,
    error_message: Option<String>,
}

impl SessionState {
    fn initializing() -> Self {
        Self {
            current_word: None,
            pending_clue: ClueBuffer::new(WORD_LENGTH),
            history: HistoryLog::new(),
            phase: Phase::Initializing,
            error_message: None,
        }
    }

    /// The active suggestion, absent until the first one arrives
    #[must_use]
    pub fn current_word(&self) -> Option<&Word> {
        self.current_word.as_ref()
    }

    #[must_use]
    pub fn pending_clue(&self) -> &Clue {
        self.pending_clue.clue()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Clue of the last finalized turn, or all absent before the first one
    ///
    /// Used to colour the suggestion before the user enters a new clue.
    #[must_use]
    pub fn previous_clue(&self) -> Clue {
        self.history.last().map_or_else(
            || Clue::absent(self.current_word.as_ref().map_or(WORD_LENGTH, Word::len)),
            |entry| entry.clue().clone(),
        )
    }
}

#[derive(Debug)]
enum InFlight {
    Initial,
    Turn(HistoryEntry),
}

/// Drives one assistant session
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    in_flight: Option<(RequestTicket, InFlight)>,
    last_ticket: u64,
}

impl SessionController {
    /// Create a session and the request for its first suggestion
    #[must_use]
    pub fn new() -> (Self, PendingRequest) {
        let mut controller = Self {
            state: SessionState::initializing(),
            in_flight: None,
            last_ticket: 0,
        };
        let request = controller.issue(InFlight::Initial, Vec::new());
        (controller, request)
    }

    /// Create a session and fetch its first suggestion inline
    pub fn start<G: SolverGateway + ?Sized>(gateway: &G) -> Self {
        let (mut controller, request) = Self::new();
        controller.dispatch(gateway, &request);
        controller
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// True while a solver request is outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Advance the clue at `position`
    ///
    /// # Errors
    /// Fails unless the session is `Ready`, or if `position` is out of range.
    pub fn toggle_clue_at(&mut self, position: usize) -> Result<ClueCode, SessionError> {
        self.require(Phase::Ready, "toggle clues")?;
        let code = self.state.pending_clue.toggle(position)?;
        tracing::debug!(position, code = %code.as_char(), "clue toggled");
        Ok(code)
    }

    /// Finalize the pending clue for the current word
    ///
    /// A clue left partly absent is accepted as-is.
    ///
    /// # Errors
    /// Fails unless the session is `Ready`, or with `InvariantViolation` if the
    /// entry is malformed (nothing changes in that case).
    pub fn submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        self.require(Phase::Ready, "submit")?;
        let word = self
            .state
            .current_word
            .clone()
            .ok_or(SessionError::NotAllowed {
                action: "submit",
                phase: self.state.phase,
            })?;

        let entry = HistoryEntry::new(word, self.state.pending_clue.clue().clone());
        entry.validate()?;

        tracing::info!(word = %entry.word(), clue = %entry.clue(), turn = self.state.history.len() + 1, "turn submitted");

        if entry.clue().is_all_correct() {
            self.state.history.append(entry)?;
            self.state.phase = Phase::Won;
            self.state.error_message = None;
            tracing::info!(turns = self.state.history.len(), "puzzle solved");
            return Ok(SubmitOutcome::Won);
        }

        self.state.phase = Phase::Submitting;
        let history = self.state.history.with_pending(&entry);
        Ok(SubmitOutcome::Request(
            self.issue(InFlight::Turn(entry), history),
        ))
    }

    /// Ask for the first suggestion again after it failed
    ///
    /// # Errors
    /// Fails unless the session is `Errored`.
    pub fn retry_initialization(&mut self) -> Result<PendingRequest, SessionError> {
        self.require(Phase::Errored, "retry initialization")?;
        self.state.phase = Phase::Initializing;
        tracing::info!("retrying initial suggestion");
        Ok(self.issue(InFlight::Initial, Vec::new()))
    }

    /// Apply the outcome of a solver request
    ///
    /// # Errors
    /// Returns `InvariantViolation` if the submitted entry cannot be recorded;
    /// the turn is then discarded and the session returns to `Ready`.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<Word, GatewayError>,
    ) -> Result<Resolution, SessionError> {
        let in_flight = match self.in_flight.take() {
            Some((outstanding, in_flight)) if outstanding == ticket => in_flight,
            other => {
                self.in_flight = other;
                tracing::warn!(?ticket, "discarding stale solver response");
                return Ok(Resolution::Stale);
            }
        };

        match (in_flight, result) {
            (InFlight::Initial, Ok(word)) => {
                tracing::info!(guess = %word, "initial suggestion received");
                self.accept_suggestion(word.clone());
                Ok(Resolution::Suggested(word))
            }
            (InFlight::Initial, Err(e)) => {
                tracing::warn!(error = %e, "initial suggestion failed");
                self.state.error_message = Some(format!("Failed to fetch initial word. {e}"));
                self.state.phase = Phase::Errored;
                Ok(Resolution::Failed(e))
            }
            (InFlight::Turn(entry), Ok(word)) => {
                if let Err(violation) = self.state.history.append(entry) {
                    self.state.phase = Phase::Ready;
                    return Err(violation.into());
                }
                tracing::info!(guess = %word, turns = self.state.history.len(), "next suggestion received");
                self.accept_suggestion(word.clone());
                Ok(Resolution::Suggested(word))
            }
            (InFlight::Turn(_), Err(e)) => {
                // Failed turn is dropped; the pending clue stays for resubmission
                tracing::warn!(error = %e, "next suggestion failed");
                self.state.error_message = Some(format!("Failed to fetch next word. {e}"));
                self.state.phase = Phase::Ready;
                Ok(Resolution::Failed(e))
            }
        }
    }

    /// Submit and resolve inline against `gateway`
    ///
    /// # Errors
    /// Same as `submit` and `resolve`.
    pub fn submit_with<G: SolverGateway + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Result<TurnOutcome, SessionError> {
        match self.submit()? {
            SubmitOutcome::Won => Ok(TurnOutcome::Won),
            SubmitOutcome::Request(request) => {
                let result = request.send(gateway);
                self.resolve(request.ticket(), result)
                    .map(TurnOutcome::Resolved)
            }
        }
    }

    /// Retry initialization and resolve inline against `gateway`
    ///
    /// # Errors
    /// Fails unless the session is `Errored`.
    pub fn retry_with<G: SolverGateway + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Result<Resolution, SessionError> {
        let request = self.retry_initialization()?;
        let result = request.send(gateway);
        self.resolve(request.ticket(), result)
    }

    fn dispatch<G: SolverGateway + ?Sized>(&mut self, gateway: &G, request: &PendingRequest) {
        let result = request.send(gateway);
        // Initial requests never carry an entry, so resolving cannot fail
        if let Err(e) = self.resolve(request.ticket(), result) {
            tracing::error!(error = %e, "unexpected failure resolving initial request");
        }
    }

    fn issue(&mut self, in_flight: InFlight, history: Vec<HistoryEntry>) -> PendingRequest {
        self.last_ticket += 1;
        let ticket = RequestTicket(self.last_ticket);
        let kind = match in_flight {
            InFlight::Initial => RequestKind::Initial,
            InFlight::Turn(_) => RequestKind::Turn,
        };
        tracing::debug!(?ticket, ?kind, turns = history.len(), "issuing solver request");
        self.in_flight = Some((ticket, in_flight));
        PendingRequest {
            ticket,
            kind,
            history,
        }
    }

    fn accept_suggestion(&mut self, word: Word) {
        self.state.pending_clue.reset(word.len());
        self.state.current_word = Some(word);
        self.state.error_message = None;
        self.state.phase = Phase::Ready;
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), SessionError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(SessionError::NotAllowed {
                action,
                phase: self.state.phase,
            })
        }
    }
}

impl Toggleable for SessionController {
    fn toggle_at(&mut self, position: usize) -> Result<(), SessionError> {
        self.toggle_clue_at(position).map(|_| ())
    }
}
