//! HTTP solver gateway
//!
//! Posts the history as a JSON array to the solver endpoint and reads back
//! `{"guess": "..."}`. Uses the blocking reqwest client, so calls must run off
//! any async runtime; the TUI runs them on a worker thread.

use super::{GatewayError, SolverGateway, SolverResponse, request_body};
use crate::core::{HistoryEntry, Word};
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;

/// Longest error body kept in a `GatewayError::Status`
const MAX_ERROR_BODY: usize = 200;

pub struct HttpGateway {
    client: Client,
    endpoint: Url,
}

impl HttpGateway {
    /// Build a gateway for `endpoint` with a per-request timeout
    ///
    /// # Errors
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl SolverGateway for HttpGateway {
    fn suggest(&self, history: &[HistoryEntry]) -> Result<Word, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, turns = history.len(), "requesting suggestion");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request_body(history))
            .send()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            tracing::warn!(status = status.as_u16(), "solver returned error status");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: SolverResponse = response
            .json()
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;

        let word = reply.into_word()?;
        tracing::debug!(guess = %word, "solver suggested");
        Ok(word)
    }
}
