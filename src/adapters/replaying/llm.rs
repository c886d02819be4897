//! Replaying adapter for the `LlmClient` port.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::cassette::{Cassette, Outcome};
use crate::ports::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient, PortError};

/// Serves canned completions in order and keeps every request it received.
///
/// Once the queue is empty each further call fails, which the AI path treats
/// like any other backend failure.
pub struct ReplayingLlmClient {
    outcomes: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ReplayingLlmClient {
    /// Replays the exchanges of a recorded cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self::from_outcomes(cassette.exchanges.iter().map(|e| e.outcome.clone()))
    }

    /// Replays plain reply texts (`Ok`) or failure messages (`Err`).
    #[must_use]
    pub fn from_replies(replies: Vec<Result<String, String>>) -> Self {
        Self::from_outcomes(replies.into_iter().map(|reply| match reply {
            Ok(text) => {
                Outcome::Reply(CompletionResponse { text, prompt_tokens: 0, completion_tokens: 0 })
            }
            Err(message) => Outcome::Failure(message),
        }))
    }

    fn from_outcomes(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into_iter().collect()), requests: Mutex::new(Vec::new()) }
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Outcomes not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl LlmClient for ReplayingLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());
        let next = self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
        let result: Result<CompletionResponse, PortError> = match next {
            Some(Outcome::Reply(response)) => Ok(response),
            Some(Outcome::Failure(message)) => Err(message.into()),
            None => Err("cassette exhausted: no recorded completion left".into()),
        };
        Box::pin(async move { result })
    }
}
