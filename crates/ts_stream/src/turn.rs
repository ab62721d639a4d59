//! Driving a single assistant turn from a stream of fragments.

use std::fmt;

use futures::{Stream, StreamExt as _};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};
use ts_conversation::{Conversation, Message};

use crate::{
    accumulator::{Accumulator, Delta},
    state::StreamState,
};

/// How a turn ended.
#[derive(Debug, PartialEq, Eq)]
pub enum TurnOutcome<E> {
    /// The fragment stream ended, and all text was applied.
    Completed,

    /// The fragment stream yielded an error. The partial message is kept.
    Failed(E),

    /// The turn was cancelled. The partial message is kept.
    Cancelled,
}

impl<E> TurnOutcome<E> {
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Runs one assistant turn.
///
/// Each turn appends a new assistant message to the conversation, and streams
/// into it with its own fresh [`StreamState`].
#[derive(Debug, Clone)]
pub struct Turn<'a> {
    accumulator: &'a Accumulator,
    cancel: CancellationToken,
}

impl<'a> Turn<'a> {
    #[must_use]
    pub fn new(accumulator: &'a Accumulator) -> Self {
        Self {
            accumulator,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop the turn once `cancel` fires.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Consume `fragments` in order, until the stream ends, fails or the turn
    /// is cancelled.
    ///
    /// `on_delta` is called with the updated message for every fragment that
    /// changed it.
    pub async fn drive<S, E, F>(
        &self,
        conversation: &mut Conversation,
        fragments: S,
        mut on_delta: F,
    ) -> TurnOutcome<E>
    where
        S: Stream<Item = Result<String, E>>,
        E: fmt::Display,
        F: FnMut(&Message, &Delta),
    {
        let (index, message) = conversation.begin_turn();
        let mut state = StreamState::new();
        let mut fragments = std::pin::pin!(fragments);
        let mut count = 0_usize;

        let outcome = loop {
            let fragment = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break TurnOutcome::Cancelled,
                fragment = fragments.next() => fragment,
            };

            match fragment {
                None => break TurnOutcome::Completed,
                Some(Err(error)) => {
                    error!(%error, index, fragments = count, "Fragment stream failed.");
                    break TurnOutcome::Failed(error);
                }
                Some(Ok(raw)) => {
                    count += 1;
                    trace!(index, fragment = count, raw = ?raw, "Received fragment.");

                    let delta = self.accumulator.apply_chunk(&mut state, message, &raw);
                    if !delta.is_empty() {
                        on_delta(message, &delta);
                    }
                }
            }
        };

        // Held back text belongs to the partial message on every outcome.
        let delta = self.accumulator.finish(&mut state, message);
        if !delta.is_empty() {
            on_delta(message, &delta);
        }

        debug!(
            index,
            fragments = count,
            mode = %state.mode(),
            completed = outcome.is_completed(),
            "Turn ended."
        );

        outcome
    }
}

#[cfg(test)]
#[path = "turn_tests.rs"]
mod tests;
