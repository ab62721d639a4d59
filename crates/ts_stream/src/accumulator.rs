//! Folding classified fragments into the message of the current turn.

use std::mem;

use tracing::{debug, trace};
use ts_conversation::Message;

use crate::{
    extract::Extractor,
    normalize::{ENTITIES, Normalizer},
    state::StreamState,
};

/// The text a single call actually appended to the message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Delta {
    pub reasoning: String,
    pub answer: String,
}

impl Delta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reasoning.is_empty() && self.answer.is_empty()
    }
}

/// Applies raw stream fragments to a [`Message`].
///
/// The accumulator itself holds configuration only; all per-turn state lives
/// in the [`StreamState`] passed to each call.
#[derive(Debug, Clone)]
pub struct Accumulator {
    normalizer: Normalizer,
    extractor: Extractor,

    /// Keep `\n` and `\r` in answer text, instead of dropping them with the
    /// other control characters.
    keep_line_breaks: bool,

    /// Tokens that must not be classified while only partially received.
    watched: Vec<String>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new(Normalizer::default(), Extractor::default())
    }
}

impl Accumulator {
    #[must_use]
    pub fn new(normalizer: Normalizer, extractor: Extractor) -> Self {
        let markers = extractor.markers();
        let watched = [markers.open.as_str(), markers.close.as_str(), normalizer.prefix()]
            .into_iter()
            .chain(ENTITIES.iter().map(|(from, _)| *from))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            normalizer,
            extractor,
            keep_line_breaks: false,
            watched,
        }
    }

    #[must_use]
    pub const fn with_keep_line_breaks(mut self, keep: bool) -> Self {
        self.keep_line_breaks = keep;
        self
    }

    /// Apply a newly arrived fragment.
    ///
    /// Any trailing text that could still combine with what follows into a
    /// marker, entity or stream prefix is held back raw in `state`, and
    /// normalized together with the next fragment, or by
    /// [`Accumulator::finish`].
    pub fn apply_chunk(&self, state: &mut StreamState, message: &mut Message, raw: &str) -> Delta {
        let mut text = mem::take(&mut state.pending);
        text.push_str(raw);

        let end = self.release_len(&text);
        state.pending = text.split_off(end);

        if !state.pending.is_empty() {
            trace!(pending = ?state.pending, "Holding back possible partial token.");
        }

        let ready = self.normalizer.normalize(&text);
        self.apply_normalized(state, message, &ready)
    }

    /// Classify whatever is still held back, at the end of the stream.
    pub fn finish(&self, state: &mut StreamState, message: &mut Message) -> Delta {
        let pending = mem::take(&mut state.pending);
        if pending.is_empty() {
            return Delta::default();
        }

        trace!(pending = ?pending, "Flushing held back text.");
        let text = self.normalizer.normalize(&pending);
        self.apply_normalized(state, message, &text)
    }

    fn apply_normalized(&self, state: &mut StreamState, message: &mut Message, text: &str) -> Delta {
        if text.is_empty() {
            return Delta::default();
        }

        let result = self.extractor.extract(
            text,
            &state.accumulated_reasoning,
            state.mode.is_reasoning(),
        );

        if result.mode != state.mode {
            debug!(from = %state.mode, to = %result.mode, case = ?result.case, "Switched mode.");
        }

        state.accumulated_reasoning.push_str(&result.reasoning);
        message.push_reasoning(&result.reasoning);

        let answer = self.filter_controls(&result.answer);
        message.push_answer(&answer);

        state.mode = result.mode;

        Delta {
            reasoning: result.reasoning,
            answer,
        }
    }

    /// Drop C0 and C1 control characters, keeping everything else.
    fn filter_controls(&self, text: &str) -> String {
        text.chars()
            .filter(|&c| !c.is_control() || (self.keep_line_breaks && matches!(c, '\n' | '\r')))
            .collect()
    }

    /// Length of the longest prefix of `text` that normalizes the same no
    /// matter what follows it.
    ///
    /// That holds when neither the raw prefix nor any intermediate text of
    /// its normalization ends in a partial watched token. Intermediate texts
    /// matter because a decoded entity can complete a marker before it
    /// (`</think&g`), or start a new entity (`&amp;lt;`).
    fn release_len(&self, text: &str) -> usize {
        let mut end = text.len();
        loop {
            end -= self.holdback_len(&text[..end]);

            let mut open = false;
            self.normalizer.inspect_steps(&text[..end], &mut |step: &str| {
                open |= self.partial_len(step) > 0;
            });
            if !open {
                return end;
            }

            end = text[..end].char_indices().next_back().map_or(0, |(i, _)| i);
        }
    }

    /// Length of the trailing run of `text` made up of partial watched tokens.
    fn holdback_len(&self, text: &str) -> usize {
        let mut end = text.len();
        loop {
            let hold = self.partial_len(&text[..end]);
            if hold == 0 {
                return text.len() - end;
            }

            end -= hold;
        }
    }

    /// Length of the longest partial watched token `text` ends with.
    fn partial_len(&self, text: &str) -> usize {
        self.watched
            .iter()
            .map(|token| partial_suffix_len(text, token))
            .max()
            .unwrap_or(0)
    }
}

/// Apply `raw` using the default configuration.
pub fn apply_chunk(state: &mut StreamState, message: &mut Message, raw: &str) -> Delta {
    Accumulator::default().apply_chunk(state, message, raw)
}

/// Flush held back text using the default configuration.
pub fn finish(state: &mut StreamState, message: &mut Message) -> Delta {
    Accumulator::default().finish(state, message)
}

fn partial_suffix_len(text: &str, token: &str) -> usize {
    (1..token.len())
        .rev()
        .filter(|&len| token.is_char_boundary(len))
        .find(|&len| text.ends_with(&token[..len]))
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "accumulator_tests.rs"]
mod tests;
