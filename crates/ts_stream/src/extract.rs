//! Splitting a single fragment into reasoning and answer text.

use tracing::trace;

use crate::{marker::Markers, state::Mode};

/// Which rule classified a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Both an opening and a closing marker were found.
    Paired,

    /// Only an opening marker was found.
    Opening,

    /// Only a closing marker was found.
    Closing,

    /// No marker, and the turn is inside a reasoning span.
    ContinueReasoning,

    /// No marker, and the turn is outside any reasoning span.
    ContinueAnswer,
}

/// The classification of a single fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Text to append to the reasoning, possibly empty.
    pub reasoning: String,

    /// Text to append to the answer, possibly empty.
    pub answer: String,

    /// The mode after this fragment.
    pub mode: Mode,

    /// Which rule classified the fragment.
    pub case: Case,
}

/// Classifies fragments using a pair of [`Markers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extractor {
    markers: Markers,
}

impl Extractor {
    #[must_use]
    pub const fn new(markers: Markers) -> Self {
        Self { markers }
    }

    #[must_use]
    pub const fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Split `fragment` into its reasoning and answer parts.
    ///
    /// `prior_reasoning` is the reasoning accumulated so far in this turn. It
    /// is context for diagnostics only and does not influence the split.
    #[must_use]
    pub fn extract(
        &self,
        fragment: &str,
        prior_reasoning: &str,
        currently_in_reasoning: bool,
    ) -> ExtractionResult {
        let Markers { open, close } = &self.markers;
        let mode = Mode::from_in_reasoning(currently_in_reasoning);

        let has_open = fragment.contains(open.as_str());
        let has_close = fragment.contains(close.as_str());

        let result = match (has_open, has_close) {
            (true, true) => self.split_pairs(fragment, mode),
            (true, false) => {
                let (answer, reasoning) = fragment.split_once(open.as_str()).unwrap_or_default();
                classified(reasoning, answer, Mode::Reasoning, Case::Opening)
            }
            (false, true) => {
                let (reasoning, answer) = fragment.split_once(close.as_str()).unwrap_or_default();
                classified(reasoning, answer, Mode::Answer, Case::Closing)
            }
            (false, false) if currently_in_reasoning => {
                classified(fragment, "", Mode::Reasoning, Case::ContinueReasoning)
            }
            (false, false) => classified("", fragment, Mode::Answer, Case::ContinueAnswer),
        };

        trace!(
            case = ?result.case,
            from = %mode,
            to = %result.mode,
            prior_reasoning_len = prior_reasoning.len(),
            reasoning = ?result.reasoning,
            answer = ?result.answer,
            "Classified fragment."
        );

        result
    }

    /// Scan left to right, alternating between looking for an opening marker
    /// (in answer mode) and a closing marker (in reasoning mode).
    ///
    /// In answer mode, a closing marker that precedes any opening marker is
    /// not part of a pair, and is kept as literal answer text. Likewise, in
    /// reasoning mode an opening marker is literal reasoning text.
    fn split_pairs(&self, fragment: &str, mut mode: Mode) -> ExtractionResult {
        let Markers { open, close } = &self.markers;

        let mut reasoning = String::new();
        let mut answer = String::new();
        let mut rest = fragment;

        loop {
            let (marker, buf) = match mode {
                Mode::Answer => (open, &mut answer),
                Mode::Reasoning => (close, &mut reasoning),
            };

            let Some((before, after)) = rest.split_once(marker.as_str()) else {
                buf.push_str(rest);
                break;
            };

            buf.push_str(before);
            rest = after;
            mode = match mode {
                Mode::Answer => Mode::Reasoning,
                Mode::Reasoning => Mode::Answer,
            };
        }

        ExtractionResult {
            reasoning,
            answer,
            mode,
            case: Case::Paired,
        }
    }
}

/// Classify `fragment` using the default `<think>` markers.
#[must_use]
pub fn extract(
    fragment: &str,
    prior_reasoning: &str,
    currently_in_reasoning: bool,
) -> ExtractionResult {
    Extractor::default().extract(fragment, prior_reasoning, currently_in_reasoning)
}

fn classified(reasoning: &str, answer: &str, mode: Mode, case: Case) -> ExtractionResult {
    ExtractionResult {
        reasoning: reasoning.to_owned(),
        answer: answer.to_owned(),
        mode,
        case,
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
