use std::io::Write;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use ts_config::Config;
use ts_conversation::Conversation;
use ts_md::Formatter;
use ts_stream::{Accumulator, Extractor, Markers, Normalizer, Turn, TurnOutcome};
use ts_transport::FragmentStream;

use crate::{
    error::{Error, Result},
    output::{Format, Printer},
};

/// Everything a command needs to run a turn.
pub(crate) struct Ctx {
    pub(crate) config: Config,
    pub(crate) cancel: CancellationToken,
    accumulator: Accumulator,
    formatter: Formatter,
    format: Format,
    styled: bool,
}

impl Ctx {
    pub(crate) fn new(config: Config, format: Format) -> Self {
        let stream = &config.stream;
        let normalizer = Normalizer::new()
            .with_prefix(stream.stream_prefix.clone())
            .with_max_decode_passes(stream.max_decode_passes);
        let extractor = Extractor::new(Markers::new(
            stream.open_marker.clone(),
            stream.close_marker.clone(),
        ));
        let accumulator =
            Accumulator::new(normalizer, extractor).with_keep_line_breaks(stream.keep_line_breaks);

        let style = &config.style;
        let formatter = Formatter::new()
            .with_cursor(style.cursor.clone())
            .with_escape_html(style.escape_html)
            .with_show_reasoning(style.show_reasoning);

        Self {
            config,
            cancel: CancellationToken::new(),
            accumulator,
            formatter,
            format,
            styled: false,
        }
    }

    /// Style live output for a terminal.
    pub(crate) fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Stream `fragments` into a new assistant message of `conversation`,
    /// printing it to `out`.
    ///
    /// The message is printed even if the turn fails or is cancelled.
    pub(crate) async fn stream_turn<W: Write>(
        &self,
        conversation: &mut Conversation,
        fragments: FragmentStream,
        out: W,
    ) -> Result<()> {
        let mut printer = Printer::new(out, self.format)
            .with_styling(self.styled)
            .with_show_reasoning(self.config.style.show_reasoning);

        let mut write_error = None;
        let outcome = Turn::new(&self.accumulator)
            .with_cancellation(self.cancel.clone())
            .drive(conversation, fragments, |_, delta| {
                if write_error.is_none()
                    && let Err(error) = printer.delta(delta)
                {
                    write_error = Some(error);
                }
            })
            .await;

        if let Some(error) = write_error {
            return Err(error.into());
        }

        if let Some(message) = conversation.last() {
            debug!(
                answer_len = message.answer_text.len(),
                reasoning_len = message.reasoning().map_or(0, str::len),
                "Printing message."
            );

            printer.finish(message, &self.formatter, &outcome)?;
        }

        match outcome {
            TurnOutcome::Completed => Ok(()),
            TurnOutcome::Failed(error) => Err(error.into()),
            TurnOutcome::Cancelled => Err(Error::Cancelled),
        }
    }
}

#[cfg(test)]
#[path = "ctx_tests.rs"]
mod tests;
