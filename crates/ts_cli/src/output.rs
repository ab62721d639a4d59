//! Writing a turn to the terminal.

use std::io::{self, Write};

use crossterm::style::Stylize as _;
use ts_conversation::Message;
use ts_md::{Formatter, Target};
use ts_stream::{Delta, TurnOutcome};

/// How a turn is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Print text as it streams in, with dimmed reasoning.
    #[default]
    Live,

    /// Print the finished message with terminal styling.
    Terminal,

    /// Print the finished message as HTML.
    Html,

    /// Print the finished message as JSON.
    Json,
}

/// The part of a message that was printed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Reasoning,
    Answer,
}

/// Prints the deltas and the final message of a turn.
pub(crate) struct Printer<W> {
    out: W,
    format: Format,

    /// Use terminal styling for live output.
    styled: bool,
    show_reasoning: bool,
    section: Option<Section>,
}

impl<W: Write> Printer<W> {
    pub(crate) fn new(out: W, format: Format) -> Self {
        Self {
            out,
            format,
            styled: false,
            show_reasoning: true,
            section: None,
        }
    }

    pub(crate) fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub(crate) fn with_show_reasoning(mut self, show: bool) -> Self {
        self.show_reasoning = show;
        self
    }

    /// Print a delta, if the output is live.
    pub(crate) fn delta(&mut self, delta: &Delta) -> io::Result<()> {
        if self.format != Format::Live {
            return Ok(());
        }

        if self.show_reasoning && !delta.reasoning.is_empty() {
            self.enter(Section::Reasoning)?;
            if self.styled {
                write!(self.out, "{}", delta.reasoning.as_str().dim())?;
            } else {
                write!(self.out, "{}", delta.reasoning)?;
            }
        }

        if !delta.answer.is_empty() {
            self.enter(Section::Answer)?;
            write!(self.out, "{}", delta.answer)?;
        }

        self.out.flush()
    }

    /// Print the message as it stands at the end of the turn.
    ///
    /// A message of a turn that did not complete is rendered with the cursor,
    /// marking it as unfinished.
    pub(crate) fn finish<E>(
        &mut self,
        message: &Message,
        formatter: &Formatter,
        outcome: &TurnOutcome<E>,
    ) -> io::Result<()> {
        let in_progress = !outcome.is_completed();

        match self.format {
            Format::Live if self.section.is_some() => writeln!(self.out)?,
            Format::Live => {}
            Format::Terminal => {
                let text = formatter.render_message(message, Target::Terminal, in_progress);
                writeln!(self.out, "{text}")?;
            }
            Format::Html => {
                let text = formatter.render_message(message, Target::Html, in_progress);
                writeln!(self.out, "{text}")?;
            }
            Format::Json => {
                let value = serde_json::json!({
                    "outcome": outcome_name(outcome),
                    "message": message,
                });

                serde_json::to_writer_pretty(&mut self.out, &value)?;
                writeln!(self.out)?;
            }
        }

        self.out.flush()
    }

    /// Switch to `section`, separating it from the previous one.
    fn enter(&mut self, section: Section) -> io::Result<()> {
        if self.section.is_some_and(|current| current != section) {
            write!(self.out, "\n\n")?;
        }

        self.section = Some(section);
        Ok(())
    }
}

const fn outcome_name<E>(outcome: &TurnOutcome<E>) -> &'static str {
    match outcome {
        TurnOutcome::Completed => "completed",
        TurnOutcome::Failed(_) => "failed",
        TurnOutcome::Cancelled => "cancelled",
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
