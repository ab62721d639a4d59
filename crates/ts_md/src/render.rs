//! Rendering of a whole message.

use crossterm::style::{Color, Stylize as _};
use ts_conversation::Message;

use crate::format::{Formatter, Target};

/// Foreground color of reasoning text in the terminal.
const REASONING_COLOR: Color = Color::AnsiValue(238);

impl Formatter {
    /// Render a message: the reasoning block (if any, and if enabled),
    /// followed by the answer.
    ///
    /// While `in_progress`, the cursor trails the answer.
    #[must_use]
    pub fn render_message(&self, message: &Message, target: Target, in_progress: bool) -> String {
        let answer = self.format(&message.answer_text, target, in_progress);
        let reasoning = message
            .reasoning()
            .filter(|_| self.show_reasoning)
            .map(|text| self.format(text, target, false));

        let Some(reasoning) = reasoning else {
            return match target {
                Target::Html => format!("<div class=\"reply-content\">{answer}</div>"),
                Target::Terminal | Target::Plain => answer,
            };
        };

        match target {
            Target::Html => format!(
                "<div class=\"think-block\"><div class=\"think-content\">{reasoning}</div></div>\
                 <hr>\
                 <div class=\"main-content\"><div class=\"reply-content\">{answer}</div></div>"
            ),
            Target::Terminal => format!("{}\n\n{answer}", reasoning.with(REASONING_COLOR)),
            Target::Plain => format!("{reasoning}\n\n{answer}"),
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
