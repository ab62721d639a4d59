//! Inline markup conversion.

use crate::ansi;

/// The glyph appended to text that is still streaming in.
pub const CURSOR: &str = "▎";

/// What the formatted text is meant for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Target {
    /// HTML tags.
    Html,

    /// ANSI escape sequences.
    #[default]
    Terminal,

    /// The text as-is.
    Plain,
}

/// An inline style. Styles are applied one pass at a time, in the order of
/// [`Style::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Strong,
    Emphasis,
    Strikethrough,
    Code,
}

impl Style {
    const ALL: [Self; 4] = [Self::Strong, Self::Emphasis, Self::Strikethrough, Self::Code];

    const fn delimiter(self) -> &'static str {
        match self {
            Self::Strong => "**",
            Self::Emphasis => "*",
            Self::Strikethrough => "~~",
            Self::Code => "`",
        }
    }

    /// The opening and closing sequence for this style, if the target has
    /// any.
    const fn wrap(self, target: Target) -> Option<(&'static str, &'static str)> {
        let pair = match (target, self) {
            (Target::Plain, _) => return None,
            (Target::Html, Self::Strong) => ("<strong>", "</strong>"),
            (Target::Html, Self::Emphasis) => ("<em>", "</em>"),
            (Target::Html, Self::Strikethrough) => ("<del>", "</del>"),
            (Target::Html, Self::Code) => ("<code>", "</code>"),
            (Target::Terminal, Self::Strong) => (ansi::BOLD_START, ansi::BOLD_END),
            (Target::Terminal, Self::Emphasis) => (ansi::ITALIC_START, ansi::ITALIC_END),
            (Target::Terminal, Self::Strikethrough) => {
                (ansi::STRIKETHROUGH_START, ansi::STRIKETHROUGH_END)
            }
            (Target::Terminal, Self::Code) => (ansi::REVERSE_START, ansi::REVERSE_END),
        };

        Some(pair)
    }
}

/// A stateless formatter for message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    /// Appended to text that is still streaming in.
    pub(crate) cursor: String,

    /// Escape `&`, `<` and `>` before adding HTML tags.
    pub(crate) escape_html: bool,

    /// Render the reasoning block of a message, if it has one.
    pub(crate) show_reasoning: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            cursor: CURSOR.to_owned(),
            escape_html: false,
            show_reasoning: true,
        }
    }
}

impl Formatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    #[must_use]
    pub const fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    #[must_use]
    pub const fn with_show_reasoning(mut self, show: bool) -> Self {
        self.show_reasoning = show;
        self
    }

    /// Convert the inline markup in `text` for `target`.
    ///
    /// Each style matches the shortest span between two of its delimiters on
    /// a single line. Delimiters without a match are kept as-is.
    ///
    /// The cursor is added when `in_progress` is set. It is a display
    /// concern only, and never part of the stored text.
    #[must_use]
    pub fn format(&self, text: &str, target: Target, in_progress: bool) -> String {
        let mut out = match target {
            Target::Html if self.escape_html => escape_html(text),
            _ => text.to_owned(),
        };

        for style in Style::ALL {
            if let Some((open, close)) = style.wrap(target) {
                out = replace_spans(&out, style.delimiter(), open, close);
            }
        }

        if in_progress {
            out.push_str(&self.cursor);
        }

        out
    }
}

/// Replace every `delimiter`-enclosed span in `text`, left to right.
fn replace_spans(text: &str, delimiter: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(delimiter) {
            let line = after.split('\n').next().unwrap_or_default();
            if let Some(end) = line.find(delimiter) {
                out.push_str(open);
                out.push_str(&after[..end]);
                out.push_str(close);
                rest = &after[end + delimiter.len()..];
                continue;
            }
        }

        // Not the start of a span, move on by a single character.
        let mut chars = rest.chars();
        out.extend(chars.next());
        rest = chars.as_str();
    }

    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
