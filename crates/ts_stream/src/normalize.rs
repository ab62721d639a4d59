//! Cleanup of transport artifacts before classification.
//!
//! Upstream servers tend to re-frame already framed events, leaving stray
//! `data:` prefixes anywhere in the text, and to HTML-escape the text one or
//! more times. Both are undone here, before any marker is looked for.

use tracing::{trace, warn};

/// The default stream prefix token.
pub const STREAM_PREFIX: &str = "data:";

/// The default maximum number of entity decode passes.
pub const MAX_DECODE_PASSES: usize = 5;

/// Garbled escape sequences and their literal replacement.
///
/// Applied in order within a single pass: multi-escaped sequences first, so
/// that they are not half-decoded by the single-escaped rules.
pub(crate) const ENTITIES: &[(&str, &str)] = &[
    (";amp;gt", ">"),
    (";amp;lt", "<"),
    (";amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Strips the stream prefix and decodes garbled entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    /// Literal token removed wherever it appears. Empty disables stripping.
    prefix: String,

    /// Upper bound on the number of decode passes.
    max_decode_passes: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            prefix: STREAM_PREFIX.to_owned(),
            max_decode_passes: MAX_DECODE_PASSES,
        }
    }
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the decode pass cap. A cap of zero is treated as one.
    #[must_use]
    pub fn with_max_decode_passes(mut self, passes: usize) -> Self {
        self.max_decode_passes = passes.max(1);
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Normalize a piece of raw stream text.
    ///
    /// Never fails: input that does not decode to a fixed point within the
    /// pass cap is returned as it stood after the last pass.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = self.strip_prefix(raw);
        self.decode(stripped)
    }

    /// Remove every occurrence of the stream prefix.
    ///
    /// Removing one occurrence can create another (`dadata:ta:`), so this
    /// loops until none is left. Each pass strictly shortens the text.
    #[must_use]
    pub fn strip_prefix(&self, raw: &str) -> String {
        let (text, passes) = self.strip_steps(raw, &mut |_: &str| {});
        if passes > 0 {
            trace!(passes, before = ?raw, after = ?text, "Removed stream prefix.");
        }

        text
    }

    /// Decode garbled entities until a fixed point or the pass cap.
    #[must_use]
    pub fn decode(&self, text: String) -> String {
        let before = text.clone();
        let (decoded, passes) = self.decode_steps(text, &mut |_: &str| {});
        if passes > 0 {
            trace!(passes, before = ?before, after = ?decoded, "Decoded entities.");
        }

        if passes == self.max_decode_passes && decode_pass(&decoded, &mut |_: &str| {}) != decoded {
            warn!(
                max_passes = self.max_decode_passes,
                text = ?decoded,
                "Entity decoding did not converge, keeping last result."
            );
        }

        decoded
    }

    /// Run normalization on `raw` without logging, showing `inspect` the raw
    /// text and every intermediate text along the way.
    pub(crate) fn inspect_steps(&self, raw: &str, inspect: &mut impl FnMut(&str)) {
        inspect(raw);
        let (stripped, _) = self.strip_steps(raw, inspect);
        self.decode_steps(stripped, inspect);
    }

    fn strip_steps(&self, raw: &str, inspect: &mut impl FnMut(&str)) -> (String, usize) {
        let mut text = raw.to_owned();
        if self.prefix.is_empty() {
            return (text, 0);
        }

        let mut passes = 0;
        while text.contains(&self.prefix) {
            text = text.split(self.prefix.as_str()).collect();
            inspect(&text);
            passes += 1;
        }

        (text, passes)
    }

    /// Returns the decoded text and the number of passes that changed it.
    fn decode_steps(&self, text: String, inspect: &mut impl FnMut(&str)) -> (String, usize) {
        let mut current = text;

        for pass in 0..self.max_decode_passes {
            let next = decode_pass(&current, inspect);
            if next == current {
                return (current, pass);
            }

            current = next;
        }

        (current, self.max_decode_passes)
    }
}

/// Normalize `raw` using the default prefix and pass cap.
#[must_use]
pub fn normalize(raw: &str) -> String {
    Normalizer::default().normalize(raw)
}

fn decode_pass(text: &str, inspect: &mut impl FnMut(&str)) -> String {
    if !text.contains(['&', ';']) {
        return text.to_owned();
    }

    ENTITIES.iter().fold(text.to_owned(), |acc, (from, to)| {
        let next = acc.replace(from, to);
        inspect(&next);
        next
    })
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
