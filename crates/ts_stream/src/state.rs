use std::fmt;

/// Which channel incoming text is currently routed to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Inside a marker pair.
    Reasoning,

    /// Outside any marker pair.
    #[default]
    Answer,
}

impl Mode {
    #[must_use]
    pub const fn from_in_reasoning(in_reasoning: bool) -> Self {
        if in_reasoning {
            Self::Reasoning
        } else {
            Self::Answer
        }
    }

    #[must_use]
    pub const fn is_reasoning(self) -> bool {
        matches!(self, Self::Reasoning)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reasoning => f.write_str("reasoning"),
            Self::Answer => f.write_str("answer"),
        }
    }
}

/// Cross-fragment state of a single in-flight assistant message.
///
/// A new state is created for every turn, and dropped once the turn ends.
/// Nothing carries over between turns.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StreamState {
    pub(crate) mode: Mode,
    pub(crate) accumulated_reasoning: String,

    /// Raw text held back from the previous fragment, because it might still
    /// combine with the next one into a marker, entity or stream prefix.
    pub(crate) pending: String,
}

impl StreamState {
    /// A fresh state: answer mode, no reasoning, nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn accumulated_reasoning(&self) -> &str {
        &self.accumulated_reasoning
    }

    /// Text waiting for the next fragment before it can be classified.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }
}
