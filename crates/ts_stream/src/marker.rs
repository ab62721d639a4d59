/// The default opening marker of a reasoning span.
pub const OPEN: &str = "<think>";

/// The default closing marker of a reasoning span.
pub const CLOSE: &str = "</think>";

/// The pair of literals that bound a reasoning span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Markers {
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(OPEN, CLOSE)
    }
}
