//! Output style configuration.

use serde::{Deserialize, Serialize};

use crate::{
    assignment::{AssignKeyValue, KvAssignment, missing_key},
    error::Result,
};

/// How messages are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Render the reasoning of a message, if it has any.
    pub show_reasoning: bool,

    /// Glyph shown after text that is still streaming in.
    pub cursor: String,

    /// Escape HTML in message text before adding markup.
    pub escape_html: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            show_reasoning: true,
            cursor: "▎".to_owned(),
            escape_html: false,
        }
    }
}

impl AssignKeyValue for StyleConfig {
    fn assign(&mut self, kv: KvAssignment) -> Result<()> {
        match kv.key_string() {
            "show_reasoning" => self.show_reasoning = kv.try_bool()?,
            "cursor" => self.cursor = kv.into_string(),
            "escape_html" => self.escape_html = kv.try_bool()?,
            _ => {
                return missing_key(&kv, &[
                    "style.show_reasoning",
                    "style.cursor",
                    "style.escape_html",
                ]);
            }
        }

        Ok(())
    }
}
