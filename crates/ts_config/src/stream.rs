//! Stream splitting configuration.

use serde::{Deserialize, Serialize};

use crate::{
    assignment::{AssignKeyValue, KvAssignment, missing_key},
    error::Result,
};

/// How incoming text is normalized and split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    /// The literal that opens a reasoning span.
    pub open_marker: String,

    /// The literal that closes a reasoning span.
    pub close_marker: String,

    /// Redundant stream prefix removed from incoming text. Empty disables
    /// removal.
    pub stream_prefix: String,

    /// Upper bound on entity decode passes per fragment.
    pub max_decode_passes: usize,

    /// Keep line breaks in answer text.
    pub keep_line_breaks: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            open_marker: "<think>".to_owned(),
            close_marker: "</think>".to_owned(),
            stream_prefix: "data:".to_owned(),
            max_decode_passes: 5,
            keep_line_breaks: false,
        }
    }
}

impl AssignKeyValue for StreamConfig {
    fn assign(&mut self, kv: KvAssignment) -> Result<()> {
        match kv.key_string() {
            "open_marker" => self.open_marker = kv.into_string(),
            "close_marker" => self.close_marker = kv.into_string(),
            "stream_prefix" => self.stream_prefix = kv.into_string(),
            "max_decode_passes" => self.max_decode_passes = kv.try_parse()?,
            "keep_line_breaks" => self.keep_line_breaks = kv.try_bool()?,
            _ => {
                return missing_key(&kv, &[
                    "stream.open_marker",
                    "stream.close_marker",
                    "stream.stream_prefix",
                    "stream.max_decode_passes",
                    "stream.keep_line_breaks",
                ]);
            }
        }

        Ok(())
    }
}
