//! Server-sent event framing.

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::error::{Error, Result};

/// Event separators, longest first.
const SEPARATORS: &[&[u8]] = &[b"\r\n\r\n", b"\n\n"];

/// The length of the longest separator.
const MAX_SEPARATOR_LEN: usize = 4;

/// Splits a byte stream into events on blank lines.
///
/// Each event is yielded verbatim, without its separator, as a UTF-8 string.
/// Separators are plain ASCII, so a multi-byte character split across reads
/// is only decoded once the whole event has arrived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCodec {
    /// Where to resume the separator search in the buffer.
    next_index: usize,
}

impl EventCodec {
    #[must_use]
    pub const fn new() -> Self {
        Self { next_index: 0 }
    }
}

impl Decoder for EventCodec {
    type Error = Error;
    type Item = String;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>> {
        loop {
            let Some((start, len)) = find_separator(buf, self.next_index) else {
                // Keep enough bytes to complete a separator on the next read.
                self.next_index = buf.len().saturating_sub(MAX_SEPARATOR_LEN - 1);
                return Ok(None);
            };

            let mut event = buf.split_to(start + len);
            event.truncate(start);
            self.next_index = 0;

            if event.is_empty() {
                trace!("Skipping empty event.");
                continue;
            }

            return String::from_utf8(event.to_vec()).map(Some).map_err(Into::into);
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>> {
        if let Some(event) = self.decode(buf)? {
            return Ok(Some(event));
        }

        self.next_index = 0;
        if buf.is_empty() {
            return Ok(None);
        }

        let rest = buf.split();
        trace!(len = rest.len(), "Emitting unterminated trailing event.");

        String::from_utf8(rest.to_vec()).map(Some).map_err(Into::into)
    }
}

/// Find the first separator at or after `from`, returning its position and
/// length.
fn find_separator(buf: &[u8], from: usize) -> Option<(usize, usize)> {
    (from..buf.len()).find_map(|index| {
        SEPARATORS
            .iter()
            .find(|separator| buf[index..].starts_with(separator))
            .map(|separator| (index, separator.len()))
    })
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
