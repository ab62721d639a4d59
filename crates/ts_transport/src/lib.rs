//! Transports delivering the raw text fragments of a streamed reply.
//!
//! Every transport yields a [`FragmentStream`]: one item per server-sent
//! event, in arrival order. Events are passed on verbatim, including any
//! `data:` prefix, which is stripped later on during normalization.

pub mod codec;
pub mod error;
pub mod http;
pub mod reader;

use std::pin::Pin;

use async_stream::stream;
use futures::{Stream, StreamExt as _};
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{debug, error, trace};

pub use crate::{
    codec::EventCodec,
    error::{Error, Result},
    http::{HttpTransport, Request},
    reader::fragments,
};

/// An ordered stream of raw text fragments.
///
/// The stream ends after the first error.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Frame `reader` into events.
pub(crate) fn framed<R>(reader: R) -> FragmentStream
where
    R: AsyncRead + Send + 'static,
{
    Box::pin(stream! {
        let events = FramedRead::new(reader, EventCodec::new());
        tokio::pin!(events);

        let mut count = 0_usize;
        while let Some(event) = events.next().await {
            match event {
                Ok(event) => {
                    count += 1;
                    trace!(index = count, len = event.len(), "Received event.");
                    yield Ok(event);
                }
                Err(error) => {
                    error!(%error, events = count, "Event stream failed.");
                    yield Err(error);
                    break;
                }
            }
        }

        debug!(events = count, "Event stream ended.");
    })
}
