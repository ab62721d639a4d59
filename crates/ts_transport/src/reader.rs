//! Fragments read from recorded event streams.

use camino::Utf8Path;
use tokio::io::AsyncRead;
use tracing::debug;

use crate::{FragmentStream, error::Result, framed};

/// Frame any reader into fragments.
///
/// This is used to replay a recorded response body, exactly as it was
/// received from the server.
pub fn fragments<R>(reader: R) -> FragmentStream
where
    R: AsyncRead + Send + 'static,
{
    framed(reader)
}

/// Open a recorded response body at `path`.
pub async fn open(path: &Utf8Path) -> Result<FragmentStream> {
    let file = tokio::fs::File::open(path).await?;
    debug!(path = %path, "Replaying recorded event stream.");

    Ok(fragments(file))
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
