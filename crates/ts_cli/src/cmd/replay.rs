use std::io;

use camino::Utf8PathBuf;
use ts_conversation::Conversation;

use crate::{ctx::Ctx, error::Result};

#[derive(Debug, clap::Args)]
pub(crate) struct Replay {
    /// A recorded response body. Read from stdin if omitted.
    path: Option<Utf8PathBuf>,
}

impl Replay {
    pub(crate) async fn run(self, ctx: &Ctx) -> Result<()> {
        let fragments = match &self.path {
            Some(path) => ts_transport::reader::open(path).await?,
            None => ts_transport::fragments(tokio::io::stdin()),
        };

        let mut conversation = Conversation::new(ctx.config.transport.conversation_id.clone());
        ctx.stream_turn(&mut conversation, fragments, io::stdout())
            .await
    }
}
