mod ask;
mod replay;

use crate::{ctx::Ctx, error::Result};

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Commands {
    /// Send a message and stream the reply.
    Ask(ask::Ask),

    /// Stream a recorded reply.
    Replay(replay::Replay),
}

impl Commands {
    pub(crate) async fn run(self, ctx: &Ctx) -> Result<()> {
        match self {
            Self::Ask(args) => args.run(ctx).await,
            Self::Replay(args) => args.run(ctx).await,
        }
    }

    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Ask(_) => "ask",
            Self::Replay(_) => "replay",
        }
    }
}
