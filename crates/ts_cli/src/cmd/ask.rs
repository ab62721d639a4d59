use std::io;

use tracing::info;
use ts_conversation::Conversation;
use ts_transport::{HttpTransport, Request};

use crate::{
    ctx::Ctx,
    error::{Error, Result},
};

#[derive(Debug, clap::Args)]
pub(crate) struct Ask {
    /// The message to send.
    message: String,
}

impl Ask {
    pub(crate) async fn run(self, ctx: &Ctx) -> Result<()> {
        let transport = HttpTransport::new(ctx.config.transport.endpoint_url()?);

        let mut conversation = Conversation::new(ctx.config.transport.conversation_id.clone());
        conversation.push_user(self.message.clone());

        let request = Request {
            message: self.message,
            conversation_id: conversation.id.clone(),
        };

        info!(
            endpoint = %transport.endpoint(),
            conversation_id = %request.conversation_id,
            "Sending message."
        );

        let fragments = tokio::select! {
            biased;
            () = ctx.cancel.cancelled() => return Err(Error::Cancelled),
            fragments = transport.send(&request) => fragments?,
        };

        ctx.stream_turn(&mut conversation, fragments, io::stdout())
            .await
    }
}
