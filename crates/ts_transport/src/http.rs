//! Streaming over HTTP.

use std::io;

use futures::TryStreamExt as _;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tokio_util::io::StreamReader;
use tracing::{error, trace};
use ts_conversation::ConversationId;
use url::Url;

use crate::{
    FragmentStream,
    error::{Error, Result},
    framed,
};

/// The request body of a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// The user's message.
    pub message: String,

    /// The conversation the message belongs to.
    pub conversation_id: ConversationId,
}

/// POSTs a [`Request`] and streams back the response body.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint,
        }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send `request`, returning the fragments of the response.
    ///
    /// Fails if the request cannot be sent, or if the server responds with a
    /// non-success status. Errors happening mid-stream are yielded by the
    /// returned stream instead.
    pub async fn send(&self, request: &Request) -> Result<FragmentStream> {
        trace!(
            url = %self.endpoint,
            conversation_id = %request.conversation_id,
            "Triggering request."
        );

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        trace!(
            status = response.status().as_u16(),
            content_length = response.content_length().unwrap_or_default(),
            content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .map(|v| v.to_str().unwrap_or_default()),
            "Received response."
        );

        let status = response.status();
        if !status.is_success() {
            let status = status.as_u16();
            let body = response.text().await?;

            error!(status, body, "Unexpected response.");

            return Err(Error::Api {
                code: status,
                message: body,
            });
        }

        let byte_stream = response.bytes_stream().map_err(io::Error::other);

        Ok(framed(StreamReader::new(byte_stream)))
    }
}
