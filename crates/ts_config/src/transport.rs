//! Transport configuration.

use serde::{Deserialize, Serialize};
use ts_conversation::ConversationId;
use url::Url;

use crate::{
    assignment::{AssignKeyValue, KvAssignment, missing_key},
    error::{Error, Result},
};

/// The default endpoint of the streaming service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/ai/generateStream";

/// Where requests are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// The URL requests are POSTed to.
    pub endpoint: String,

    /// The conversation the requests belong to.
    pub conversation_id: ConversationId,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            conversation_id: ConversationId::default(),
        }
    }
}

impl TransportConfig {
    /// The endpoint, parsed as a URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).map_err(|error| Error::InvalidConfigValue {
            key: "transport.endpoint".to_owned(),
            value: self.endpoint.clone(),
            reason: error.to_string(),
        })
    }
}

impl AssignKeyValue for TransportConfig {
    fn assign(&mut self, kv: KvAssignment) -> Result<()> {
        match kv.key_string() {
            "endpoint" => self.endpoint = kv.into_string(),
            "conversation_id" => self.conversation_id = kv.try_parse()?,
            _ => {
                return missing_key(&kv, &[
                    "transport.endpoint",
                    "transport.conversation_id",
                ]);
            }
        }

        Ok(())
    }
}
