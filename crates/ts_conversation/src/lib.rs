pub mod conversation;
pub mod error;
pub mod message;

pub use conversation::{Conversation, ConversationId};
pub use error::Error;
pub use message::{Message, Role};
