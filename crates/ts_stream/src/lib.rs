//! Incremental separation of streamed text into reasoning and answer text.
//!
//! Text arrives in arbitrary fragments. Each fragment is first normalized
//! (see [`normalize`]), then classified (see [`extract`]), and finally folded
//! into the assistant [`Message`] of the current turn by the
//! [`Accumulator`].
//!
//! [`Message`]: ts_conversation::Message

pub mod accumulator;
pub mod extract;
pub mod marker;
pub mod normalize;
pub mod state;
pub mod turn;

pub use accumulator::{Accumulator, Delta, apply_chunk, finish};
pub use extract::{Case, ExtractionResult, Extractor, extract};
pub use marker::Markers;
pub use normalize::{Normalizer, normalize};
pub use state::{Mode, StreamState};
pub use turn::{Turn, TurnOutcome};
