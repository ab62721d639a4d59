//! Rendering of message text for display.
//!
//! Only a small inline subset of markdown is understood (bold, italic,
//! strikethrough and inline code), and it is converted either to HTML or to
//! ANSI escape sequences.

pub mod ansi;
pub mod format;
pub mod render;

pub use format::{CURSOR, Formatter, Target};
