//! # Hygienebot Core
//!
//! Domain types, traits, and error definitions for the Health & Hygiene chatbot.
//! This crate has **no HTTP dependencies**. It defines the pattern table, the
//! reply selector and the conversation store that the gateway and CLI build on.
//!
//! ## Design Philosophy
//!
//! The two seams that vary in tests are traits here:
//! - [`ReplyPicker`]: the random source behind reply selection
//! - [`ConversationStore`]: where transcripts live

pub mod error;
pub mod message;
pub mod patterns;
pub mod responder;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use error::{ConversationError, PatternError};
pub use message::{Message, Role, Transcript};
pub use patterns::{PatternEntry, PatternTable};
pub use responder::{RandomPicker, Reply, ReplyPicker, Responder};
pub use store::{ConversationStore, InMemoryConversationStore, ResetOutcome};
