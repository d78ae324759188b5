//! Conversation store: per-user transcripts kept for the process lifetime.
//!
//! The store is injected wherever it is needed, so tests can build isolated
//! instances. Transcripts never expire; nothing is persisted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::ConversationError;
use crate::message::{Message, Transcript};

/// What a reset did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The user was known and their transcript is now empty.
    Cleared,
    /// The user was unknown; nothing changed.
    NotFound,
}

/// Storage for per-user transcripts.
///
/// Implementations must apply both halves of a turn atomically: a reader may
/// never see a user message without its bot reply.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// The backend name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Append a user message and the bot reply to `user_id`'s transcript,
    /// creating it if needed. Returns the transcript as it stands after the append.
    async fn append_turn(&self, user_id: &str, user_text: &str, bot_text: &str) -> Transcript;

    /// Full transcript for a known user.
    async fn get_transcript(&self, user_id: &str) -> Result<Transcript, ConversationError>;

    /// Empty a known user's transcript. Unknown users are left untouched.
    async fn reset(&self, user_id: &str) -> ResetOutcome;

    /// Number of known user identifiers.
    async fn user_count(&self) -> usize;
}

/// A store that keeps every transcript in a single locked map.
pub struct InMemoryConversationStore {
    transcripts: Arc<RwLock<HashMap<String, Transcript>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            transcripts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append_turn(&self, user_id: &str, user_text: &str, bot_text: &str) -> Transcript {
        let mut transcripts = self.transcripts.write().await;
        let transcript = transcripts.entry(user_id.to_string()).or_default();
        transcript.push(Message::user(user_text));
        transcript.push(Message::bot(bot_text));
        debug!(user_id = %user_id, messages = transcript.len(), "Turn appended");
        transcript.clone()
    }

    async fn get_transcript(&self, user_id: &str) -> Result<Transcript, ConversationError> {
        self.transcripts
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| ConversationError::NotFound(user_id.to_string()))
    }

    async fn reset(&self, user_id: &str) -> ResetOutcome {
        let mut transcripts = self.transcripts.write().await;
        match transcripts.get_mut(user_id) {
            Some(transcript) => {
                transcript.clear();
                ResetOutcome::Cleared
            }
            None => ResetOutcome::NotFound,
        }
    }

    async fn user_count(&self) -> usize {
        self.transcripts.read().await.len()
    }
}
