//! Response selector: turns user text into a canned reply.
//!
//! Matching is deterministic; the choice among a topic's candidates is not.
//! The random source sits behind [`ReplyPicker`] so tests can pin it.

use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::patterns::PatternTable;

/// Chooses an index into a non-empty candidate list.
pub trait ReplyPicker: Send + Sync {
    /// Return an index in `0..len`. `len` is always at least 1.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice backed by `rand`'s thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl ReplyPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        rand::rng().random_range(0..len)
    }
}

/// A reply together with the topic that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply<'a> {
    pub text: &'a str,
    /// `None` when the fallback list was used.
    pub topic: Option<&'a str>,
}

/// Selects replies from a shared [`PatternTable`].
#[derive(Clone)]
pub struct Responder {
    table: Arc<PatternTable>,
    picker: Arc<dyn ReplyPicker>,
}

impl Responder {
    pub fn new(table: Arc<PatternTable>) -> Self {
        Self::with_picker(table, Arc::new(RandomPicker))
    }

    pub fn with_picker(table: Arc<PatternTable>, picker: Arc<dyn ReplyPicker>) -> Self {
        Self { table, picker }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Classify `raw_text` and pick one candidate from the winning topic.
    pub fn select(&self, raw_text: &str) -> Reply<'_> {
        let normalized = raw_text.to_lowercase();

        let (topic, candidates) = match self.table.first_match(&normalized) {
            Some(entry) => (Some(entry.topic()), entry.candidates()),
            None => (None, self.table.fallback()),
        };

        let index = self.picker.pick(candidates.len()) % candidates.len();
        debug!(topic = topic.unwrap_or("fallback"), index, "Reply selected");

        Reply {
            text: &candidates[index],
            topic,
        }
    }

    /// Owned reply text for `raw_text`.
    pub fn generate_reply(&self, raw_text: &str) -> String {
        self.select(raw_text).text.to_string()
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder")
            .field("topics", &self.table.len())
            .finish_non_exhaustive()
    }
}
