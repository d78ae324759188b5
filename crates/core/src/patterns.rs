//! Pattern table: the ordered keyword dispatch table.
//!
//! Each entry pairs a case-insensitive matcher with a list of candidate
//! replies. Entries are evaluated in insertion order and the first match
//! wins, so adding a topic never requires touching the selection logic:
//!
//! ```text
//! "I washed my hands before food"
//!        │
//!        ▼
//!  greeting ✗ → handwashing ✓ ─── diet (never evaluated)
//! ```

use regex::{Regex, RegexBuilder};

use crate::error::PatternError;

/// One topic in the dispatch table.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    topic: String,
    matcher: Regex,
    candidates: Vec<String>,
}

impl PatternEntry {
    /// Compile a new entry. The pattern is searched unanchored and case-insensitively.
    pub fn new<S: Into<String>>(
        topic: impl Into<String>,
        pattern: &str,
        candidates: impl IntoIterator<Item = S>,
    ) -> Result<Self, PatternError> {
        let topic = topic.into();
        let candidates: Vec<String> = candidates.into_iter().map(Into::into).collect();
        if candidates.is_empty() {
            return Err(PatternError::EmptyCandidates(topic));
        }

        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| PatternError::InvalidMatcher {
                topic: topic.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            topic,
            matcher,
            candidates,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The source pattern this entry was compiled from.
    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// Ordered topics plus the fallback replies used when nothing matches.
#[derive(Debug, Clone)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    fallback: Vec<String>,
}

impl PatternTable {
    /// Create an empty table with the given fallback replies.
    pub fn new<S: Into<String>>(
        fallback: impl IntoIterator<Item = S>,
    ) -> Result<Self, PatternError> {
        let fallback: Vec<String> = fallback.into_iter().map(Into::into).collect();
        if fallback.is_empty() {
            return Err(PatternError::EmptyFallback);
        }
        Ok(Self {
            entries: Vec::new(),
            fallback,
        })
    }

    /// Append an entry at the lowest priority.
    pub fn push(&mut self, entry: PatternEntry) {
        self.entries.push(entry);
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with_entry(mut self, entry: PatternEntry) -> Self {
        self.push(entry);
        self
    }

    /// The built-in health & hygiene topics.
    pub fn builtin() -> Result<Self, PatternError> {
        let mut table = Self::new(FALLBACK_REPLIES.iter().copied())?;
        for (topic, pattern, replies) in BUILTIN_TOPICS {
            table.push(PatternEntry::new(*topic, pattern, replies.iter().copied())?);
        }
        Ok(table)
    }

    /// First entry (in priority order) whose matcher hits `text`.
    pub fn first_match(&self, text: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|entry| entry.matches(text))
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &[String] {
        &self.fallback
    }

    /// Look up an entry by topic name.
    pub fn topic(&self, name: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|entry| entry.topic == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Built-in table ────────────────────────────────────────────────────────

const BUILTIN_TOPICS: &[(&str, &str, [&str; 3])] = &[
    (
        "greeting",
        r"\bhi\b|\bhello\b|\bhey\b",
        [
            "Hello! I'm your Health & Hygiene Assistant. Ask me anything!",
            "Hi! Need tips on staying clean and healthy?",
            "Hey! What hygiene or health topic would you like to explore?",
        ],
    ),
    (
        "handwashing",
        r"hand|wash",
        [
            "Wash your hands with soap and water for at least 20 seconds.",
            "Always wash your hands before meals and after using the toilet.",
            "Handwashing is the first defense against many infections.",
        ],
    ),
    (
        "diet",
        r"food|eat|diet",
        [
            "A healthy diet includes vegetables, fruits, whole grains, and lean proteins.",
            "Avoid junk food and drink plenty of water.",
            "Eating balanced meals boosts immunity and energy levels.",
        ],
    ),
    (
        "illness",
        r"flu|cold|fever|ill",
        [
            "Prevent flu by getting vaccinated, staying clean, and avoiding close contact with the sick.",
            "If you're sick, rest, stay hydrated, and consult a doctor.",
            "Keep your environment clean to reduce chances of getting sick.",
        ],
    ),
    (
        "oral",
        r"teeth|brush|oral",
        [
            "Brush your teeth twice daily and floss once a day.",
            "Change your toothbrush every 3 months.",
            "Oral hygiene is crucial to prevent gum disease.",
        ],
    ),
    (
        "bathing",
        r"bath|shower|clean",
        [
            "Daily bathing keeps skin healthy and removes bacteria.",
            "Clean clothes and body prevent infections and body odor.",
            "Personal hygiene is a daily responsibility.",
        ],
    ),
    (
        "sleep",
        r"sleep|rest",
        [
            "Adults need 7–8 hours of sleep for good health.",
            "Sleep helps your body repair and boosts immunity.",
            "Lack of sleep can weaken your immune system.",
        ],
    ),
    (
        "stress",
        r"stress|mental|relax",
        [
            "Take breaks, talk to friends, or try meditation to reduce stress.",
            "Mental health is as important as physical health.",
            "Stay connected and express your feelings—it helps!",
        ],
    ),
    (
        "thanks",
        r"thank you|thanks",
        [
            "You're welcome! Stay healthy!",
            "Anytime! Let me know if you have more questions.",
            "Glad to help!",
        ],
    ),
    (
        "farewell",
        r"bye|goodbye",
        [
            "Goodbye! Stay safe and clean!",
            "See you later. Take care of your health!",
            "Bye for now! Keep up the good hygiene habits!",
        ],
    ),
];

const FALLBACK_REPLIES: [&str; 3] = [
    "Sorry, I don't have an answer for that yet. Try asking about hygiene, diet, or illness prevention.",
    "I'm still learning. Can you try rephrasing your question?",
    "That's interesting! Could you ask something related to health or hygiene?",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_of(table: &PatternTable, text: &str) -> Option<String> {
        table.first_match(text).map(|e| e.topic().to_string())
    }

    #[test]
    fn builtin_table_has_ten_ordered_topics() {
        let table = PatternTable::builtin().unwrap();
        let topics: Vec<&str> = table.entries().iter().map(|e| e.topic()).collect();
        assert_eq!(
            topics,
            [
                "greeting",
                "handwashing",
                "diet",
                "illness",
                "oral",
                "bathing",
                "sleep",
                "stress",
                "thanks",
                "farewell"
            ]
        );
        assert!(table.entries().iter().all(|e| e.candidates().len() == 3));
        assert_eq!(table.fallback().len(), 3);
    }

    #[test]
    fn greeting_requires_whole_word() {
        let table = PatternTable::builtin().unwrap();
        assert_eq!(topic_of(&table, "hi there").as_deref(), Some("greeting"));
        assert_eq!(topic_of(&table, "well, hey.").as_deref(), Some("greeting"));
        // "this" contains "hi" but not as a word
        assert_eq!(topic_of(&table, "this"), None);
    }

    #[test]
    fn word_boundaries_are_unicode_aware() {
        let table = PatternTable::builtin().unwrap();
        assert_eq!(topic_of(&table, "hiß"), None);
        assert_eq!(topic_of(&table, "éhi"), None);
        assert_eq!(topic_of(&table, "heyé"), None);
        assert_eq!(topic_of(&table, "¡hola! hey").as_deref(), Some("greeting"));
    }

    #[test]
    fn other_topics_match_substrings() {
        let table = PatternTable::builtin().unwrap();
        assert_eq!(topic_of(&table, "handwashing").as_deref(), Some("handwashing"));
        assert_eq!(topic_of(&table, "i am still tired").as_deref(), Some("illness"));
        assert_eq!(topic_of(&table, "toothbrush").as_deref(), Some("oral"));
        assert_eq!(topic_of(&table, "restaurant").as_deref(), Some("sleep"));
    }

    #[test]
    fn earlier_entry_wins() {
        let table = PatternTable::builtin().unwrap();
        assert_eq!(
            topic_of(&table, "should i wash before food?").as_deref(),
            Some("handwashing")
        );
        assert_eq!(topic_of(&table, "hello, i have a fever").as_deref(), Some("greeting"));
    }

    #[test]
    fn matching_ignores_case() {
        let table = PatternTable::builtin().unwrap();
        assert_eq!(topic_of(&table, "SHOWER").as_deref(), Some("bathing"));
    }

    #[test]
    fn empty_text_matches_nothing() {
        let table = PatternTable::builtin().unwrap();
        assert!(table.first_match("").is_none());
    }

    #[test]
    fn custom_entry_appends_at_lowest_priority() {
        let table = PatternTable::builtin()
            .unwrap()
            .with_entry(PatternEntry::new("water", "water|hydrat", ["Drink up!"]).unwrap());
        assert_eq!(table.len(), 11);
        assert_eq!(topic_of(&table, "hydration").as_deref(), Some("water"));
        // "eat" in "sweat" still belongs to diet, which comes first
        assert_eq!(topic_of(&table, "water and sweat").as_deref(), Some("diet"));
    }

    #[test]
    fn invalid_pattern_rejected() {
        let err = PatternEntry::new("broken", "(unclosed", ["x"]).unwrap_err();
        assert!(matches!(err, PatternError::InvalidMatcher { .. }));
    }

    #[test]
    fn empty_candidates_rejected() {
        let err = PatternEntry::new("silent", "quiet", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, PatternError::EmptyCandidates(topic) if topic == "silent"));
    }

    #[test]
    fn empty_fallback_rejected() {
        assert!(matches!(
            PatternTable::new(Vec::<String>::new()),
            Err(PatternError::EmptyFallback)
        ));
    }
}
