/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};

/// A single example sentence fetched for a word.
///
/// Immutable once created. `(text, word, language, provider)` is the cache
/// primary key; re-inserting an identical tuple overwrites rather than
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The sentence text
    pub text: String,
    /// The word this sentence was fetched for
    pub word: String,
    /// Canonical language code (alpha-3)
    pub language: String,
    /// Machine id of the provider that produced this sentence
    pub provider: String,
    /// Link to where this exact sentence came from, when the provider
    /// exposes one. Carried for display only; not persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Sentence {
    /// Create a new sentence without a per-sentence source link
    pub fn new(
        text: impl Into<String>,
        word: impl Into<String>,
        language: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            word: word.into(),
            language: language.into(),
            provider: provider.into(),
            source: None,
        }
    }

    /// Attach a per-sentence source link
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
