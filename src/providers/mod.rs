/*!
 * Provider implementations for the different sentence sources.
 *
 * This module contains adapter implementations for various external
 * dictionary/corpus services:
 * - Tatoeba: locally imported corpus files
 * - Jisho, Massif, Nadeshiko: Japanese
 * - Oxford Learner's Dictionaries, Dictionary.com: English
 * - TDK, SesliSozluk: Turkish
 * - Glosbe: multi-language
 */

use async_trait::async_trait;
use log::warn;
use rand::seq::IndexedRandom;

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;

/// Common trait for all sentence providers.
///
/// Concrete adapters vary only in `fetch`, `source_url` and
/// `supported_languages`; the cache-first `get_sentences` merge is provided
/// behavior and not overridden per adapter.
#[async_trait]
pub trait SentenceProvider: Send + Sync {
    /// Stable machine id of this provider
    fn name(&self) -> &str;

    /// Human-readable display name
    fn human_name(&self) -> &str;

    /// Canonical alpha-3 codes this provider can fetch, in preference order.
    ///
    /// The first element doubles as the provider's default language when a
    /// caller does not specify one. Some adapters compute this dynamically
    /// from locally imported corpora.
    fn supported_languages(&self) -> Vec<String>;

    /// The sentence cache this provider reads and writes
    fn repository(&self) -> &SentenceRepository;

    /// Fetch sentences from the external source.
    ///
    /// Implementations must validate the language against
    /// `supported_languages` (via [`SentenceProvider::ensure_supported`])
    /// before any network call, and wrap network or extraction failures in
    /// [`ProviderError`] rather than panicking.
    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError>;

    /// Construct a human-followable link to where the sentences come from.
    /// Performs no network call.
    fn source_url(&self, word: &str, language: &str) -> String;

    /// The language assumed when a caller does not specify one
    fn default_language(&self) -> Option<String> {
        self.supported_languages().first().cloned()
    }

    /// Validate that a language is in this provider's capability set
    fn ensure_supported(&self, language: &str) -> Result<(), ProviderError> {
        if !self.supported_languages().iter().any(|l| l == language) {
            return Err(ProviderError::UnsupportedLanguage {
                language: language.to_string(),
                provider: self.name().to_string(),
            });
        }
        Ok(())
    }

    /// Get up to `limit` sentences for a word, consulting the cache first.
    ///
    /// Cached matches are read in randomized order; only when they fall short
    /// of `limit` (or no limit is given) does the provider hit the network,
    /// persisting whatever it fetched. When the combined result exceeds
    /// `limit` it is downsampled by uniform random sampling, so repeated
    /// calls with the same limit may return different subsets.
    async fn get_sentences(
        &self,
        word: &str,
        language: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Sentence>, ProviderError> {
        let language = match language {
            Some(language) => language.to_string(),
            None => self
                .default_language()
                .ok_or_else(|| ProviderError::UnsupportedLanguage {
                    language: String::new(),
                    provider: self.name().to_string(),
                })?,
        };

        // A failing cache read degrades to a miss, never to a failed request
        let mut sentences = match limit {
            Some(limit) => self
                .repository()
                .get_sentences(Some(word), Some(&language), Some(self.name()), Some(limit))
                .await
                .unwrap_or_else(|e| {
                    warn!("Cache read failed for provider {}: {}", self.name(), e);
                    Vec::new()
                }),
            None => Vec::new(),
        };

        if limit.is_none_or(|limit| sentences.len() < limit) {
            let fetched = self.fetch(word, &language).await?;
            if !fetched.is_empty() {
                if let Err(e) = self.repository().add_sentences(&fetched).await {
                    warn!("Failed to cache sentences from {}: {}", self.name(), e);
                }
                sentences.extend(fetched);
            }
        }

        if let Some(limit) = limit {
            if sentences.len() > limit {
                let mut rng = rand::rng();
                sentences = sentences
                    .choose_multiple(&mut rng, limit)
                    .cloned()
                    .collect();
            }
        }

        Ok(sentences)
    }
}

pub mod dictionary_com;
pub mod glosbe;
pub mod jisho;
pub mod massif;
pub mod mock;
pub mod nadeshiko;
pub mod oxford_learner;
pub mod sesli_sozluk;
pub mod tatoeba;
pub mod tdk;
