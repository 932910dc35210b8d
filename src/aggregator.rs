/*!
 * Sentence aggregation engine.
 *
 * For a given (word, language, providers, limit) request this module selects
 * the eligible providers from the registry, consults each provider's cached
 * results first, falls through to network fetches for any deficit, merges,
 * and trims to the limit. Provider ordering is a fresh random permutation on
 * every request and over-limit results are trimmed by uniform random
 * sampling: variety across repeated lookups of the same word is deliberate.
 */

use std::sync::Arc;

use log::{debug, warn};
use rand::seq::{IndexedRandom, SliceRandom};

use crate::database::Sentence;
use crate::errors::ProviderError;
use crate::language_utils::canonical_code;
use crate::providers::SentenceProvider;
use crate::registry::{ProviderRegistry, language_matches};

/// Fallback language when a request names neither a language nor providers
const DEFAULT_LANGUAGE: &str = "eng";

/// Aggregation engine over a provider registry.
///
/// Holds no per-request state; every call works from its arguments and the
/// injected registry.
pub struct SentenceAggregator {
    registry: Arc<ProviderRegistry>,
    default_language: String,
}

impl SentenceAggregator {
    /// Create an aggregator over the given registry
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Override the fallback language used for unconstrained requests
    pub fn with_default_language(mut self, language: &str) -> Self {
        self.default_language = canonical_code(language);
        self
    }

    /// The registry this aggregator selects providers from
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Eligible providers: capability matches `language` (when given) and
    /// name is in `providers` (when given)
    fn matched_providers(
        &self,
        language: Option<&str>,
        providers: Option<&[String]>,
    ) -> Vec<Arc<dyn SentenceProvider>> {
        self.registry
            .all()
            .into_iter()
            .filter(|provider| {
                let mut matched = true;
                if let Some(language) = language {
                    matched &= language_matches(provider.as_ref(), language);
                }
                if let Some(names) = providers {
                    matched &= names.iter().any(|name| name == provider.name());
                }
                matched
            })
            .collect()
    }

    /// Get up to `limit` sentences for a word.
    ///
    /// Providers are tried in random order until the limit is reached or the
    /// eligible set is exhausted. A failure local to one provider is absorbed
    /// and the next provider is tried; only when every provider failed and
    /// nothing was accumulated is the last error returned. Exhausting all
    /// providers without an error yields an empty result, not an error.
    pub async fn get_sentences(
        &self,
        word: &str,
        language: Option<&str>,
        providers: Option<&[String]>,
        limit: Option<usize>,
    ) -> Result<Vec<Sentence>, ProviderError> {
        // An unconstrained request falls back to the default language
        // instead of fanning out to every provider
        let language = match language {
            Some(language) => Some(canonical_code(language)),
            None if providers.is_none() => Some(self.default_language.clone()),
            None => None,
        };

        // An explicit empty provider list means "no providers", which is
        // distinct from "unspecified"
        if providers.is_some_and(|names| names.is_empty()) {
            return Ok(Vec::new());
        }

        let mut matched = self.matched_providers(language.as_deref(), providers);
        debug!(
            "Aggregating sentences for \"{}\": {} eligible providers",
            word,
            matched.len()
        );
        {
            let mut rng = rand::rng();
            matched.shuffle(&mut rng);
        }

        let mut sentences: Vec<Sentence> = Vec::new();
        let mut last_error: Option<ProviderError> = None;

        while let Some(provider) = matched.pop() {
            if limit.is_some_and(|limit| sentences.len() >= limit) {
                break;
            }
            match provider
                .get_sentences(word, language.as_deref(), limit)
                .await
            {
                Ok(batch) => sentences.extend(batch),
                Err(e) => {
                    warn!("Provider {} failed for \"{}\": {}", provider.name(), word, e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(limit) = limit {
            if sentences.len() > limit {
                let mut rng = rand::rng();
                sentences = sentences.choose_multiple(&mut rng, limit).cloned().collect();
            }
        }

        if sentences.is_empty() {
            if let Some(error) = last_error {
                return Err(error);
            }
        }

        Ok(sentences)
    }

    /// Force a refresh of the cached sentences for a word.
    ///
    /// Runs the same provider selection as `get_sentences` but invokes every
    /// matched provider without a limit, which bypasses the cache-satisfied
    /// early exit and always hits the network; results are discarded and
    /// per-provider failures are only logged.
    pub async fn sync_sentences(
        &self,
        word: &str,
        language: Option<&str>,
        provider: Option<&str>,
    ) {
        let language = language.map(canonical_code);
        let names = provider.map(|name| vec![name.to_string()]);

        let mut matched = self.matched_providers(language.as_deref(), names.as_deref());
        {
            let mut rng = rand::rng();
            matched.shuffle(&mut rng);
        }

        while let Some(provider) = matched.pop() {
            if let Err(e) = provider.get_sentences(word, language.as_deref(), None).await {
                warn!(
                    "Resync via {} failed for \"{}\": {}",
                    provider.name(),
                    word,
                    e
                );
            }
        }
    }

    /// Human-followable link to where a sentence came from.
    ///
    /// Prefers the per-sentence source captured at fetch time; otherwise the
    /// provider constructs its search URL. Returns None when the provider is
    /// no longer registered.
    pub fn sentence_source(&self, sentence: &Sentence) -> Option<String> {
        if let Some(source) = &sentence.source {
            return Some(source.clone());
        }
        self.registry
            .by_name(&sentence.provider)
            .map(|provider| provider.source_url(&sentence.word, &sentence.language))
    }

    /// Languages served by at least one provider, as (code, display name)
    /// pairs
    pub fn languages(&self) -> Vec<(String, String)> {
        self.registry.all_languages()
    }
}
