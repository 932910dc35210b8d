/*!
 * Mock provider implementations for testing.
 *
 * This module provides mock providers that simulate different behaviors:
 * - `MockSentenceProvider::working()` - Always succeeds with scripted sentences
 * - `MockSentenceProvider::empty()` - Succeeds with no sentences
 * - `MockSentenceProvider::failing()` - Always fails with an error
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, returning the scripted sentences
    Working,
    /// Succeeds but finds nothing
    Empty,
    /// Always fails with a request error
    Failing,
    /// Always fails with a missing-credential error
    MissingCredential,
}

/// Mock provider for testing aggregation behavior
pub struct MockSentenceProvider {
    name: String,
    human_name: String,
    languages: Vec<String>,
    texts: Vec<String>,
    behavior: MockBehavior,
    repository: SentenceRepository,
    /// Number of times `fetch` was invoked (shared across clones)
    fetch_count: Arc<AtomicUsize>,
}

impl MockSentenceProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(
        name: impl Into<String>,
        languages: &[&str],
        behavior: MockBehavior,
        repository: SentenceRepository,
    ) -> Self {
        let name = name.into();
        Self {
            human_name: format!("Mock ({})", name),
            name,
            languages: languages.iter().map(|l| l.to_string()).collect(),
            texts: Vec::new(),
            behavior,
            repository,
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock provider returning the given sentences
    pub fn working(
        name: impl Into<String>,
        languages: &[&str],
        texts: &[&str],
        repository: SentenceRepository,
    ) -> Self {
        let mut provider = Self::new(name, languages, MockBehavior::Working, repository);
        provider.texts = texts.iter().map(|t| t.to_string()).collect();
        provider
    }

    /// Create a mock provider that always finds nothing
    pub fn empty(
        name: impl Into<String>,
        languages: &[&str],
        repository: SentenceRepository,
    ) -> Self {
        Self::new(name, languages, MockBehavior::Empty, repository)
    }

    /// Create a failing mock provider that always errors
    pub fn failing(
        name: impl Into<String>,
        languages: &[&str],
        repository: SentenceRepository,
    ) -> Self {
        Self::new(name, languages, MockBehavior::Failing, repository)
    }

    /// Number of times `fetch` has been invoked
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the fetch counter, for asserting after the provider
    /// has been moved into a registry
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_count)
    }
}

#[async_trait]
impl SentenceProvider for MockSentenceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn human_name(&self) -> &str {
        &self.human_name
    }

    fn supported_languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn repository(&self) -> &SentenceRepository {
        &self.repository
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError> {
        self.ensure_supported(language)?;
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self
                .texts
                .iter()
                .map(|text| Sentence::new(text.clone(), word, language, self.name()))
                .collect()),
            MockBehavior::Empty => Ok(Vec::new()),
            MockBehavior::Failing => Err(ProviderError::RequestFailed {
                provider: self.name.clone(),
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::MissingCredential => Err(ProviderError::MissingCredential {
                provider: self.name.clone(),
            }),
        }
    }

    fn source_url(&self, word: &str, _language: &str) -> String {
        format!("https://mock.invalid/search?q={}", word)
    }
}
