/*!
 * Nadeshiko provider.
 *
 * Queries the Nadeshiko sentence search API for Japanese sentences mined
 * from anime and drama subtitles. The API is keyed: without a configured
 * API key the provider fails fast with `MissingCredential` before any
 * network call.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;
use crate::request::HttpRequester;

const API_URL: &str = "https://api.nadeshiko.co/api/v1/search/media/sentence";

/// Sentence search request payload
#[derive(Debug, Serialize)]
struct SentenceSearchRequest {
    /// The word or phrase to search for
    query: String,
}

/// Sentence search response payload
#[derive(Debug, Deserialize)]
struct SentenceSearchResponse {
    /// Matched sentences
    #[serde(default)]
    sentences: Vec<ApiSentence>,
}

/// One matched sentence
#[derive(Debug, Deserialize)]
struct ApiSentence {
    /// Subtitle segment carrying the sentence text
    segment_info: SegmentInfo,
}

/// Subtitle segment details
#[derive(Debug, Deserialize)]
struct SegmentInfo {
    /// Japanese sentence text
    content_jp: String,
}

/// Provider backed by the Nadeshiko search API
pub struct NadeshikoProvider {
    repository: SentenceRepository,
    requester: HttpRequester,
    /// API key supplied through configuration; requests are refused without it
    api_key: Option<String>,
}

impl NadeshikoProvider {
    /// Create a new provider backed by the given cache
    pub fn new(repository: SentenceRepository, api_key: Option<String>) -> Self {
        Self {
            repository,
            requester: HttpRequester::new(),
            api_key,
        }
    }

    fn credential(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: self.name().to_string(),
            })
    }
}

#[async_trait]
impl SentenceProvider for NadeshikoProvider {
    fn name(&self) -> &str {
        "nadeshiko"
    }

    fn human_name(&self) -> &str {
        "Nadeshiko"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["jpn".to_string()]
    }

    fn repository(&self) -> &SentenceRepository {
        &self.repository
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError> {
        self.ensure_supported(language)?;
        let api_key = self.credential()?;

        let request = SentenceSearchRequest {
            query: word.to_string(),
        };
        let response: SentenceSearchResponse = self
            .requester
            .post_json(self.name(), API_URL, &[("X-API-Key", api_key)], &request)
            .await?;

        Ok(response
            .sentences
            .into_iter()
            .map(|sentence| {
                Sentence::new(sentence.segment_info.content_jp, word, language, self.name())
            })
            .collect())
    }

    fn source_url(&self, word: &str, _language: &str) -> String {
        format!("https://nadeshiko.co/search/sentence?query={}", word)
    }
}
