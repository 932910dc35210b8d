/*!
 * TDK provider.
 *
 * Queries the Turkish Language Association dictionary API and collects the
 * usage examples attached to each sense of the entry.
 */

use async_trait::async_trait;
use serde::Deserialize;

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;
use crate::request::HttpRequester;

const API_URL: &str = "https://sozluk.gov.tr/gts";

/// Dictionary API response: either a list of entries or an error object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TdkResponse {
    /// Matched dictionary entries
    Entries(Vec<TdkEntry>),
    /// The API reports misses as an error object rather than an empty list
    Error {
        #[allow(dead_code)]
        error: String,
    },
}

/// One dictionary entry
#[derive(Debug, Deserialize)]
struct TdkEntry {
    /// Senses of the entry
    #[serde(rename = "anlamlarListe", default)]
    meanings: Vec<TdkMeaning>,
}

/// One sense of an entry
#[derive(Debug, Deserialize)]
struct TdkMeaning {
    /// Usage examples attached to this sense
    #[serde(rename = "orneklerListe", default)]
    examples: Vec<TdkExample>,
}

/// One usage example
#[derive(Debug, Deserialize)]
struct TdkExample {
    /// The example text
    #[serde(rename = "ornek", default)]
    text: Option<String>,
}

/// Provider backed by the TDK dictionary API
pub struct TdkProvider {
    repository: SentenceRepository,
    requester: HttpRequester,
}

impl TdkProvider {
    /// Create a new provider backed by the given cache
    pub fn new(repository: SentenceRepository) -> Self {
        Self {
            repository,
            requester: HttpRequester::new(),
        }
    }

    fn collect_examples(response: TdkResponse) -> Vec<String> {
        match response {
            TdkResponse::Entries(entries) => entries
                .into_iter()
                .flat_map(|entry| entry.meanings)
                .flat_map(|meaning| meaning.examples)
                .filter_map(|example| example.text)
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .collect(),
            TdkResponse::Error { .. } => Vec::new(),
        }
    }
}

#[async_trait]
impl SentenceProvider for TdkProvider {
    fn name(&self) -> &str {
        "tdk"
    }

    fn human_name(&self) -> &str {
        "TDK"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["tur".to_string()]
    }

    fn repository(&self) -> &SentenceRepository {
        &self.repository
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError> {
        self.ensure_supported(language)?;

        let url = format!("{}?ara={}", API_URL, word);
        let response: TdkResponse = self.requester.get_json(self.name(), &url).await?;

        Ok(Self::collect_examples(response)
            .into_iter()
            .map(|text| Sentence::new(text, word, language, self.name()))
            .collect())
    }

    fn source_url(&self, word: &str, _language: &str) -> String {
        format!("https://sozluk.gov.tr/?ara={}", word)
    }
}
