/*!
 * Oxford Learner's Dictionaries provider.
 *
 * Scrapes example sentences from the dictionary entry page; English only.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;
use crate::request::HttpRequester;

static EXAMPLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".x").unwrap());

/// Provider scraping oxfordlearnersdictionaries.com entry pages
pub struct OxfordLearnerProvider {
    repository: SentenceRepository,
    requester: HttpRequester,
}

impl OxfordLearnerProvider {
    /// Create a new provider backed by the given cache
    pub fn new(repository: SentenceRepository) -> Self {
        Self {
            repository,
            requester: HttpRequester::new(),
        }
    }

    fn extract_sentences(body: &str) -> Vec<String> {
        let document = Html::parse_document(body);
        document
            .select(&EXAMPLE_SELECTOR)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

#[async_trait]
impl SentenceProvider for OxfordLearnerProvider {
    fn name(&self) -> &str {
        "oxford_learner"
    }

    fn human_name(&self) -> &str {
        "Oxford Learner's Dictionaries"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["eng".to_string()]
    }

    fn repository(&self) -> &SentenceRepository {
        &self.repository
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError> {
        self.ensure_supported(language)?;

        let url = self.source_url(word, language);
        let body = self.requester.get_text(self.name(), &url).await?;

        Ok(Self::extract_sentences(&body)
            .into_iter()
            .map(|text| Sentence::new(text, word, language, self.name()))
            .collect())
    }

    fn source_url(&self, word: &str, _language: &str) -> String {
        format!(
            "https://www.oxfordlearnersdictionaries.com/definition/english/{}",
            word
        )
    }
}
