/*!
 * Massif provider.
 *
 * Scrapes Japanese example sentences from massif.la search results. Each
 * result carries a link to the work the sentence was quoted from, which is
 * attached to the sentence as its source.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;
use crate::request::HttpRequester;

static RESULT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li.text-japanese").unwrap());
static TEXT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div").unwrap());
static SOURCE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".source_link").unwrap());

/// Provider scraping massif.la search results
pub struct MassifProvider {
    repository: SentenceRepository,
    requester: HttpRequester,
}

impl MassifProvider {
    /// Create a new provider backed by the given cache
    pub fn new(repository: SentenceRepository) -> Self {
        Self {
            repository,
            requester: HttpRequester::new(),
        }
    }

    /// Extract (text, source link) pairs from a results page
    fn extract_sentences(body: &str) -> Vec<(String, Option<String>)> {
        let document = Html::parse_document(body);
        let mut results = Vec::new();

        for result in document.select(&RESULT_SELECTOR) {
            let Some(text_el) = result.select(&TEXT_SELECTOR).next() else {
                continue;
            };
            let text = text_el.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                continue;
            }

            let source = result
                .select(&SOURCE_SELECTOR)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(str::to_string);

            results.push((text, source));
        }

        results
    }
}

#[async_trait]
impl SentenceProvider for MassifProvider {
    fn name(&self) -> &str {
        "massif"
    }

    fn human_name(&self) -> &str {
        "Massif"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["jpn".to_string()]
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
            .map(|(text, source)| {
                let sentence = Sentence::new(text, word, language, self.name());
                match source {
                    Some(source) => sentence.with_source(source),
                    None => sentence,
                }
            })
            .collect())
    }

    fn source_url(&self, word: &str, _language: &str) -> String {
        format!("https://massif.la/ja/search?q={}", word)
    }
}
