/*!
 * Jisho provider.
 *
 * Scrapes Japanese example sentences from jisho.org's sentence search,
 * following result pages until an empty one. Furigana annotations are
 * stripped so only the plain sentence text is kept.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;
use crate::request::HttpRequester;

static SENTENCE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".japanese_sentence").unwrap());

/// Provider scraping jisho.org sentence search results
pub struct JishoProvider {
    repository: SentenceRepository,
    requester: HttpRequester,
}

impl JishoProvider {
    /// Create a new provider backed by the given cache
    pub fn new(repository: SentenceRepository) -> Self {
        Self {
            repository,
            requester: HttpRequester::new(),
        }
    }

    /// Collect an element's text, skipping furigana annotation elements
    fn text_without_furigana(element: ElementRef) -> String {
        let mut out = String::new();
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(child_element) = ElementRef::wrap(child) {
                let is_furigana = child_element
                    .value()
                    .attr("class")
                    .is_some_and(|classes| classes.split_whitespace().any(|c| c == "furigana"));
                if !is_furigana {
                    out.push_str(&Self::text_without_furigana(child_element));
                }
            }
        }
        out
    }

    fn extract_sentences(body: &str) -> Vec<String> {
        let document = Html::parse_document(body);
        document
            .select(&SENTENCE_SELECTOR)
            .map(|el| Self::text_without_furigana(el).trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

#[async_trait]
impl SentenceProvider for JishoProvider {
    fn name(&self) -> &str {
        "jisho"
    }

    fn human_name(&self) -> &str {
        "Jisho"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["jpn".to_string()]
    }

    fn repository(&self) -> &SentenceRepository {
        &self.repository
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError> {
        self.ensure_supported(language)?;

        let mut sentences = Vec::new();
        let mut page = 1;
        loop {
            let url = format!("{}?page={}", self.source_url(word, language), page);
            let body = self.requester.get_text(self.name(), &url).await?;
            let texts = Self::extract_sentences(&body);
            if texts.is_empty() {
                break;
            }
            sentences.extend(
                texts
                    .into_iter()
                    .map(|text| Sentence::new(text, word, language, self.name())),
            );
            page += 1;
        }

        Ok(sentences)
    }

    fn source_url(&self, word: &str, _language: &str) -> String {
        format!("https://jisho.org/search/{} %23sentences", word)
    }
}
