/*!
 * Glosbe provider.
 *
 * Scrapes the monolingual example section of glosbe.com. Glosbe keys its
 * URLs on 2-letter codes, so the canonical alpha-3 language is mapped back
 * to alpha-2 when building the page address.
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::language_utils::get_language_info;
use crate::providers::SentenceProvider;
use crate::request::HttpRequester;

static EXAMPLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#tmem_first_examples .tmem__item span").unwrap());

/// Provider scraping glosbe.com monolingual example sections
pub struct GlosbeProvider {
    repository: SentenceRepository,
    requester: HttpRequester,
}

impl GlosbeProvider {
    /// Create a new provider backed by the given cache
    pub fn new(repository: SentenceRepository) -> Self {
        Self {
            repository,
            requester: HttpRequester::new(),
        }
    }

    /// Glosbe page addresses use 2-letter codes where they exist
    fn url_language(language: &str) -> String {
        let info = get_language_info(language);
        info.alpha_2.unwrap_or(info.alpha_3)
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
impl SentenceProvider for GlosbeProvider {
    fn name(&self) -> &str {
        "glosbe"
    }

    fn human_name(&self) -> &str {
        "Glosbe"
    }

    fn supported_languages(&self) -> Vec<String> {
        vec!["eng".to_string(), "tur".to_string()]
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

    fn source_url(&self, word: &str, language: &str) -> String {
        let lang = Self::url_language(language);
        format!("https://glosbe.com/{}/{}/{}", lang, lang, word)
    }
}
