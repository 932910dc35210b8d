/*!
 * Tatoeba provider.
 *
 * Serves sentences from per-language corpus files previously imported into
 * the local data directory (one SQLite file per language, named
 * `<code>_sentences.db`). Unlike the network providers this adapter never
 * leaves the machine; its language support is whatever corpora are present
 * on disk.
 */

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OpenFlags};
use url::Url;
use walkdir::WalkDir;

use crate::database::{Sentence, SentenceRepository};
use crate::errors::ProviderError;
use crate::providers::SentenceProvider;

/// Corpus file suffix, prefixed by the language code
const CORPUS_SUFFIX: &str = "_sentences.db";

/// Languages matched by bare substring search instead of word boundaries
const CJK_LANGUAGES: &[&str] = &["jpn", "kor", "zho"];

static SEARCH_URL: Lazy<Url> =
    Lazy::new(|| Url::parse("https://tatoeba.org/en/sentences/search").unwrap());

/// Provider reading locally imported Tatoeba corpus files
pub struct TatoebaProvider {
    repository: SentenceRepository,
    data_dir: PathBuf,
}

impl TatoebaProvider {
    /// Create a new provider reading corpora from the default data directory
    pub fn new(repository: SentenceRepository) -> Self {
        Self::with_data_dir(repository, Self::default_data_dir())
    }

    /// Create a new provider reading corpora from a specific directory
    pub fn with_data_dir(repository: SentenceRepository, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            data_dir: data_dir.into(),
        }
    }

    /// Default corpus directory under the user's data directory
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sentex")
            .join("tatoeba")
    }

    fn corpus_path(&self, language: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", language, CORPUS_SUFFIX))
    }

    /// Read all corpus sentences containing the word.
    ///
    /// CJK corpora are matched by substring; everything else is narrowed to
    /// word-boundary matches.
    fn search_corpus(path: &Path, word: &str, cjk: bool) -> Result<Vec<String>, rusqlite::Error> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut stmt = conn.prepare("SELECT text FROM sentences WHERE text LIKE ?1")?;
        let rows = stmt.query_map([format!("%{}%", word)], |row| row.get::<_, String>(0))?;

        let boundary = if cjk {
            None
        } else {
            Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).ok()
        };

        let mut sentences = Vec::new();
        for row in rows {
            let text = row?;
            if boundary.as_ref().is_none_or(|re| re.is_match(&text)) {
                sentences.push(text);
            }
        }
        Ok(sentences)
    }
}

#[async_trait]
impl SentenceProvider for TatoebaProvider {
    fn name(&self) -> &str {
        "tatoeba"
    }

    fn human_name(&self) -> &str {
        "Tatoeba"
    }

    /// Languages are discovered from the corpus files present on disk
    fn supported_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = WalkDir::new(&self.data_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_suffix(CORPUS_SUFFIX))
                    .map(str::to_string)
            })
            .collect();
        languages.sort();
        languages
    }

    fn repository(&self) -> &SentenceRepository {
        &self.repository
    }

    async fn fetch(&self, word: &str, language: &str) -> Result<Vec<Sentence>, ProviderError> {
        self.ensure_supported(language)?;

        let path = self.corpus_path(language);
        let word = word.trim().to_lowercase();
        let cjk = CJK_LANGUAGES.contains(&language);
        let provider = self.name().to_string();
        let search_word = word.clone();

        let texts = tokio::task::spawn_blocking(move || Self::search_corpus(&path, &search_word, cjk))
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider: provider.clone(),
                message: e.to_string(),
            })?
            .unwrap_or_else(|e| {
                // A vanished or unreadable corpus degrades to no matches
                warn!("Tatoeba corpus read failed for {}: {}", language, e);
                Vec::new()
            });

        Ok(texts
            .into_iter()
            .map(|text| Sentence::new(text, word.clone(), language, self.name()))
            .collect())
    }

    fn source_url(&self, word: &str, language: &str) -> String {
        let mut url = SEARCH_URL.clone();
        url.query_pairs_mut()
            .append_pair("from", language)
            .append_pair("query", word)
            .append_pair("to", "");
        url.to_string()
    }
}
