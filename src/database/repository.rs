/*!
 * Repository layer for sentence cache operations.
 *
 * This module provides a high-level API for all cache operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use log::debug;
use rusqlite::{Connection, OptionalExtension, ToSql};

use crate::errors::CacheError;

use super::connection::DatabaseConnection;
use super::models::Sentence;

/// Repository for sentence cache operations
#[derive(Clone)]
pub struct SentenceRepository {
    /// Database connection
    db: DatabaseConnection,
}

impl SentenceRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> anyhow::Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Get the underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert-or-replace a batch of sentences in one transaction.
    ///
    /// Idempotent: re-inserting an identical (text, word, language, provider)
    /// tuple overwrites the existing row rather than duplicating it.
    pub async fn add_sentences(&self, sentences: &[Sentence]) -> Result<(), CacheError> {
        if sentences.is_empty() {
            return Ok(());
        }
        let sentences = sentences.to_vec();

        self.db
            .transaction_async(move |tx| {
                let mut stmt = tx.prepare(
                    "INSERT OR REPLACE INTO sentences (text, word, language, provider)
                     VALUES (?1, ?2, ?3, ?4)",
                )?;
                for sentence in &sentences {
                    stmt.execute((
                        &sentence.text,
                        &sentence.word,
                        &sentence.language,
                        &sentence.provider,
                    ))?;
                }
                debug!("Cached {} sentences", sentences.len());
                Ok(())
            })
            .await
    }

    /// Query sentences matching all specified filters.
    ///
    /// Missing filters are wildcards. When `limit` is given, at most that
    /// many rows are returned in randomized order; callers must not rely on
    /// any particular ordering.
    pub async fn get_sentences(
        &self,
        word: Option<&str>,
        language: Option<&str>,
        provider: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Sentence>, CacheError> {
        let word = word.map(str::to_string);
        let language = language.map(str::to_string);
        let provider = provider.map(str::to_string);

        self.db
            .execute_async(move |conn| {
                Self::get_sentences_sync(conn, word, language, provider, limit)
            })
            .await
    }

    /// Synchronous query used inside the connection lock
    fn get_sentences_sync(
        conn: &Connection,
        word: Option<String>,
        language: Option<String>,
        provider: Option<String>,
        limit: Option<usize>,
    ) -> Result<Vec<Sentence>, CacheError> {
        let mut query = String::from("SELECT text, word, language, provider FROM sentences");
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<&dyn ToSql> = Vec::new();

        if let Some(word) = &word {
            clauses.push("word = ?");
            params.push(word);
        }
        if let Some(language) = &language {
            clauses.push("language = ?");
            params.push(language);
        }
        if let Some(provider) = &provider {
            clauses.push("provider = ?");
            params.push(provider);
        }
        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }

        let limit = limit.map(|l| l as i64);
        if let Some(limit) = &limit {
            query.push_str(" ORDER BY RANDOM() LIMIT ?");
            params.push(limit);
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(params.as_slice(), |row| {
            Ok(Sentence {
                text: row.get(0)?,
                word: row.get(1)?,
                language: row.get(2)?,
                provider: row.get(3)?,
                source: None,
            })
        })?;

        let mut sentences = Vec::new();
        for row in rows {
            sentences.push(row?);
        }
        Ok(sentences)
    }

    /// Get one random cached sentence for an exact (word, language, provider)
    pub async fn get_random_sentence(
        &self,
        word: &str,
        language: &str,
        provider: &str,
    ) -> Result<Option<Sentence>, CacheError> {
        let word = word.to_string();
        let language = language.to_string();
        let provider = provider.to_string();

        self.db
            .execute_async(move |conn| {
                let sentence = conn
                    .query_row(
                        "SELECT text, word, language, provider FROM sentences
                         WHERE word = ?1 AND language = ?2 AND provider = ?3
                         ORDER BY RANDOM() LIMIT 1",
                        (&word, &language, &provider),
                        |row| {
                            Ok(Sentence {
                                text: row.get(0)?,
                                word: row.get(1)?,
                                language: row.get(2)?,
                                provider: row.get(3)?,
                                source: None,
                            })
                        },
                    )
                    .optional()?;
                Ok(sentence)
            })
            .await
    }

    /// Delete all sentences matching the specified filters.
    ///
    /// Missing filters are wildcards; calling with no filters empties the
    /// whole cache. Returns the number of deleted rows.
    pub async fn delete_sentences(
        &self,
        word: Option<&str>,
        language: Option<&str>,
        provider: Option<&str>,
    ) -> Result<usize, CacheError> {
        let word = word.map(str::to_string);
        let language = language.map(str::to_string);
        let provider = provider.map(str::to_string);

        self.db
            .execute_async(move |conn| {
                let mut query = String::from("DELETE FROM sentences");
                let mut clauses: Vec<&str> = Vec::new();
                let mut params: Vec<&dyn ToSql> = Vec::new();

                if let Some(word) = &word {
                    clauses.push("word = ?");
                    params.push(word);
                }
                if let Some(language) = &language {
                    clauses.push("language = ?");
                    params.push(language);
                }
                if let Some(provider) = &provider {
                    clauses.push("provider = ?");
                    params.push(provider);
                }
                if !clauses.is_empty() {
                    query.push_str(" WHERE ");
                    query.push_str(&clauses.join(" AND "));
                }

                let deleted = conn.execute(&query, params.as_slice())?;
                debug!("Deleted {} cached sentences", deleted);
                Ok(deleted)
            })
            .await
    }

    /// Delete a single sentence identified by its text, optionally narrowed
    /// by word/language/provider. Returns the number of deleted rows.
    pub async fn delete_sentence(
        &self,
        text: &str,
        word: Option<&str>,
        language: Option<&str>,
        provider: Option<&str>,
    ) -> Result<usize, CacheError> {
        let text = text.to_string();
        let word = word.map(str::to_string);
        let language = language.map(str::to_string);
        let provider = provider.map(str::to_string);

        self.db
            .execute_async(move |conn| {
                let mut query = String::from("DELETE FROM sentences WHERE text = ?");
                let mut params: Vec<&dyn ToSql> = vec![&text];

                if let Some(word) = &word {
                    query.push_str(" AND word = ?");
                    params.push(word);
                }
                if let Some(language) = &language {
                    query.push_str(" AND language = ?");
                    params.push(language);
                }
                if let Some(provider) = &provider {
                    query.push_str(" AND provider = ?");
                    params.push(provider);
                }

                let deleted = conn.execute(&query, params.as_slice())?;
                Ok(deleted)
            })
            .await
    }

    /// Total number of cached sentences
    pub async fn count_sentences(&self) -> Result<i64, CacheError> {
        self.db
            .execute_async(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM sentences", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }
}
