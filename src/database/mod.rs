/*!
 * Database module for persistent storage of fetched sentences.
 *
 * This module provides SQLite-based persistence for the sentence cache:
 * - Durable store of previously fetched sentences
 * - Queryable and deletable by word/language/provider
 */

// Allow dead code and unused imports - database types are for library consumers
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export main types
pub use connection::DatabaseConnection;
pub use models::Sentence;
pub use repository::SentenceRepository;
