/*!
 * # sentex - example sentence aggregation
 *
 * A Rust library for fetching example sentences containing a target word
 * from multiple dictionary/corpus sources, with a local cache.
 *
 * ## Features
 *
 * - Pluggable sentence providers behind one polymorphic contract:
 *   - Tatoeba (locally imported corpora)
 *   - Jisho, Massif, Nadeshiko (Japanese)
 *   - Oxford Learner's Dictionaries, Dictionary.com (English)
 *   - TDK, SesliSozluk (Turkish)
 *   - Glosbe (multi-language)
 * - SQLite-backed sentence cache, consulted before any network fetch
 * - Aggregation across providers under a result-count limit, with random
 *   provider ordering and random over-limit trimming for variety
 * - ISO 639-1 and ISO 639-3 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: Sentence cache persistence:
 *   - `database::connection`: SQLite connection handling
 *   - `database::schema`: Cache schema and version marker
 *   - `database::repository`: Typed cache operations
 * - `providers`: Adapters for the external sentence sources
 * - `registry`: The set of active providers and capability lookups
 * - `aggregator`: Provider selection, cache/network merge, limit trimming
 * - `language_utils`: ISO language code utilities
 * - `request`: Shared HTTP plumbing for the network providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod aggregator;
pub mod app_config;
pub mod database;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod registry;
pub mod request;

// Re-export main types for easier usage
pub use aggregator::SentenceAggregator;
pub use app_config::Config;
pub use database::{DatabaseConnection, Sentence, SentenceRepository};
pub use errors::{AppError, CacheError, ProviderError};
pub use language_utils::{canonical_code, get_language_name, language_codes_match};
pub use providers::SentenceProvider;
pub use registry::ProviderRegistry;
