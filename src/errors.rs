/*!
 * Error types for the sentex application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when fetching sentences from a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Requested language is not in the provider's capability set
    #[error("Language \"{language}\" is not supported by provider \"{provider}\"")]
    UnsupportedLanguage {
        /// Requested language code
        language: String,
        /// Name of the provider that rejected it
        provider: String,
    },

    /// Provider requires configuration that is absent at call time
    #[error("Provider \"{provider}\" requires an API key but none is configured")]
    MissingCredential {
        /// Name of the provider missing its credential
        provider: String,
    },

    /// Error when making a network request fails
    #[error("Request to provider \"{provider}\" failed: {message}")]
    RequestFailed {
        /// Name of the failing provider
        provider: String,
        /// Underlying cause description
        message: String,
    },

    /// Error when extracting sentences from a response fails
    #[error("Failed to parse response from provider \"{provider}\": {message}")]
    ParseError {
        /// Name of the failing provider
        provider: String,
        /// Underlying cause description
        message: String,
    },

    /// Error returned by the upstream service itself
    #[error("Provider \"{provider}\" responded with error: {status_code} - {message}")]
    ApiError {
        /// Name of the failing provider
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },
}

impl ProviderError {
    /// Name of the provider this error originated from
    pub fn provider(&self) -> &str {
        match self {
            Self::UnsupportedLanguage { provider, .. }
            | Self::MissingCredential { provider }
            | Self::RequestFailed { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::ApiError { provider, .. } => provider,
        }
    }
}

/// Errors that can occur inside the sentence cache.
///
/// These never escape the aggregation hot path: a failing cache read is
/// treated as a miss so that a broken cache degrades to network-only fetching.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Underlying SQLite failure
    #[error("Cache storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Connection lock was poisoned by a panicking thread
    #[error("Cache lock poisoned: {0}")]
    Lock(String),

    /// Background cache task panicked or was cancelled
    #[error("Cache task failed: {0}")]
    Task(String),

    /// Schema version is ahead of what this build understands
    #[error("Unknown cache schema version: {0}")]
    SchemaVersion(i32),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the sentence cache
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error in configuration handling
    #[error("Config error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
