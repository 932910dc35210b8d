/*!
 * Common test utilities for the sentex test suite
 */

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use sentex::aggregator::SentenceAggregator;
use sentex::database::SentenceRepository;
use sentex::providers::SentenceProvider;
use sentex::registry::ProviderRegistry;

// Re-export the mock providers module
pub mod mock_providers;

/// Initialize logging for tests; safe to call repeatedly
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a fresh in-memory sentence repository
pub fn create_repository() -> SentenceRepository {
    SentenceRepository::new_in_memory().expect("Failed to create in-memory repository")
}

/// Builds an aggregator over a registry holding the given providers
pub fn create_aggregator(providers: Vec<Arc<dyn SentenceProvider>>) -> SentenceAggregator {
    let registry = ProviderRegistry::new();
    for provider in providers {
        registry.register(provider);
    }
    SentenceAggregator::new(Arc::new(registry))
}
