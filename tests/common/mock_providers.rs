/*!
 * Mock provider helpers shared by the test suite.
 *
 * Thin constructors around the library's mock provider so tests can build
 * registries in one line.
 */

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use sentex::database::SentenceRepository;
use sentex::providers::SentenceProvider;
use sentex::providers::mock::MockSentenceProvider;

/// A provider that returns the scripted sentences for every fetch
pub fn working(
    name: &str,
    languages: &[&str],
    texts: &[&str],
    repository: SentenceRepository,
) -> Arc<dyn SentenceProvider> {
    Arc::new(MockSentenceProvider::working(
        name, languages, texts, repository,
    ))
}

/// A provider that always fails with a request error
pub fn failing(
    name: &str,
    languages: &[&str],
    repository: SentenceRepository,
) -> Arc<dyn SentenceProvider> {
    Arc::new(MockSentenceProvider::failing(name, languages, repository))
}

/// A provider that always succeeds but finds nothing
pub fn empty(
    name: &str,
    languages: &[&str],
    repository: SentenceRepository,
) -> Arc<dyn SentenceProvider> {
    Arc::new(MockSentenceProvider::empty(name, languages, repository))
}

/// A working provider plus a shared handle to its fetch counter
pub fn working_with_counter(
    name: &str,
    languages: &[&str],
    texts: &[&str],
    repository: SentenceRepository,
) -> (Arc<dyn SentenceProvider>, Arc<AtomicUsize>) {
    let provider = MockSentenceProvider::working(name, languages, texts, repository);
    let counter = provider.fetch_counter();
    (Arc::new(provider), counter)
}
