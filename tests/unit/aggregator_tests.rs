/*!
 * Unit tests for the aggregation engine
 */

use std::sync::atomic::Ordering;

use sentex::database::Sentence;
use sentex::errors::ProviderError;

use crate::common::{create_aggregator, create_repository, mock_providers};

#[tokio::test]
async fn test_getSentences_cachePreloaded_shouldReturnCachedSentenceUnmodified() {
    // Cache preloaded with one sentence; the provider itself finds nothing
    let repo = create_repository();
    repo.add_sentences(&[Sentence::new("I love the world.", "world", "eng", "test")])
        .await
        .unwrap();
    let aggregator = create_aggregator(vec![mock_providers::empty("test", &["eng"], repo)]);

    let providers = vec!["test".to_string()];
    let sentences = aggregator
        .get_sentences("world", Some("eng"), Some(&providers), Some(5))
        .await
        .unwrap();

    assert_eq!(sentences.len(), 1);
    let sentence = &sentences[0];
    assert_eq!(sentence.text, "I love the world.");
    assert_eq!(sentence.word, "world");
    assert_eq!(sentence.language, "eng");
    assert_eq!(sentence.provider, "test");
}

#[tokio::test]
async fn test_getSentences_oneProviderFailing_shouldStillReachLimit() {
    let aggregator = create_aggregator(vec![
        mock_providers::working("a", &["eng"], &["A1", "A2"], create_repository()),
        mock_providers::failing("b", &["eng"], create_repository()),
    ]);

    for _ in 0..10 {
        let sentences = aggregator
            .get_sentences("x", Some("eng"), None, Some(2))
            .await
            .expect("B's failure must not propagate");
        assert_eq!(sentences.len(), 2);
        assert!(sentences.iter().all(|s| s.provider == "a"));
    }
}

#[tokio::test]
async fn test_getSentences_limitZero_shouldReturnEmpty() {
    let aggregator = create_aggregator(vec![mock_providers::working(
        "a",
        &["eng"],
        &["A1"],
        create_repository(),
    )]);

    let sentences = aggregator
        .get_sentences("x", Some("eng"), None, Some(0))
        .await
        .unwrap();
    assert!(sentences.is_empty());
}

#[tokio::test]
async fn test_getSentences_explicitEmptyProviders_shouldIgnoreCacheContents() {
    let repo = create_repository();
    repo.add_sentences(&[Sentence::new("Cached.", "x", "eng", "a")])
        .await
        .unwrap();
    let aggregator = create_aggregator(vec![mock_providers::working(
        "a",
        &["eng"],
        &["A1"],
        repo,
    )]);

    let sentences = aggregator
        .get_sentences("x", Some("eng"), Some(&[]), None)
        .await
        .unwrap();
    assert!(sentences.is_empty());
}

#[tokio::test]
async fn test_getSentences_providerNameFilter_shouldExcludeOthers() {
    let (a, a_counter) =
        mock_providers::working_with_counter("a", &["eng"], &["A1"], create_repository());
    let (b, b_counter) =
        mock_providers::working_with_counter("b", &["eng"], &["B1"], create_repository());
    let aggregator = create_aggregator(vec![a, b]);

    let providers = vec!["b".to_string()];
    let sentences = aggregator
        .get_sentences("x", Some("eng"), Some(&providers), None)
        .await
        .unwrap();

    assert!(sentences.iter().all(|s| s.provider == "b"));
    assert_eq!(a_counter.load(Ordering::SeqCst), 0);
    assert_eq!(b_counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_getSentences_downsampling_shouldRespectLimitAcrossProviders() {
    let aggregator = create_aggregator(vec![
        mock_providers::working(
            "a",
            &["eng"],
            &["A1", "A2", "A3", "A4", "A5"],
            create_repository(),
        ),
        mock_providers::working(
            "b",
            &["eng"],
            &["B1", "B2", "B3", "B4", "B5"],
            create_repository(),
        ),
    ]);

    for _ in 0..10 {
        let sentences = aggregator
            .get_sentences("x", Some("eng"), None, Some(3))
            .await
            .unwrap();
        assert_eq!(sentences.len(), 3);
    }
}

#[tokio::test]
async fn test_getSentences_displayNameKeyedProvider_shouldSurfaceUnsupportedLanguage() {
    // A provider advertising a display name instead of a code passes the
    // registry's legacy capability fallback but rejects the canonical code in
    // fetch. As the only candidate its error becomes the visible result.
    let aggregator = create_aggregator(vec![mock_providers::working(
        "legacy",
        &["English"],
        &["A"],
        create_repository(),
    )]);

    let result = aggregator.get_sentences("word", Some("eng"), None, Some(1)).await;

    match result {
        Err(ProviderError::UnsupportedLanguage { language, provider }) => {
            assert_eq!(language, "eng");
            assert_eq!(provider, "legacy");
        }
        other => panic!("Expected UnsupportedLanguage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_getSentences_missingCredential_shouldSurfaceWhenOnlyCandidate() {
    let repo = create_repository();
    let provider = sentex::providers::mock::MockSentenceProvider::new(
        "keyed",
        &["eng"],
        sentex::providers::mock::MockBehavior::MissingCredential,
        repo,
    );
    let aggregator = create_aggregator(vec![std::sync::Arc::new(provider)]);

    let result = aggregator.get_sentences("x", Some("eng"), None, Some(1)).await;
    match result {
        Err(ProviderError::MissingCredential { provider }) => assert_eq!(provider, "keyed"),
        other => panic!("Expected MissingCredential, got {:?}", other),
    }
}

#[tokio::test]
async fn test_syncSentences_withProviderFilter_shouldOnlyRefreshThatProvider() {
    let (a, a_counter) =
        mock_providers::working_with_counter("a", &["eng"], &["A1"], create_repository());
    let (b, b_counter) =
        mock_providers::working_with_counter("b", &["eng"], &["B1"], create_repository());
    let aggregator = create_aggregator(vec![a, b]);

    aggregator.sync_sentences("x", Some("eng"), Some("a")).await;

    assert_eq!(a_counter.load(Ordering::SeqCst), 1);
    assert_eq!(b_counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_syncSentences_withFailingProvider_shouldNotPanic() {
    let aggregator = create_aggregator(vec![mock_providers::failing(
        "broken",
        &["eng"],
        create_repository(),
    )]);

    // Errors are logged and swallowed
    aggregator.sync_sentences("x", Some("eng"), None).await;
}
