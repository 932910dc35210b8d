/*!
 * Unit tests for the sentence cache repository
 */

use std::collections::HashSet;

use sentex::database::Sentence;

use crate::common::create_repository;

#[tokio::test]
async fn test_getSentences_withLimitAboveRowCount_shouldReturnAllRows() {
    let repo = create_repository();
    repo.add_sentences(&[
        Sentence::new("A", "word", "eng", "test"),
        Sentence::new("B", "word", "eng", "test"),
    ])
    .await
    .unwrap();

    let sentences = repo
        .get_sentences(Some("word"), None, None, Some(50))
        .await
        .unwrap();
    assert_eq!(sentences.len(), 2);
}

#[tokio::test]
async fn test_getSentences_withLimit_shouldReturnSubsetOfInsertedRows() {
    let repo = create_repository();
    let inserted: Vec<Sentence> = (0..20)
        .map(|i| Sentence::new(format!("Sentence {}", i), "word", "eng", "test"))
        .collect();
    repo.add_sentences(&inserted).await.unwrap();

    let inserted_texts: HashSet<String> = inserted.iter().map(|s| s.text.clone()).collect();
    let sentences = repo
        .get_sentences(Some("word"), None, None, Some(5))
        .await
        .unwrap();

    assert_eq!(sentences.len(), 5);
    for sentence in &sentences {
        assert!(inserted_texts.contains(&sentence.text));
    }
}

#[tokio::test]
async fn test_addSentences_withEmptyBatch_shouldBeNoOp() {
    let repo = create_repository();
    repo.add_sentences(&[]).await.unwrap();
    assert_eq!(repo.count_sentences().await.unwrap(), 0);
}

#[tokio::test]
async fn test_addSentences_mixedBatchWithDuplicates_shouldUpsert() {
    let repo = create_repository();
    repo.add_sentences(&[Sentence::new("A", "word", "eng", "test")])
        .await
        .unwrap();

    // One duplicate of an existing row, one new row
    repo.add_sentences(&[
        Sentence::new("A", "word", "eng", "test"),
        Sentence::new("B", "word", "eng", "test"),
    ])
    .await
    .unwrap();

    assert_eq!(repo.count_sentences().await.unwrap(), 2);
}

#[tokio::test]
async fn test_deleteSentences_withNoFilters_shouldEmptyCache() {
    let repo = create_repository();
    repo.add_sentences(&[
        Sentence::new("A", "apple", "eng", "p1"),
        Sentence::new("B", "pear", "tur", "p2"),
    ])
    .await
    .unwrap();

    let deleted = repo.delete_sentences(None, None, None).await.unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(repo.count_sentences().await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleteSentences_byLanguageAndProvider_shouldConjoinFilters() {
    let repo = create_repository();
    repo.add_sentences(&[
        Sentence::new("A", "apple", "eng", "p1"),
        Sentence::new("B", "apple", "eng", "p2"),
        Sentence::new("C", "apple", "tur", "p1"),
    ])
    .await
    .unwrap();

    let deleted = repo
        .delete_sentences(None, Some("eng"), Some("p1"))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = repo.get_sentences(None, None, None, None).await.unwrap();
    let texts: HashSet<&str> = remaining.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, HashSet::from(["B", "C"]));
}

#[tokio::test]
async fn test_getRandomSentence_shouldComeFromMatchingRows() {
    let repo = create_repository();
    repo.add_sentences(&[
        Sentence::new("A", "word", "eng", "test"),
        Sentence::new("B", "word", "eng", "test"),
        Sentence::new("C", "other", "eng", "test"),
    ])
    .await
    .unwrap();

    for _ in 0..10 {
        let sentence = repo
            .get_random_sentence("word", "eng", "test")
            .await
            .unwrap()
            .expect("expected a cached sentence");
        assert!(sentence.text == "A" || sentence.text == "B");
    }
}
