use proptest::prelude::*;
use textsearch_core::config::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use textsearch_core::{DocId, DocumentStatus, SearchError, SearchServer};

fn pets() -> SearchServer {
    let mut server = SearchServer::with_stop_words("and in on the with").unwrap();
    server.add_document(2, "white cat and fashion collar", DocumentStatus::Actual, &[8, -3]).unwrap();
    server.add_document(7, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
    server.add_document(9, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
    server.add_document(10, "groomed starling evgen", DocumentStatus::Banned, &[9]).unwrap();
    server
}

#[test]
fn default_query_ranks_actual_documents() {
    let server = pets();
    let found = server.find_top_documents("fluffy groomed cat with collar").unwrap();
    let ids: Vec<DocId> = found.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![7, 2, 9]);
    for doc in &found {
        let (status, _) = server.document_status_and_tokens(doc.id).unwrap();
        assert_eq!(status, DocumentStatus::Actual);
    }
    assert!(found.windows(2).all(|w| w[0].relevance >= w[1].relevance));
}

#[test]
fn average_rating_is_truncated_mean() {
    let mut server = SearchServer::new();
    server.add_document(1, "cat", DocumentStatus::Actual, &[8, -3]).unwrap();
    server.add_document(2, "cat", DocumentStatus::Actual, &[]).unwrap();
    server.add_document(3, "dog", DocumentStatus::Actual, &[]).unwrap();
    let found = server.find_top_documents("cat").unwrap();
    assert_eq!(found.iter().map(|d| (d.id, d.rating)).collect::<Vec<_>>(), vec![(1, 2), (2, 0)]);
}

#[test]
fn match_document_returns_plus_terms() {
    let mut server = SearchServer::with_stop_words("and in on the").unwrap();
    server.add_document(42, "big cat in the city", DocumentStatus::Irrelevant, &[1, 2]).unwrap();
    server.add_document(43, "small dog", DocumentStatus::Actual, &[3]).unwrap();

    let (mut words, status) = server.match_document("big cat", 42).unwrap();
    words.sort();
    assert_eq!(words, vec!["big".to_string(), "cat".to_string()]);
    assert_eq!(status, DocumentStatus::Irrelevant);

    let (words, _) = server.match_document("the big -cat", 42).unwrap();
    assert!(words.is_empty());
}

#[test]
fn absent_terms_match_nothing() {
    let server = pets();
    assert!(server.find_top_documents("penguin").unwrap().is_empty());
    assert!(server.find_top_documents("penguin -walrus").unwrap().is_empty());
    assert!(server.match_document("penguin", 7).unwrap().0.is_empty());
}

#[test]
fn malformed_queries_are_rejected() {
    let server = pets();
    assert!(matches!(server.find_top_documents("cat -"), Err(SearchError::InvalidQuery(_))));
    assert!(matches!(server.find_top_documents("--cat"), Err(SearchError::InvalidQuery(_))));
    assert!(matches!(server.match_document("cat --", 7), Err(SearchError::InvalidQuery(_))));
}

#[test]
fn invalid_stop_words_fail_construction() {
    assert_eq!(
        SearchServer::with_stop_words("and \u{7}bell").unwrap_err(),
        SearchError::InvalidToken("\u{7}bell".to_string())
    );
    assert!(SearchServer::from_stop_words(["and", "in"]).is_ok());
    assert!(SearchServer::from_stop_words(["and", ""]).is_err());
}

#[test]
fn positional_ids_and_unknown_documents() {
    let server = pets();
    assert_eq!(server.document_count(), 4);
    assert_eq!(server.document_id_at(1), Ok(7));
    assert!(matches!(server.document_id_at(10), Err(SearchError::OutOfRange { .. })));
    assert_eq!(server.match_document("cat", 100), Err(SearchError::UnknownDocument(100)));
}

const VOCAB: &[&str] = &["cat", "dog", "owl", "fox", "the", "tail", "eyes"];

fn corpus_strategy() -> impl Strategy<Value = Vec<(Vec<usize>, Vec<i32>, u8)>> {
    prop::collection::vec(
        (
            prop::collection::vec(0..VOCAB.len(), 0..6),
            prop::collection::vec(-20i32..20, 0..4),
            0u8..4,
        ),
        1..12,
    )
}

fn status_of(n: u8) -> DocumentStatus {
    match n {
        0 => DocumentStatus::Actual,
        1 => DocumentStatus::Irrelevant,
        2 => DocumentStatus::Banned,
        _ => DocumentStatus::Removed,
    }
}

fn build(corpus: &[(Vec<usize>, Vec<i32>, u8)]) -> SearchServer {
    let mut server = SearchServer::with_stop_words("the").unwrap();
    for (id, (words, ratings, status)) in corpus.iter().enumerate() {
        let text: Vec<&str> = words.iter().map(|&w| VOCAB[w]).collect();
        server.add_document(id as DocId, &text.join(" "), status_of(*status), ratings).unwrap();
    }
    server
}

proptest! {
    /// Property: results are capped and ordered by relevance, then rating
    #[test]
    fn prop_results_capped_and_ordered(corpus in corpus_strategy(), query in prop::collection::vec(0..VOCAB.len(), 1..4)) {
        let server = build(&corpus);
        let raw: Vec<&str> = query.iter().map(|&w| VOCAB[w]).collect();
        let found = server.find_top_documents_with(&raw.join(" "), |_, _, _| true).unwrap();
        prop_assert!(found.len() <= MAX_RESULT_DOCUMENT_COUNT);
        for pair in found.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON {
                prop_assert!(a.rating >= b.rating, "tie broken by rating: {} then {}", a, b);
            } else {
                prop_assert!(a.relevance > b.relevance, "relevance order: {} then {}", a, b);
            }
        }
    }

    /// Property: any document containing a minus term never appears
    #[test]
    fn prop_minus_term_excludes(corpus in corpus_strategy(), plus in 0..VOCAB.len(), minus in 0..VOCAB.len()) {
        let server = build(&corpus);
        let raw = format!("{} -{}", VOCAB[plus], VOCAB[minus]);
        let found = server.find_top_documents_with(&raw, |_, _, _| true).unwrap();
        for doc in found {
            let (_, tokens) = server.document_status_and_tokens(doc.id).unwrap();
            prop_assert!(!tokens.iter().any(|t| t == VOCAB[minus]));
        }
    }

    /// Property: rejected additions leave the document count unchanged
    #[test]
    fn prop_rejected_add_keeps_count(corpus in corpus_strategy(), negative in i32::MIN..0) {
        let mut server = build(&corpus);
        let before = server.document_count();
        prop_assert_eq!(server.add_document(negative, "cat", DocumentStatus::Actual, &[]), Err(SearchError::InvalidId(negative)));
        prop_assert_eq!(server.add_document(0, "cat", DocumentStatus::Actual, &[]), Err(SearchError::InvalidId(0)));
        prop_assert_eq!(server.document_count(), before);
    }

    /// Property: the status overload agrees with an equivalent predicate
    #[test]
    fn prop_status_overload_matches_predicate(corpus in corpus_strategy(), word in 0..VOCAB.len(), status in 0u8..4) {
        let server = build(&corpus);
        let status = status_of(status);
        let by_status = server.find_top_documents_by_status(VOCAB[word], status).unwrap();
        let by_predicate = server.find_top_documents_with(VOCAB[word], |_, s, _| s == status).unwrap();
        prop_assert_eq!(by_status, by_predicate);
    }
}
