#![allow(clippy::expect_used, clippy::unwrap_used)]

use shiori_core::search::{best_match_preview, field_norm};
use shiori_core::{
    FieldKey, MatchRange, MatcherKind, SearchDocument, SearchEngine, SearchOptions,
};

fn hello_corpus() -> Vec<SearchDocument> {
    vec![SearchDocument::new("introduction", "Intro", "Hello world", "/docs")]
}

#[test]
fn hello_query_matches_content_range() {
    let docs = hello_corpus();
    let results = SearchEngine::new(&docs).search("hello");

    assert_eq!(results.len(), 1);
    let hit = &results[0];
    assert_eq!(hit.ref_index, 0);
    assert_eq!(hit.matches.len(), 1);

    let content = hit.content_match().expect("content matched");
    assert_eq!(content.key, FieldKey::Content);
    assert_eq!(content.value, "Hello world");
    assert!(content.indices.contains(&MatchRange(0, 4)));
}

#[test]
fn empty_query_has_no_results() {
    let docs = hello_corpus();
    assert!(SearchEngine::new(&docs).search("").is_empty());
}

#[test]
fn preview_around_best_match() {
    let docs = hello_corpus();
    let results = SearchEngine::new(&docs).search("hello");
    let preview = results[0].content_preview(30, 270).expect("preview");

    assert_eq!(preview.to_plain(), "[Hello] world");
}

#[test]
fn preview_window_for_long_text() {
    let text: String = (0..400).map(|i| if i % 2 == 0 { 'a' } else { 'b' }).collect();
    let preview = best_match_preview(&text, &[MatchRange(190, 200)], 30, 270).expect("preview");

    assert!(preview.leading_ellipsis);
    assert!(!preview.trailing_ellipsis);
    assert_eq!(preview.before, text[160..190]);
    assert_eq!(preview.matched, text[190..=200]);
    assert_eq!(preview.after, text[201..]);
}

#[test]
fn score_combines_weighted_field_scores() {
    let docs = vec![SearchDocument::new("a", "unrelated", "search engine", "/docs/a")];
    let results = SearchEngine::new(&docs).search("search");
    let hit = &results[0];

    // Only content matched: 0.001 ^ (0.5 * norm("search engine")).
    let expected = 0.001_f64.powf(0.5 * field_norm("search engine"));
    assert!((hit.score - expected).abs() < 1e-12);
}

#[test]
fn exact_title_outranks_partial_content() {
    let docs = vec![
        SearchDocument::new("b", "Overview", "Read about theming and more", "/docs/b"),
        SearchDocument::new("a", "Theming", "Colors and fonts", "/docs/a"),
    ];
    let results = SearchEngine::new(&docs).search("theming");

    assert_eq!(results[0].item.id, "a");
    assert_eq!(results[1].item.id, "b");
}

#[test]
fn options_limit_and_matcher() {
    let docs = vec![
        SearchDocument::new("a", "Alpha", "shared words", "/docs/a"),
        SearchDocument::new("b", "Beta", "shared words", "/docs/b"),
    ];
    let options = SearchOptions {
        matcher: MatcherKind::Skim,
        limit: Some(1),
        ..SearchOptions::default()
    };
    let results = SearchEngine::with_options(&docs, &options).search("shared");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item.id, "a");
}
