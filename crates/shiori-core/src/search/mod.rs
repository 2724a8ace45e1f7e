//! Fuzzy search over an in-memory corpus.
//!
//! [`SearchEngine`] matches a query against the `title` and `content` of
//! every [`SearchDocument`] and ranks the hits. The per-field matching
//! algorithm sits behind [`FieldMatcher`]; [`BitapMatcher`] is the default
//! and [`SkimMatcher`] is available as an alternative.
//!
//! ## Scoring
//!
//! Each field score lies in `0.0..=1.0` where `0.0` is a perfect match.
//! Field scores are weighted equally and damped by a field-length norm
//! (`1 / sqrt(tokens)`), then multiplied into a document score. Lower is
//! better; ties keep corpus order.
//!
//! ```rust
//! use shiori_core::{SearchDocument, SearchEngine};
//!
//! let docs = vec![SearchDocument::new("introduction", "Intro", "Hello world", "/docs")];
//! let engine = SearchEngine::new(&docs);
//! let results = engine.search("hello");
//!
//! assert_eq!(results.len(), 1);
//! let preview = results[0].content_preview(30, 270).expect("content matched");
//! assert_eq!(preview.matched, "Hello");
//! ```

pub mod bitap;
mod preview;
pub mod skim;

pub use bitap::BitapMatcher;
pub use preview::{ELLIPSIS, Preview, best_match_preview};
pub use skim::SkimMatcher;

use crate::config::{MatcherKind, SearchConfig};
use crate::{MatchRange, SearchDocument};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Default match tolerance.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Weight of each searched field after normalization.
const FIELD_WEIGHT: f64 = 0.5;

/// Outcome of matching one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldScore {
    /// `0.0` = perfect, `1.0` = worst.
    pub score: f64,
    /// Matched character ranges, inclusive.
    pub indices: Vec<MatchRange>,
}

/// Matches a query against a single field value.
pub trait FieldMatcher: Send + Sync {
    /// `None` when `query` does not match `text`.
    fn match_field(&self, text: &str, query: &str) -> Option<FieldScore>;
}

/// Searched document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKey {
    Title,
    Content,
}

impl FieldKey {
    /// Fields in match order.
    pub const ALL: [Self; 2] = [Self::Title, Self::Content];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
        }
    }

    fn value(self, doc: &SearchDocument) -> &str {
        match self {
            Self::Title => &doc.title,
            Self::Content => &doc.content,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match positions in one field of a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch<'a> {
    pub key: FieldKey,
    pub indices: Vec<MatchRange>,
    /// The field text the indices refer to.
    pub value: &'a str,
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub item: &'a SearchDocument,
    /// Position of `item` in the corpus.
    pub ref_index: usize,
    /// Combined score, lower is better.
    pub score: f64,
    /// Field matches, title before content.
    pub matches: Vec<FieldMatch<'a>>,
}

impl<'a> MatchResult<'a> {
    /// The content field match, if the content matched.
    #[must_use]
    pub fn content_match(&self) -> Option<&FieldMatch<'a>> {
        self.matches.iter().find(|m| m.key == FieldKey::Content)
    }

    /// Preview around the best content match.
    #[must_use]
    pub fn content_preview(&self, context_before: usize, context_after: usize) -> Option<Preview> {
        let field = self.content_match()?;
        best_match_preview(field.value, &field.indices, context_before, context_after)
    }
}

/// Query-time settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub threshold: f64,
    pub matcher: MatcherKind,
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            matcher: MatcherKind::Bitap,
            limit: None,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            threshold: config.threshold,
            matcher: config.matcher,
            limit: config.limit,
        }
    }
}

/// Fuzzy search over a borrowed corpus.
pub struct SearchEngine<'a> {
    docs: &'a [SearchDocument],
    norms: Vec<[f64; 2]>,
    matcher: Box<dyn FieldMatcher>,
    limit: Option<usize>,
}

impl<'a> SearchEngine<'a> {
    /// Engine with the default Bitap matcher.
    #[must_use]
    pub fn new(docs: &'a [SearchDocument]) -> Self {
        Self::with_options(docs, &SearchOptions::default())
    }

    #[must_use]
    pub fn with_options(docs: &'a [SearchDocument], options: &SearchOptions) -> Self {
        let matcher: Box<dyn FieldMatcher> = match options.matcher {
            MatcherKind::Bitap => Box::new(BitapMatcher::new(options.threshold)),
            MatcherKind::Skim => Box::new(SkimMatcher::new()),
        };
        Self::with_matcher(docs, matcher).limit(options.limit)
    }

    /// Engine using a custom matcher.
    #[must_use]
    pub fn with_matcher(docs: &'a [SearchDocument], matcher: Box<dyn FieldMatcher>) -> Self {
        let norms = docs
            .iter()
            .map(|doc| FieldKey::ALL.map(|key| field_norm(key.value(doc))))
            .collect();
        Self {
            docs,
            norms,
            matcher,
            limit: None,
        }
    }

    /// Cap the number of results.
    #[must_use]
    pub const fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub const fn len(&self) -> usize {
        self.docs.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Rank the corpus against `query`.
    ///
    /// A blank query yields no results.
    pub fn search(&self, query: &str) -> Vec<MatchResult<'a>> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let mut results: Vec<MatchResult<'a>> = self
            .docs
            .iter()
            .enumerate()
            .filter_map(|(ref_index, doc)| self.match_document(ref_index, doc, query))
            .collect();

        results.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.ref_index.cmp(&b.ref_index))
        });
        if let Some(limit) = self.limit {
            results.truncate(limit);
        }

        debug!(
            "Query '{}' matched {} of {} documents",
            query,
            results.len(),
            self.docs.len()
        );
        results
    }

    fn match_document(
        &self,
        ref_index: usize,
        doc: &'a SearchDocument,
        query: &str,
    ) -> Option<MatchResult<'a>> {
        let mut matched = false;
        let mut score = 1.0;
        let mut matches = Vec::new();

        for (slot, key) in FieldKey::ALL.into_iter().enumerate() {
            let value = key.value(doc);
            if value.trim().is_empty() {
                continue;
            }
            let Some(field) = self.matcher.match_field(value, query) else {
                continue;
            };

            matched = true;
            let norm = self.norms[ref_index][slot];
            score *= field.score.max(f64::EPSILON).powf(FIELD_WEIGHT * norm);

            if !field.indices.is_empty() {
                matches.push(FieldMatch {
                    key,
                    indices: field.indices,
                    value,
                });
            }
        }

        matched.then_some(MatchResult {
            item: doc,
            ref_index,
            score,
            matches,
        })
    }
}

impl fmt::Debug for SearchEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("docs", &self.docs.len())
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

/// Field-length norm `1 / sqrt(tokens)`, rounded to three decimals.
///
/// Tokens are runs of non-space characters.
#[must_use]
pub fn field_norm(value: &str) -> f64 {
    let tokens = value.split(' ').filter(|t| !t.is_empty()).count().max(1);
    #[allow(clippy::cast_precision_loss)]
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}

/// Lowercase per character so offsets stay aligned with the source text.
pub(crate) fn fold_case(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<SearchDocument> {
        vec![
            SearchDocument::new(
                "installation",
                "Installation",
                "Install the theme with your package manager.",
                "/docs/installation",
            ),
            SearchDocument::new(
                "configuration",
                "Configuration",
                "Configure the sidebar and the search index.",
                "/docs/configuration",
            ),
            SearchDocument::new("empty", "Empty", "", "/docs/empty"),
        ]
    }

    #[test]
    fn test_field_norm_rounding() {
        assert!((field_norm("one") - 1.0).abs() < f64::EPSILON);
        assert!((field_norm("one two") - 0.707).abs() < 1e-12);
        assert!((field_norm("a  b   c") - 0.577).abs() < 1e-12);
        assert!((field_norm("line\nbreaks count as one") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let docs = corpus();
        let engine = SearchEngine::new(&docs);
        assert!(engine.search("").is_empty());
        assert!(engine.search("   ").is_empty());
    }

    #[test]
    fn test_results_ranked_best_first() {
        let docs = corpus();
        let engine = SearchEngine::new(&docs);
        let results = engine.search("configuration");

        assert!(!results.is_empty());
        assert_eq!(results[0].item.id, "configuration");
        assert!(results.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_title_match_listed_before_content() {
        let docs = corpus();
        let engine = SearchEngine::new(&docs);
        let results = engine.search("install");
        let first = &results[0];

        assert_eq!(first.item.id, "installation");
        let keys: Vec<_> = first.matches.iter().map(|m| m.key).collect();
        assert_eq!(keys, vec![FieldKey::Title, FieldKey::Content]);
    }

    #[test]
    fn test_blank_fields_are_not_matched() {
        let docs = corpus();
        let engine = SearchEngine::new(&docs);
        let results = engine.search("empty");

        let hit = results
            .iter()
            .find(|r| r.item.id == "empty")
            .expect("title matches");
        assert!(hit.content_match().is_none());
        assert!(hit.content_preview(30, 270).is_none());
    }

    #[test]
    fn test_limit_truncates() {
        let docs = corpus();
        let engine = SearchEngine::new(&docs).limit(Some(1));
        assert_eq!(engine.search("the").len(), 1);
    }

    #[test]
    fn test_equal_scores_keep_corpus_order() {
        let docs = vec![
            SearchDocument::new("a", "Guide", "guide", "/docs/a"),
            SearchDocument::new("b", "Guide", "guide", "/docs/b"),
        ];
        let engine = SearchEngine::new(&docs);
        let ids: Vec<_> = engine.search("guide").iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_custom_matcher_seam() {
        struct Exact;
        impl FieldMatcher for Exact {
            fn match_field(&self, text: &str, query: &str) -> Option<FieldScore> {
                let start = text.find(query)?;
                Some(FieldScore {
                    score: 0.0,
                    indices: vec![MatchRange(start, start + query.len() - 1)],
                })
            }
        }

        let docs = corpus();
        let engine = SearchEngine::with_matcher(&docs, Box::new(Exact));
        let results = engine.search("sidebar");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matches[0].indices, vec![MatchRange(14, 20)]);
    }

    #[test]
    fn test_skim_option_selects_skim_matcher() {
        let docs = corpus();
        let options = SearchOptions {
            matcher: MatcherKind::Skim,
            ..SearchOptions::default()
        };
        let engine = SearchEngine::with_options(&docs, &options);
        let results = engine.search("cfg");

        assert!(results.iter().any(|r| r.item.id == "configuration"));
    }
}
