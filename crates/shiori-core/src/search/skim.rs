//! Subsequence matching backed by `fuzzy-matcher`'s Skim V2 algorithm.

use super::{FieldMatcher, FieldScore, fold_case};
use crate::MatchRange;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Skim matcher.
///
/// Skim scores grow with match quality; they are mapped onto the engine's
/// `0.0 = perfect` scale by comparing against the score the query earns
/// when matched against itself.
pub struct SkimMatcher {
    inner: SkimMatcherV2,
}

impl SkimMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl Default for SkimMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SkimMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkimMatcher").finish_non_exhaustive()
    }
}

impl FieldMatcher for SkimMatcher {
    fn match_field(&self, text: &str, query: &str) -> Option<FieldScore> {
        let pattern: String = fold_case(query).into_iter().collect();
        if pattern.is_empty() {
            return None;
        }
        let choice: String = fold_case(text).into_iter().collect();

        let (raw, positions) = self.inner.fuzzy_indices(&choice, &pattern)?;
        let ideal = self.inner.fuzzy_match(&pattern, &pattern).unwrap_or(raw).max(1);

        #[allow(clippy::cast_precision_loss)]
        let score = if choice == pattern {
            0.0
        } else {
            (1.0 - raw as f64 / ideal as f64).clamp(0.0, 1.0)
        };

        Some(FieldScore {
            score,
            indices: group_positions(&positions),
        })
    }
}

/// Group sorted character positions into contiguous inclusive ranges.
fn group_positions(positions: &[usize]) -> Vec<MatchRange> {
    let mut ranges: Vec<MatchRange> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some(last) if last.1 + 1 == pos => last.1 = pos,
            _ => ranges.push(MatchRange(pos, pos)),
        }
    }
    ranges
}
