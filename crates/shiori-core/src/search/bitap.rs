//! Approximate substring matching with the Bitap algorithm.
//!
//! Scoring ignores where in the text a match occurs: a match with `k`
//! errors scores `k / pattern_len`. Patterns longer than [`MAX_BITS`]
//! characters are split into chunks that are searched independently and
//! whose scores are averaged.
//!
//! The reported ranges cover every run of text characters that occur in the
//! pattern's alphabet, so a query for `hello` against `hello world` reports
//! `(0, 4)` plus the stray `o` and `l` of `world`.

use super::{FieldMatcher, FieldScore, DEFAULT_THRESHOLD, fold_case};
use crate::MatchRange;
use std::collections::HashMap;

/// Longest pattern chunk searched in one pass.
pub const MAX_BITS: usize = 32;

const MIN_SCORE: f64 = 0.001;

/// Bitap matcher with an error threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitapMatcher {
    threshold: f64,
}

impl BitapMatcher {
    /// `threshold` is the worst accepted score, 0.0 = exact only.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for BitapMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl FieldMatcher for BitapMatcher {
    fn match_field(&self, text: &str, query: &str) -> Option<FieldScore> {
        let pattern = fold_case(query);
        if pattern.is_empty() {
            return None;
        }

        let text = fold_case(text);
        if pattern == text {
            return Some(FieldScore {
                score: 0.0,
                indices: vec![MatchRange(0, text.len() - 1)],
            });
        }

        let chunks = chunk_pattern(&pattern);
        let mut total_score = 0.0;
        let mut matched = false;
        let mut indices = Vec::new();

        for chunk in &chunks {
            let outcome = chunk.search(&text, self.threshold);
            total_score += outcome.score;
            if let Some(ranges) = outcome.indices {
                matched = true;
                indices.extend(ranges);
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let score = total_score / chunks.len() as f64;
        matched.then_some(FieldScore { score, indices })
    }
}

struct Chunk<'p> {
    pattern: &'p [char],
    alphabet: HashMap<char, u64>,
    start_index: usize,
}

struct ChunkOutcome {
    score: f64,
    /// `Some` only when the chunk matched.
    indices: Option<Vec<MatchRange>>,
}

fn chunk_pattern(pattern: &[char]) -> Vec<Chunk<'_>> {
    let len = pattern.len();
    if len <= MAX_BITS {
        return vec![Chunk::new(pattern, 0)];
    }

    let remainder = len % MAX_BITS;
    let mut chunks: Vec<_> = (0..len - remainder)
        .step_by(MAX_BITS)
        .map(|i| Chunk::new(&pattern[i..i + MAX_BITS], i))
        .collect();

    // The tail overlaps the previous chunk so every chunk has full width.
    if remainder > 0 {
        let start = len - MAX_BITS;
        chunks.push(Chunk::new(&pattern[start..], start));
    }
    chunks
}

impl<'p> Chunk<'p> {
    fn new(pattern: &'p [char], start_index: usize) -> Self {
        let len = pattern.len();
        let mut alphabet: HashMap<char, u64> = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            *alphabet.entry(c).or_default() |= 1 << (len - i - 1);
        }
        Self {
            pattern,
            alphabet,
            start_index,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn error_score(&self, errors: usize) -> f64 {
        errors as f64 / self.pattern.len() as f64
    }

    fn search(&self, text: &[char], threshold: f64) -> ChunkOutcome {
        let pattern_len = self.pattern.len();
        let text_len = text.len();
        let expected = self.start_index.min(text_len);
        let finish = text_len + pattern_len;

        let mut current_threshold = threshold;
        let mut match_mask = vec![false; finish];

        // Exact occurrences settle the threshold before the fuzzy pass.
        let mut from = expected;
        while let Some(index) = find_from(text, self.pattern, from) {
            current_threshold = current_threshold.min(self.error_score(0));
            from = index + pattern_len;
            match_mask[index..index + pattern_len].fill(true);
        }

        let match_bit = 1u64 << (pattern_len - 1);
        let mut best_location: Option<usize> = None;
        let mut final_score = 1.0;
        let mut last_row: Vec<u64> = Vec::new();

        for errors in 0..pattern_len {
            let mut start = 1;
            let mut row = vec![0u64; finish + 2];
            row[finish + 1] = (1u64 << errors) - 1;

            let mut j = finish;
            while j >= start {
                let location = j - 1;
                let char_match = text
                    .get(location)
                    .and_then(|c| self.alphabet.get(c))
                    .copied()
                    .unwrap_or(0);
                match_mask[location] = char_match != 0;

                row[j] = ((row[j + 1] << 1) | 1) & char_match;
                if errors > 0 {
                    let prev_next = last_row.get(j + 1).copied().unwrap_or(0);
                    let prev = last_row.get(j).copied().unwrap_or(0);
                    row[j] |= ((prev_next | prev) << 1) | 1 | prev_next;
                }

                if row[j] & match_bit != 0 {
                    final_score = self.error_score(errors);
                    if final_score <= current_threshold {
                        current_threshold = final_score;
                        best_location = Some(location);
                        if location <= expected {
                            break;
                        }
                        start = (2 * expected).saturating_sub(location).max(1);
                    }
                }
                j -= 1;
            }

            if self.error_score(errors + 1) > current_threshold {
                break;
            }
            last_row = row;
        }

        let indices = mask_to_ranges(&match_mask);
        let is_match = best_location.is_some() && !indices.is_empty();

        ChunkOutcome {
            score: f64::max(MIN_SCORE, final_score),
            indices: is_match.then_some(indices),
        }
    }
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() || from > text.len() {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| pos + from)
}

/// Convert a per-character mask into inclusive ranges.
fn mask_to_ranges(mask: &[bool]) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    let mut run_start = None;

    for (i, &hit) in mask.iter().enumerate() {
        match (hit, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                ranges.push(MatchRange(start, i - 1));
                run_start = None;
            },
            _ => {},
        }
    }
    if let Some(start) = run_start {
        ranges.push(MatchRange(start, mask.len() - 1));
    }
    ranges
}
