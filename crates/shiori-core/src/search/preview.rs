use crate::MatchRange;
use serde::Serialize;
use std::fmt;

/// Marker rendered where a preview is cut short.
pub const ELLIPSIS: &str = "...";

/// A snippet of text around the best match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Text precedes the window.
    pub leading_ellipsis: bool,
    /// Leading context.
    pub before: String,
    /// The matched characters (inclusive range).
    pub matched: String,
    /// Trailing context.
    pub after: String,
    /// Text follows the window.
    pub trailing_ellipsis: bool,
}

impl Preview {
    /// Render with `[` `]` around the matched text.
    #[must_use]
    pub fn to_plain(&self) -> String {
        format!(
            "{}{}[{}]{}{}",
            if self.leading_ellipsis { ELLIPSIS } else { "" },
            self.before,
            self.matched,
            self.after,
            if self.trailing_ellipsis { ELLIPSIS } else { "" },
        )
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

/// Extract a preview around the widest range in `ranges`.
///
/// Ties on width go to the range that comes first. `context_before` and
/// `context_after` are character counts, clamped to the text bounds.
/// Returns `None` for empty text or when no range is given.
pub fn best_match_preview(
    text: &str,
    ranges: &[MatchRange],
    context_before: usize,
    context_after: usize,
) -> Option<Preview> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let best = ranges.iter().copied().fold(None, |best: Option<MatchRange>, range| {
        match best {
            Some(current) if current.span() >= range.span() => Some(current),
            _ => Some(range),
        }
    })?;

    let last = chars.len() - 1;
    let start = best.start().min(last);
    let end = best.end().clamp(start, last);

    let window_start = start.saturating_sub(context_before);
    let window_end = end.saturating_add(context_after).min(chars.len());
    let after_end = window_end.max(end + 1);

    Some(Preview {
        leading_ellipsis: window_start > 0,
        before: chars[window_start..start].iter().collect(),
        matched: chars[start..=end].iter().collect(),
        after: chars[end + 1..after_end].iter().collect(),
        trailing_ellipsis: window_end < chars.len(),
    })
}
