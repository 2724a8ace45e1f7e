//! Markdown to plain text reduction used for search documents.
//!
//! The goal is readable text for full-text matching, not a faithful render:
//! syntax is dropped and the visible text is kept.
//!
//! - Headings, blockquote and list markers are removed, their text kept
//! - Links (`[Label](url)`) are reduced to `Label`, images to their alt text
//! - Emphasis, strike-through and inline code markers are removed
//! - Fenced code delimiters are removed while the code body is kept
//! - Reference definitions, footnotes and horizontal rules are removed
//! - Angle-bracket tags are removed by [`strip_tags`]

use regex::Regex;
use std::sync::LazyLock;

static FENCE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(?:`{3,}|~{3,})[^\n]*(?:\n|$)").unwrap());

static HORIZONTAL_RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]{0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
});

static SETEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{0,3}(?:={2,}|-{2,})[ \t]*$").unwrap());

static ATX_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]{0,3}#{1,6}(?:[ \t]+(.*?))??(?:[ \t]+#+)?[ \t]*$").unwrap()
});

static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{0,3}(?:>[ \t]?)+").unwrap());

static LIST_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)(?:[*+-]|\d{1,9}[.)])[ \t]+").unwrap());

static TASK_BOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([ \t]*)\[[ xX]\][ \t]+").unwrap());

static FOOTNOTE_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{0,3}\[\^[^\]\n]+\]:[^\n]*$").unwrap());

static FOOTNOTE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\^[^\]\n]+\]").unwrap());

static REFERENCE_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{0,3}\[[^\]\n]+\]:[ \t]*\S+[^\n]*$").unwrap());

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]\n]*)\](?:\((?:[^()\n]|\([^()\n]*\))*\)|\[[^\]\n]*\])").unwrap()
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\n]*)\](?:\((?:[^()\n]|\([^()\n]*\))*\)|\[[^\]\n]*\])").unwrap()
});

static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`+([^`\n]+?)`+").unwrap());

static STRONG_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(\S(?:[^*\n]*?\S)?)\*\*").unwrap());

static STRONG_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(\S(?:[^_\n]*?\S)?)__").unwrap());

static EM_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(\S(?:[^*\n]*?\S)?)\*").unwrap());

// Intra-word underscores (snake_case) are not emphasis.
static EM_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^\w])_(\S(?:[^_\n]*?\S)?)_([^\w]|$)").unwrap()
});

static STRIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~~([^~\n]+)~~").unwrap());

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").unwrap());

/// Reduce markdown to plain text.
pub fn to_plain_text(markdown: &str) -> String {
    let mut text = markdown.replace("\r\n", "\n");

    for (re, rep) in [
        (&*FENCE_LINE_RE, ""),
        (&*HORIZONTAL_RULE_RE, ""),
        (&*SETEXT_RE, ""),
        (&*ATX_HEADING_RE, "$1"),
        (&*BLOCKQUOTE_RE, ""),
        (&*LIST_MARKER_RE, "$1"),
        (&*TASK_BOX_RE, "$1"),
        (&*FOOTNOTE_DEF_RE, ""),
        (&*FOOTNOTE_REF_RE, ""),
        (&*REFERENCE_DEF_RE, ""),
        (&*IMAGE_RE, "$1"),
        (&*LINK_RE, "$1"),
        (&*INLINE_CODE_RE, "$1"),
        (&*STRONG_STAR_RE, "$1"),
        (&*STRONG_UNDERSCORE_RE, "$1"),
        (&*EM_STAR_RE, "$1"),
        (&*EM_UNDERSCORE_RE, "$1$2$3"),
        (&*STRIKE_RE, "$1"),
    ] {
        text = re.replace_all(&text, rep).into_owned();
    }

    BLANK_RUN_RE.replace_all(&text, "\n\n").into_owned()
}

/// Remove every `<...>` tag, keeping the text between tags.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}
