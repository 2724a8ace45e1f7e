//! Table of contents for a content page.
//!
//! Collects the page's second and third level headings with the anchor ids
//! the rendered page gives them: lower-cased text, punctuation dropped,
//! spaces turned into `-`, and repeats suffixed `-1`, `-2`, ...

use crate::code::blocks::walk_tree;
use crate::frontmatter::FrontMatter;
use crate::markdown;
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tree_sitter::{Node, Parser};

/// Heading levels listed in the table of contents.
const TOC_LEVELS: std::ops::RangeInclusive<usize> = 2..=3;

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Anchor id of the heading.
    pub id: String,
    /// Visible heading text.
    pub text: String,
    /// 2 or 3.
    pub level: usize,
}

/// Level 2 and 3 headings of `source`, in document order.
///
/// Front-matter is skipped. Headings of every level take part in anchor
/// de-duplication, so ids match the rendered page even when a repeated
/// title appears at another level.
pub fn toc_items(source: &str) -> Result<Vec<TocItem>> {
    let body = FrontMatter::parse(source).body();

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_md::LANGUAGE.into())
        .map_err(|e| Error::Parse(format!("Failed to set language: {e}")))?;
    let tree = parser
        .parse(body, None)
        .ok_or_else(|| Error::Parse("Failed to parse markdown".into()))?;

    let mut slugger = Slugger::default();
    let mut items = Vec::new();
    let mut cursor = tree.root_node().walk();
    walk_tree(&mut cursor, |node| {
        let Some(level) = heading_level(node) else {
            return;
        };
        let text = heading_text(node, body);
        let id = slugger.slug(&text);
        if TOC_LEVELS.contains(&level) {
            items.push(TocItem { id, text, level });
        }
    });
    Ok(items)
}

fn heading_level(node: Node) -> Option<usize> {
    if !matches!(node.kind(), "atx_heading" | "setext_heading") {
        return None;
    }
    node.children(&mut node.walk()).find_map(|child| match child.kind() {
        "atx_h1_marker" | "setext_h1_underline" => Some(1),
        "atx_h2_marker" | "setext_h2_underline" => Some(2),
        "atx_h3_marker" => Some(3),
        "atx_h4_marker" => Some(4),
        "atx_h5_marker" => Some(5),
        "atx_h6_marker" => Some(6),
        _ => None,
    })
}

fn heading_text(node: Node, source: &str) -> String {
    let raw = node.child_by_field_name("heading_content").map_or_else(
        || source[node.byte_range()].trim_start_matches('#'),
        |content| &source[content.byte_range()],
    );
    let raw = if node.kind() == "atx_heading" {
        // Re-marked so the optional closing `#` run is dropped too.
        format!("# {}", raw.trim())
    } else {
        raw.trim().to_string()
    };
    let plain = markdown::strip_tags(&markdown::to_plain_text(&raw));
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Anchor id generator with per-page de-duplication.
#[derive(Debug, Default)]
struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();

        if let Some(&seen) = self.occurrences.get(&base) {
            let mut count = seen;
            loop {
                count += 1;
                slug = format!("{base}-{count}");
                if !self.occurrences.contains_key(&slug) {
                    break;
                }
            }
            self.occurrences.insert(base, count);
        }

        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}

/// Lower-case `text`, keep letters, digits, `-` and `_`, and turn spaces
/// into `-`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}
