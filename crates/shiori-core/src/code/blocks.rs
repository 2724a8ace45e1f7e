//! Fenced code block discovery.

use super::annotate::{AnnotationMarkers, HighlightSpec, annotate_with};
use super::meta::CodeMeta;
use crate::{Error, Result};
use serde::Serialize;
use tree_sitter::{Node, Parser, TreeCursor};

/// A fenced code block as written in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FencedBlock {
    /// Text after the opening fence, e.g. `ts file=app.ts`.
    pub info: String,
    /// Block body with trailing whitespace removed.
    pub body: String,
    /// 1-based line of the opening fence.
    pub start_line: usize,
}

/// A fenced block with its metadata and highlights resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedBlock {
    pub meta: CodeMeta,
    pub highlight: HighlightSpec,
    pub start_line: usize,
}

/// Reusable tree-sitter parser for fenced blocks.
pub struct FenceExtractor {
    parser: Parser,
}

impl FenceExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_md::LANGUAGE.into())
            .map_err(|e| Error::Parse(format!("Failed to set language: {e}")))?;

        Ok(Self { parser })
    }

    /// Fenced blocks of `markdown` in document order.
    pub fn extract(&mut self, markdown: &str) -> Result<Vec<FencedBlock>> {
        let tree = self
            .parser
            .parse(markdown, None)
            .ok_or_else(|| Error::Parse("Failed to parse markdown".into()))?;

        let mut blocks = Vec::new();
        let mut cursor = tree.root_node().walk();
        walk_tree(&mut cursor, |node| {
            if node.kind() == "fenced_code_block" {
                blocks.push(fenced_block(node, markdown));
            }
        });
        Ok(blocks)
    }
}

impl std::fmt::Debug for FenceExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FenceExtractor").finish_non_exhaustive()
    }
}

/// Extract every fenced block of `markdown`.
pub fn extract_fenced_blocks(markdown: &str) -> Result<Vec<FencedBlock>> {
    FenceExtractor::new()?.extract(markdown)
}

/// Extract and annotate every fenced block of `markdown`.
pub fn annotate_document(markdown: &str, markers: &AnnotationMarkers) -> Result<Vec<AnnotatedBlock>> {
    Ok(extract_fenced_blocks(markdown)?
        .into_iter()
        .map(|block| AnnotatedBlock {
            meta: CodeMeta::from_info_string(&block.info),
            highlight: annotate_with(&block.body, markers),
            start_line: block.start_line,
        })
        .collect())
}

fn fenced_block(node: Node, text: &str) -> FencedBlock {
    let mut info = String::new();
    let mut body = String::new();

    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "info_string" => info = text[child.byte_range()].trim().to_string(),
            "code_fence_content" => body = text[child.byte_range()].trim_end().to_string(),
            _ => {},
        }
    }

    FencedBlock {
        info,
        body,
        start_line: node.start_position().row + 1,
    }
}

pub(crate) fn walk_tree<F>(cursor: &mut TreeCursor, mut callback: F)
where
    F: FnMut(Node),
{
    loop {
        callback(cursor.node());

        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }

        loop {
            if !cursor.goto_parent() {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}
