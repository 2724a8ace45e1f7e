//! Search document extraction from a content tree.
//!
//! [`DocIndexer`] walks a directory of markdown/MDX pages and turns every
//! page into a [`SearchDocument`]: front-matter is split off, import lines
//! and custom code-block components are dropped, the remaining markdown is
//! reduced to plain text and any leftover tags are stripped.
//!
//! Building never touches the persisted index; pair it with
//! [`IndexStore`](crate::storage::IndexStore) to decide when to load and
//! when to rebuild.
//!
//! ```rust,no_run
//! use shiori_core::{DocIndexer, IndexConfig, TitleMap};
//! use std::path::Path;
//!
//! let indexer = DocIndexer::new(&IndexConfig::default())?;
//! let docs = indexer.build_index(Path::new("app/docs"), &TitleMap::new())?;
//! println!("indexed {} pages", docs.len());
//! # Ok::<(), shiori_core::Error>(())
//! ```

use crate::config::IndexConfig;
use crate::frontmatter::FrontMatter;
use crate::markdown;
use crate::storage::IndexStore;
use crate::{Error, Result, SearchDocument, TitleMap};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Identifier of the document built from the content root's own page.
pub const INTRODUCTION_ID: &str = "introduction";
/// Title of the document built from the content root's own page.
pub const INTRODUCTION_TITLE: &str = "Introduction";

const PAGE_MARKER: &str = "page";

/// Converts a content tree into search documents.
#[derive(Debug, Clone)]
pub struct DocIndexer {
    docs_base: String,
    extensions: Vec<String>,
    code_block_re: Regex,
}

impl DocIndexer {
    /// Create an indexer from index settings.
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let tag = regex::escape(config.code_block_tag.trim());
        let code_block_re = Regex::new(&format!(r"(?is)<{tag}\b.*?</{tag}\s*>"))
            .map_err(|e| Error::Index(format!("Invalid code block tag: {e}")))?;

        let extensions = config
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Ok(Self {
            docs_base: config.docs_base.trim_end_matches('/').to_string(),
            extensions,
            code_block_re,
        })
    }

    /// Walk `root` and build one document per content file.
    ///
    /// Entries are visited in file name order so the output is stable for an
    /// unchanged tree. A missing or unreadable root is fatal.
    pub fn build_index(&self, root: &Path, titles: &TitleMap) -> Result<Vec<SearchDocument>> {
        if !root.is_dir() {
            return Err(Error::NotFound(format!(
                "Content root '{}' does not exist or is not a directory",
                root.display()
            )));
        }

        let mut files = Vec::new();
        self.collect_files(root, &mut files)?;

        let mut seen = HashSet::new();
        let mut docs = Vec::with_capacity(files.len());

        for path in files {
            let Some(relative_id) = self.relative_id(root, &path) else {
                continue;
            };

            let source = fs::read_to_string(&path)?;
            let doc = self.index_source(&relative_id, &source, titles);

            if !seen.insert(doc.id.clone()) {
                warn!(
                    "Skipping {}: id '{}' is already taken by an earlier page",
                    path.display(),
                    doc.id
                );
                continue;
            }

            debug!("Indexed {} as '{}'", path.display(), doc.id);
            docs.push(doc);
        }

        info!("Indexed {} documents from {}", docs.len(), root.display());
        Ok(docs)
    }

    /// Build a single document from its relative identifier and raw source.
    ///
    /// An empty identifier denotes the content root's own page and yields
    /// the introduction document.
    pub fn index_source(&self, relative_id: &str, source: &str, titles: &TitleMap) -> SearchDocument {
        let front_matter = FrontMatter::parse(source);
        let content = self.clean_body(front_matter.body());

        if relative_id.is_empty() {
            let url = if self.docs_base.is_empty() {
                "/".to_string()
            } else {
                self.docs_base.clone()
            };
            return SearchDocument::new(INTRODUCTION_ID, INTRODUCTION_TITLE, content, url);
        }

        let title = front_matter
            .title()
            .or_else(|| {
                titles
                    .get(relative_id)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| relative_id.to_string());

        let url = format!("{}/{relative_id}", self.docs_base);
        SearchDocument::new(relative_id, title, content, url)
    }

    /// Reduce a document body to searchable plain text.
    pub fn clean_body(&self, body: &str) -> String {
        let without_imports = strip_import_lines(body);
        let without_blocks = self.code_block_re.replace_all(&without_imports, "");
        let plain = markdown::to_plain_text(&without_blocks);
        // List and quote markers can hide an import until they are reduced.
        strip_import_lines(&markdown::strip_tags(&plain)).trim().to_string()
    }

    /// Identifier for `path` relative to `root`, or `None` when the file is
    /// not a content document.
    ///
    /// `guide/setup.mdx` and `guide/setup/page.mdx` both map to
    /// `guide/setup`; the root `page.mdx` maps to the empty identifier.
    pub fn relative_id(&self, root: &Path, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if !self.extensions.contains(&ext) {
            return None;
        }

        let relative = path.strip_prefix(root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let joined = segments.join("/");

        let without_ext = &joined[..joined.len() - ext.len() - 1];
        let id = if without_ext == PAGE_MARKER {
            ""
        } else {
            without_ext
                .strip_suffix(&format!("/{PAGE_MARKER}"))
                .unwrap_or(without_ext)
        };
        Some(id.to_string())
    }

    fn collect_files(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.collect_files(&path, files)?;
            } else if file_type.is_symlink() && path.is_dir() {
                // Linked directories can form cycles.
                debug!("Skipping symlinked directory {}", path.display());
            } else {
                files.push(path);
            }
        }
        Ok(())
    }
}

/// Build an index with default settings.
pub fn build_index(root: &Path, titles: &TitleMap) -> Result<Vec<SearchDocument>> {
    DocIndexer::new(&IndexConfig::default())?.build_index(root, titles)
}

/// Load the index persisted in `root`, `None` when there is none yet.
pub fn load_persisted_index(root: &Path) -> Result<Option<Vec<SearchDocument>>> {
    IndexStore::new(root).load()
}

/// Persist `docs` as the index of `root`.
pub fn write_index(root: &Path, docs: &[SearchDocument]) -> Result<()> {
    IndexStore::new(root).save(docs)
}

/// Whether a line is an ES module import declaration.
///
/// The keyword must be followed by whitespace, `{`, `*`, a quote or the end
/// of the line, so prose such as "Important:" is kept.
pub fn is_import_line(line: &str) -> bool {
    line.trim_start()
        .strip_prefix("import")
        .is_some_and(|rest| {
            rest.chars()
                .next()
                .is_none_or(|c| c.is_whitespace() || matches!(c, '{' | '*' | '"' | '\''))
        })
}

fn strip_import_lines(body: &str) -> String {
    body.split('\n')
        .filter(|line| !is_import_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}
