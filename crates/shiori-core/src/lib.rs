//! # shiori-core
//!
//! Core functionality for shiori, a documentation site theme: building the
//! site's search index, fuzzy searching it with readable previews, and
//! annotating code blocks.
//!
//! ## Architecture
//!
//! - **Indexing**: content tree to plain-text [`SearchDocument`]s, persisted
//!   as `shiori-search-index.json`
//! - **Search**: fuzzy matching over title and content with best-match
//!   previews
//! - **Fetching**: the runtime corpus served at `/api/shiori/docs`
//! - **Code**: highlight markers and fence metadata in code blocks
//! - **Navigation**: sidebar, breadcrumbs and neighbors from the title map
//! - **Table of contents**: second and third level headings with anchor ids
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shiori_core::{DocIndexer, IndexConfig, IndexStore, SearchEngine, TitleMap};
//! use std::path::Path;
//!
//! let root = Path::new("app/docs");
//! let store = IndexStore::new(root);
//!
//! let docs = match store.load()? {
//!     Some(docs) => docs,
//!     None => {
//!         let docs = DocIndexer::new(&IndexConfig::default())?.build_index(root, &TitleMap::new())?;
//!         store.save(&docs)?;
//!         docs
//!     },
//! };
//!
//! for hit in SearchEngine::new(&docs).search("install") {
//!     if let Some(preview) = hit.content_preview(30, 270) {
//!         println!("{}: {preview}", hit.item.title);
//!     }
//! }
//! # Ok::<(), shiori_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Index builds, corpus fetches and configuration loading return
//! [`Result<T, Error>`]. Searching and code annotation cannot fail.

/// Code block annotation, fence metadata and fenced block extraction
pub mod code;
/// Layered TOML configuration
pub mod config;
/// Error types and result aliases
pub mod error;
/// Runtime corpus fetch over HTTP
pub mod fetcher;
/// Front-matter splitting
pub mod frontmatter;
/// Search document extraction from a content tree
pub mod indexer;
/// Markdown to plain text reduction
pub mod markdown;
/// Sidebar, breadcrumbs and page neighbors
pub mod nav;
/// Fuzzy search and previews
pub mod search;
/// Persisted search index
pub mod storage;
/// Table of contents from page headings
pub mod toc;
/// Core data types
pub mod types;

pub use code::{AnnotatedBlock, AnnotationMarkers, CodeMeta, FencedBlock, HighlightSpec, annotate};
pub use config::{AnnotateConfig, IndexConfig, MatcherKind, SearchConfig, ShioriConfig};
pub use error::{Error, Result};
pub use fetcher::CorpusFetcher;
pub use indexer::{DocIndexer, build_index, load_persisted_index, write_index};
pub use search::{FieldKey, FieldMatch, FieldMatcher, MatchResult, Preview, SearchEngine, SearchOptions};
pub use storage::IndexStore;
pub use toc::{TocItem, toc_items};
pub use types::*;
