//! Configuration management for shiori.
//!
//! Settings are stored in TOML. Every field has a default, so an empty file
//! (or no file at all) yields a working configuration.
//!
//! ## Resolution Order
//!
//! 1. An explicit path passed by the caller (`--config`)
//! 2. The `SHIORI_CONFIG` environment variable
//! 3. `<content-root>/shiori.toml`
//! 4. `config.toml` in the platform config directory
//! 5. Built-in defaults
//!
//! ## Example Configuration File
//!
//! ```toml
//! [index]
//! docs_base = "/docs"
//! extensions = ["mdx", "md"]
//! code_block_tag = "CodeBlock"
//!
//! [search]
//! threshold = 0.3
//! matcher = "bitap"
//! preview_before = 30
//! preview_after = 270
//!
//! [annotate]
//! start_marker = "highlight-start"
//! end_marker = "highlight-end"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SHIORI_CONFIG";

/// File name looked up inside the content root.
pub const LOCAL_CONFIG_FILE: &str = "shiori.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShioriConfig {
    /// Index build settings
    pub index: IndexConfig,
    /// Query and preview settings
    pub search: SearchConfig,
    /// Code annotation settings
    pub annotate: AnnotateConfig,
}

/// Settings for building the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// URL prefix the content root is served under.
    pub docs_base: String,

    /// File extensions (without the dot) treated as content documents.
    pub extensions: Vec<String>,

    /// Name of the custom code-block component whose bodies are excluded
    /// from the index.
    pub code_block_tag: String,

    /// File name of the persisted index inside the content root.
    pub index_file: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            docs_base: crate::nav::DEFAULT_DOCS_BASE.to_string(),
            extensions: vec!["mdx".to_string()],
            code_block_tag: "CodeBlock".to_string(),
            index_file: crate::storage::DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

/// Which fuzzy matcher backs the search engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    /// Bit-parallel approximate substring matching with an error threshold.
    #[default]
    Bitap,
    /// Skim-style subsequence matching.
    Skim,
}

impl std::str::FromStr for MatcherKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bitap" => Ok(Self::Bitap),
            "skim" => Ok(Self::Skim),
            other => Err(Error::Config(format!(
                "Unknown matcher '{other}' (expected 'bitap' or 'skim')"
            ))),
        }
    }
}

/// Settings for query matching and previews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Match tolerance, 0.0 = exact only, 1.0 = match anything.
    pub threshold: f64,

    /// Matcher backend.
    pub matcher: MatcherKind,

    /// Characters of context shown before the best match.
    pub preview_before: usize,

    /// Characters of context shown after the best match.
    pub preview_after: usize,

    /// Path of the corpus endpoint on the docs site.
    pub endpoint: String,

    /// Maximum number of results, unlimited when absent.
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            matcher: MatcherKind::Bitap,
            preview_before: 30,
            preview_after: 270,
            endpoint: crate::fetcher::DEFAULT_ENDPOINT.to_string(),
            limit: None,
        }
    }
}

/// Settings for code annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Substring that opens a highlight block.
    pub start_marker: String,
    /// Substring that closes a highlight block.
    pub end_marker: String,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            start_marker: "highlight-start".to_string(),
            end_marker: "highlight-end".to_string(),
        }
    }
}

impl ShioriConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load configuration following the documented order.
    ///
    /// `explicit` is a path given on the command line; `content_root` is the
    /// docs directory when the caller has one. A missing file at any step
    /// falls through to the next; a present but malformed file is an error.
    pub fn resolve(explicit: Option<&Path>, content_root: Option<&Path>) -> Result<Self> {
        match Self::locate(explicit, content_root) {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::load_from(&path)
            },
            None => Ok(Self::default()),
        }
    }

    fn locate(explicit: Option<&Path>, content_root: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }

        if let Some(root) = content_root {
            let local = root.join(LOCAL_CONFIG_FILE);
            if local.is_file() {
                return Some(local);
            }
        }

        Self::global_config_path().filter(|path| path.is_file())
    }

    /// Platform config location, e.g. `~/.config/shiori/config.toml` on Linux.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "shiori", "shiori")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.search.threshold) {
            return Err(Error::Config(format!(
                "search.threshold must be between 0.0 and 1.0, got {}",
                self.search.threshold
            )));
        }
        if self.index.extensions.is_empty() {
            return Err(Error::Config(
                "index.extensions must list at least one extension".into(),
            ));
        }
        if self.annotate.start_marker.is_empty() || self.annotate.end_marker.is_empty() {
            return Err(Error::Config("annotate markers cannot be empty".into()));
        }
        if self.index.code_block_tag.trim().is_empty() {
            return Err(Error::Config("index.code_block_tag cannot be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = ShioriConfig::default();

        assert_eq!(config.index.docs_base, "/docs");
        assert_eq!(config.index.extensions, vec!["mdx"]);
        assert_eq!(config.index.index_file, "shiori-search-index.json");
        assert!((config.search.threshold - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.search.preview_before, 30);
        assert_eq!(config.search.preview_after, 270);
        assert_eq!(config.search.endpoint, "/api/shiori/docs");
        assert_eq!(config.search.matcher, MatcherKind::Bitap);
        assert_eq!(config.annotate.start_marker, "highlight-start");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = ShioriConfig::from_toml_str("[search]\nmatcher = \"skim\"\n")
            .expect("Should parse partial config");

        assert_eq!(config.search.matcher, MatcherKind::Skim);
        assert_eq!(config.search.preview_after, 270);
        assert_eq!(config.index, IndexConfig::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = ShioriConfig::from_toml_str("[search]\nthreshold = 1.5\n")
            .expect_err("threshold above 1.0 is invalid");
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = ShioriConfig::from_toml_str("[search\nthreshold = ").expect_err("malformed");
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let dir = TempDir::new().expect("temp dir");
        let explicit = dir.path().join("custom.toml");
        fs::write(&explicit, "[index]\ndocs_base = \"/guide\"\n").expect("write");
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            "[index]\ndocs_base = \"/local\"\n",
        )
        .expect("write");

        let config =
            ShioriConfig::resolve(Some(&explicit), Some(dir.path())).expect("Should resolve");
        assert_eq!(config.index.docs_base, "/guide");
    }

    #[test]
    fn test_resolve_missing_explicit_path_errors() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(ShioriConfig::resolve(Some(&missing), None).is_err());
    }

    #[test]
    fn test_matcher_kind_from_str() {
        assert_eq!("Bitap".parse::<MatcherKind>().ok(), Some(MatcherKind::Bitap));
        assert_eq!(" skim ".parse::<MatcherKind>().ok(), Some(MatcherKind::Skim));
        assert!("levenshtein".parse::<MatcherKind>().is_err());
    }
}
