use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Language assumed when a block does not name one.
pub const DEFAULT_LANGUAGE: &str = "bash";

const PRIMITIVE_FLAG: &str = "primitive";

static FILE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"file=(\S+)").unwrap());

static LANGUAGE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"language-(\S+)").unwrap());

/// Presentation metadata of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMeta {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Render without the header bar.
    pub primitive: bool,
}

impl Default for CodeMeta {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            filename: None,
            primitive: false,
        }
    }
}

impl CodeMeta {
    /// Parse a fence info string such as `ts file=app.ts primitive`.
    pub fn from_info_string(info: &str) -> Self {
        let language = info
            .split_whitespace()
            .find(|token| !token.contains('=') && *token != PRIMITIVE_FLAG)
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string();

        let filename = FILE_ATTR_RE
            .captures(info)
            .map(|caps| caps[1].to_string());

        Self {
            language,
            filename,
            primitive: info.contains(PRIMITIVE_FLAG),
        }
    }

    /// Language named by a `language-xxx` CSS class.
    pub fn language_from_class(class: &str) -> String {
        LANGUAGE_CLASS_RE
            .captures(class)
            .map_or_else(|| DEFAULT_LANGUAGE.to_string(), |caps| caps[1].to_string())
    }
}
