//! Front-matter splitting for content documents.
//!
//! A document may open with a `---` delimited YAML block. The block is
//! parsed into a mapping and separated from the body text. A block that is
//! not valid YAML (or not a mapping) is treated as absent metadata; the body
//! is still separated so the raw YAML never leaks into the search index.

use serde_yaml::{Mapping, Value};
use tracing::warn;

const DELIMITER: &str = "---";

/// Result of splitting a document into metadata and body.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter<'a> {
    data: Mapping,
    body: &'a str,
}

impl<'a> FrontMatter<'a> {
    /// Split `source` into front-matter and body.
    pub fn parse(source: &'a str) -> Self {
        let text = source.strip_prefix('\u{feff}').unwrap_or(source);

        let Some((yaml, body)) = split_block(text) else {
            return Self {
                data: Mapping::new(),
                body: text,
            };
        };

        let data = if yaml.trim().is_empty() {
            Mapping::new()
        } else {
            match serde_yaml::from_str::<Value>(yaml) {
                Ok(Value::Mapping(map)) => map,
                Ok(_) => {
                    warn!("Front-matter is not a key/value mapping; ignoring it");
                    Mapping::new()
                },
                Err(e) => {
                    warn!("Malformed front-matter ignored: {e}");
                    Mapping::new()
                },
            }
        };

        Self { data, body }
    }

    /// Body text following the metadata block.
    #[must_use]
    pub const fn body(&self) -> &'a str {
        self.body
    }

    /// Whether any metadata was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scalar value for `key` rendered as text.
    ///
    /// Strings are returned as-is; numbers and booleans are formatted.
    /// Sequences, mappings and nulls yield `None`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Non-empty `title` entry.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.get_str("title").filter(|t| !t.trim().is_empty())
    }
}

/// Returns `(yaml, body)` when `text` opens with a closed delimiter block.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim_end() != DELIMITER {
        return None;
    }

    let rest = &text[first_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}
