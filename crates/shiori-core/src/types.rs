use crate::{Error, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Key in a title map that holds the site title rather than a page.
pub const SITE_TITLE_KEY: &str = "title";

/// One searchable page of the documentation site.
///
/// Serialized with exactly the keys `id`, `title`, `content`, `url`; this is
/// the element type of the persisted index and of the `/api/shiori/docs`
/// response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
}

impl SearchDocument {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            url: url.into(),
        }
    }
}

/// Inclusive character range `(start, end)` inside a matched field.
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRange(pub usize, pub usize);

impl MatchRange {
    #[must_use]
    pub const fn start(self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn end(self) -> usize {
        self.1
    }

    /// Distance between the range bounds (`end - start`).
    #[must_use]
    pub const fn span(self) -> usize {
        self.1.saturating_sub(self.0)
    }
}

/// Ordered mapping of page path to display title.
///
/// This is the site's meta map. Order matters: navigation walks pages in the
/// order they were declared. The reserved [`SITE_TITLE_KEY`] entry is the
/// site title and never a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMap {
    entries: Vec<(String, String)>,
}

impl TitleMap {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace an entry, keeping the original position on replace.
    pub fn insert(&mut self, path: impl Into<String>, title: impl Into<String>) {
        let path = path.into();
        let title = title.into();
        if let Some(slot) = self.entries.iter_mut().find(|(p, _)| *p == path) {
            slot.1 = title;
        } else {
            self.entries.push((path, title));
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, t)| t.as_str())
    }

    /// Site title, if the map declares one.
    #[must_use]
    pub fn site_title(&self) -> Option<&str> {
        self.get(SITE_TITLE_KEY)
    }

    /// Page entries in declaration order, excluding the site title.
    pub fn pages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(p, _)| p != SITE_TITLE_KEY)
            .map(|(p, t)| (p.as_str(), t.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, t)| (p.as_str(), t.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a title map from a `.json` or `.toml` file.
    ///
    /// The format is picked by extension; anything other than `toml` is read
    /// as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read title map {}: {e}",
                path.display()
            ))
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(&contents).map_err(|e| {
                Error::Config(format!(
                    "Failed to parse title map {}: {e}",
                    path.display()
                ))
            })
        } else {
            serde_json::from_str(&contents).map_err(|e| {
                Error::Config(format!(
                    "Failed to parse title map {}: {e}",
                    path.display()
                ))
            })
        }
    }
}

impl<P: Into<String>, T: Into<String>> FromIterator<(P, T)> for TitleMap {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, title) in iter {
            map.insert(path, title);
        }
        map
    }
}

impl Serialize for TitleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, title) in &self.entries {
            map.serialize_entry(path, title)?;
        }
        map.end()
    }
}

struct TitleMapVisitor;

impl<'de> Visitor<'de> for TitleMapVisitor {
    type Value = TitleMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of page paths to titles")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<TitleMap, A::Error> {
        let mut map = TitleMap::new();
        // Null titles are skipped: the page simply has no label.
        while let Some((path, title)) = access.next_entry::<String, Option<String>>()? {
            if let Some(title) = title {
                map.insert(path, title);
            }
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for TitleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TitleMapVisitor)
    }
}
