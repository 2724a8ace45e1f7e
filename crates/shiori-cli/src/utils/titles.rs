//! Title map lookup shared by the commands that build an index.

use anyhow::Result;
use shiori_core::TitleMap;
use std::path::Path;
use tracing::debug;

/// Title map picked up from the content root when `--meta` is absent.
pub const DEFAULT_META_FILE: &str = "_meta.json";

/// Title map from `--meta`, else `<root>/_meta.json` if it exists, else empty.
pub fn load_titles(root: &Path, meta: Option<&Path>) -> Result<TitleMap> {
    let path = match meta {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = root.join(DEFAULT_META_FILE);
            if !candidate.is_file() {
                return Ok(TitleMap::new());
            }
            candidate
        },
    };
    debug!("Loading title map from {}", path.display());
    Ok(TitleMap::load(&path)?)
}
