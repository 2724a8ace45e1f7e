//! Index command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use shiori_core::{DocIndexer, IndexStore, ShioriConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::output::{OutputFormat, print_json};
use crate::utils::titles::load_titles;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexSummary {
    root: PathBuf,
    path: PathBuf,
    documents: usize,
    reused: bool,
}

/// Execute the index command.
///
/// Loads the persisted index when present, otherwise builds it from the
/// content tree and writes it next to the content.
pub fn execute(
    root: &Path,
    meta: Option<&Path>,
    base: Option<&str>,
    rebuild: bool,
    config: &ShioriConfig,
    format: OutputFormat,
) -> Result<()> {
    let mut index_config = config.index.clone();
    if let Some(base) = base {
        index_config.docs_base = base.to_string();
    }

    let store = IndexStore::with_file_name(root, &index_config.index_file);

    let cached = if rebuild {
        debug!("Rebuild requested, ignoring {}", store.path().display());
        None
    } else {
        store.load()?
    };

    let (documents, reused) = match cached {
        Some(docs) => {
            info!("Reusing persisted index at {}", store.path().display());
            (docs.len(), true)
        },
        None => {
            let titles = load_titles(root, meta)?;
            let docs = DocIndexer::new(&index_config)?
                .build_index(root, &titles)
                .with_context(|| format!("Failed to index {}", root.display()))?;
            store.save(&docs)?;
            (docs.len(), false)
        },
    };

    let summary = IndexSummary {
        root: root.to_path_buf(),
        path: store.path().to_path_buf(),
        documents,
        reused,
    };

    match format {
        OutputFormat::Text => print_text(&summary),
        OutputFormat::Json => print_json(&summary)?,
    }
    Ok(())
}

fn print_text(summary: &IndexSummary) {
    let verb = if summary.reused { "Loaded" } else { "Indexed" };
    println!(
        "{} {} documents {}",
        verb.green().bold(),
        summary.documents,
        format!("({})", summary.path.display()).bright_black()
    );
    if summary.reused {
        println!("  Run with --rebuild to re-index the content files.");
    }
}
