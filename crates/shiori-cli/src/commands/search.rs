//! Search command implementation

use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde::Serialize;
use shiori_core::{
    CorpusFetcher, DocIndexer, FieldKey, IndexStore, MatchRange, MatchResult, Preview,
    SearchDocument, SearchEngine, SearchOptions, ShioriConfig,
};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::cli::SearchArgs;
use crate::output::{OutputFormat, print_json};
use crate::utils::titles::load_titles;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct SearchHit<'a> {
    title: &'a str,
    url: &'a str,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<Preview>,
    matches: Vec<HitMatch>,
}

#[derive(Serialize)]
struct HitMatch {
    key: FieldKey,
    indices: Vec<MatchRange>,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: String,
    total: usize,
    results: Vec<SearchHit<'a>>,
}

/// Execute the search command.
pub async fn execute(args: &SearchArgs, config: &ShioriConfig, format: OutputFormat) -> Result<()> {
    let docs = load_corpus(args, config).await?;
    let query = args.query_string();

    let mut options = SearchOptions::from(&config.search);
    if let Some(matcher) = args.matcher {
        options.matcher = matcher;
    }
    if args.limit.is_some() {
        options.limit = args.limit;
    }

    let engine = SearchEngine::with_options(&docs, &options);
    let results = engine.search(&query);
    debug!("{} of {} documents matched '{}'", results.len(), engine.len(), query);

    let before = config.search.preview_before;
    let after = config.search.preview_after;
    let output = SearchOutput {
        total: results.len(),
        results: results.iter().map(|hit| to_hit(hit, before, after)).collect(),
        query,
    };

    match format {
        OutputFormat::Text => print_text(&output),
        OutputFormat::Json => print_json(&output)?,
    }
    Ok(())
}

async fn load_corpus(args: &SearchArgs, config: &ShioriConfig) -> Result<Vec<SearchDocument>> {
    let source = &args.source;

    if let Some(url) = &source.url {
        let fetcher = CorpusFetcher::with_endpoint(url, &config.search.endpoint, FETCH_TIMEOUT)?;
        return Ok(fetcher.fetch_or_empty().await);
    }

    if let Some(path) = &source.index {
        return IndexStore::at(path)
            .load()?
            .with_context(|| format!("No index file at {}", path.display()));
    }

    let root = source.root.as_deref().unwrap_or_else(|| Path::new("."));
    load_or_build(root, config)
}

/// The persisted index under `root`, or an in-memory build when none exists.
///
/// The in-memory build resolves titles the same way `shiori index` does.
fn load_or_build(root: &Path, config: &ShioriConfig) -> Result<Vec<SearchDocument>> {
    let store = IndexStore::with_file_name(root, &config.index.index_file);
    if let Some(docs) = store.load()? {
        return Ok(docs);
    }
    if !root.is_dir() {
        bail!("Content root {} does not exist", root.display());
    }

    info!(
        "No persisted index at {}; indexing in memory (run `shiori index` to persist)",
        store.path().display()
    );
    let titles = load_titles(root, None)?;
    Ok(DocIndexer::new(&config.index)?.build_index(root, &titles)?)
}

fn to_hit<'a>(hit: &MatchResult<'a>, before: usize, after: usize) -> SearchHit<'a> {
    SearchHit {
        title: &hit.item.title,
        url: &hit.item.url,
        score: hit.score,
        preview: hit.content_preview(before, after),
        matches: hit
            .matches
            .iter()
            .map(|m| HitMatch {
                key: m.key,
                indices: m.indices.clone(),
            })
            .collect(),
    }
}

fn print_text(output: &SearchOutput<'_>) {
    if output.results.is_empty() {
        println!("No results found for '{}'", output.query);
        return;
    }

    for (idx, hit) in output.results.iter().enumerate() {
        println!(
            "{} {} {}",
            format!("{}.", idx + 1).bright_black(),
            hit.title.bold(),
            hit.url.cyan()
        );
        if let Some(preview) = &hit.preview {
            println!("   {}", render_preview(preview));
        }
        println!();
    }

    println!(
        "{} result{}",
        output.total,
        if output.total == 1 { "" } else { "s" }
    );
}

fn render_preview(preview: &Preview) -> String {
    let ellipsis = |shown: bool| if shown { shiori_core::search::ELLIPSIS } else { "" };
    format!(
        "{}{}{}{}{}",
        ellipsis(preview.leading_ellipsis),
        preview.before,
        preview.matched.yellow().bold(),
        preview.after,
        ellipsis(preview.trailing_ellipsis),
    )
    .replace('\n', " ")
}
