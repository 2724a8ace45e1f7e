//! CLI argument parsing and command definitions

use clap::{Args, Parser, Subcommand};
use shiori_core::MatcherKind;
use std::path::PathBuf;

use crate::utils::cli_args::FormatArg;

#[derive(Parser, Clone, Debug)]
#[command(name = "shiori")]
#[command(version)]
#[command(about = "Build, search and inspect shiori documentation indexes", long_about = None)]
#[command(
    after_help = "EXAMPLES:\n    shiori index app/docs --meta app/docs/_meta.json\n    shiori search theming --root app/docs\n    shiori search \"dark mode\" --url http://localhost:3000\n    shiori annotate app/docs/guide/page.mdx\n    shiori nav /docs/guide/theming --meta app/docs/_meta.json\n    shiori toc app/docs/guide/theming/page.mdx"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to $SHIORI_CONFIG, <root>/shiori.toml, then the user config)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Build the search index for a content tree
    ///
    /// Reuses the persisted index when one exists unless --rebuild is given.
    Index {
        /// Content root directory
        root: PathBuf,

        /// Title map (JSON or TOML); defaults to <root>/_meta.json when present
        #[arg(long, value_name = "FILE")]
        meta: Option<PathBuf>,

        /// URL prefix the content root is served under
        #[arg(long, value_name = "PATH")]
        base: Option<String>,

        /// Ignore any persisted index and rebuild from the content files
        #[arg(long)]
        rebuild: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Fuzzy search a documentation corpus
    Search(SearchArgs),

    /// Resolve highlight markers in code blocks
    Annotate {
        /// Markdown document, or a plain code file with --raw
        file: PathBuf,

        /// Treat the file as a single code block
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Show breadcrumbs, neighbors and sidebar for a page
    Nav {
        /// Current URL path, e.g. /docs/guide/theming
        pathname: String,

        /// Title map (JSON or TOML)
        #[arg(long, value_name = "FILE")]
        meta: PathBuf,

        /// URL prefix the docs are served under
        #[arg(long, value_name = "PATH")]
        base: Option<String>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// List the second and third level headings of a page with their anchors
    Toc {
        /// Markdown or MDX page
        file: PathBuf,

        #[command(flatten)]
        format: FormatArg,
    },
}

/// Arguments for `shiori search`.
#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Search query
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    #[command(flatten)]
    pub source: CorpusSource,

    /// Matching algorithm (bitap or skim)
    #[arg(long, value_name = "MATCHER")]
    pub matcher: Option<MatcherKind>,

    /// Maximum number of results
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub format: FormatArg,
}

impl SearchArgs {
    /// The query words joined back into one string.
    pub fn query_string(&self) -> String {
        self.query.join(" ")
    }
}

/// Where the corpus for a search comes from.
#[derive(Args, Clone, Debug, Default)]
#[group(multiple = false)]
pub struct CorpusSource {
    /// Content root; its persisted index is used, or built in memory
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Persisted index file
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Base URL of a running docs site serving the corpus endpoint
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}
