//! shiori CLI - search index tooling for shiori documentation sites
//!
//! This is the main entry point for the shiori command-line interface.
//! Each subcommand lives in its own module under `commands`.

use anyhow::Result;
use clap::Parser;
use shiori_core::ShioriConfig;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::initialize_logging(&cli)?;

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let explicit_config = cli.config.as_deref();

    match cli.command {
        Commands::Index {
            ref root,
            ref meta,
            ref base,
            rebuild,
            ref format,
        } => {
            let config = ShioriConfig::resolve(explicit_config, Some(root))?;
            commands::build_index(
                root,
                meta.as_deref(),
                base.as_deref(),
                rebuild,
                &config,
                format.resolve(),
            )?;
        },

        Commands::Search(ref args) => {
            let config = ShioriConfig::resolve(explicit_config, args.source.root.as_deref())?;
            commands::search(args, &config, args.format.resolve()).await?;
        },

        Commands::Annotate {
            ref file,
            raw,
            ref format,
        } => {
            let config = ShioriConfig::resolve(explicit_config, None)?;
            commands::annotate(file, raw, &config, format.resolve())?;
        },

        Commands::Nav {
            ref pathname,
            ref meta,
            ref base,
            ref format,
        } => {
            let config = ShioriConfig::resolve(explicit_config, None)?;
            commands::show_nav(
                pathname,
                meta,
                base.as_deref(),
                &config,
                format.resolve(),
            )?;
        },

        Commands::Toc { ref file, ref format } => {
            commands::show_toc(file, format.resolve())?;
        },
    }

    Ok(())
}
