//! Logging initialization and color control.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs go to stderr at WARN by default. JSON output drops the level to
/// ERROR so stdout stays parseable, unless `--verbose` was given.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let mut level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let mut machine_output = false;
    if !cli.verbose {
        let format = match &cli.command {
            Commands::Index { format, .. }
            | Commands::Annotate { format, .. }
            | Commands::Nav { format, .. }
            | Commands::Toc { format, .. } => format.resolve(),
            Commands::Search(args) => args.format.resolve(),
        };

        if format.is_machine_readable() {
            level = Level::ERROR;
            machine_output = true;
        }
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
