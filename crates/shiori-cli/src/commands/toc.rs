//! Table of contents command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use shiori_core::{TocItem, toc_items};
use std::fs;
use std::path::Path;

use crate::output::{OutputFormat, print_json};

/// Execute the toc command.
pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let items = toc_items(&source)
        .with_context(|| format!("Failed to parse headings in {}", file.display()))?;

    match format {
        OutputFormat::Text => print_text(&items),
        OutputFormat::Json => print_json(&items)?,
    }
    Ok(())
}

fn print_text(items: &[TocItem]) {
    if items.is_empty() {
        println!("No headings found.");
        return;
    }

    for item in items {
        println!("{}", render_line(item));
    }
}

fn render_line(item: &TocItem) -> String {
    let indent = "  ".repeat(item.level.saturating_sub(2));
    format!("{indent}{} {}", item.text, format!("#{}", item.id).bright_black())
}
