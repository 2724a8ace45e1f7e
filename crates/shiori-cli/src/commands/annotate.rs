//! Annotate command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use shiori_core::code::{AnnotatedBlock, AnnotationMarkers, HighlightSpec, annotate_document, annotate_with};
use shiori_core::ShioriConfig;
use std::fs;
use std::path::Path;

use crate::output::{OutputFormat, print_json};

/// Execute the annotate command.
///
/// Markdown documents are split into fenced blocks and each block is
/// annotated; with `raw` the whole file is one block of code.
pub fn execute(file: &Path, raw: bool, config: &ShioriConfig, format: OutputFormat) -> Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let markers = AnnotationMarkers::from(&config.annotate);

    if raw {
        let spec = annotate_with(&source, &markers);
        match format {
            OutputFormat::Text => print_spec(&spec),
            OutputFormat::Json => print_json(&spec)?,
        }
        return Ok(());
    }

    let blocks = annotate_document(&source, &markers)?;
    match format {
        OutputFormat::Text => print_blocks(&blocks),
        OutputFormat::Json => print_json(&blocks)?,
    }
    Ok(())
}

fn print_blocks(blocks: &[AnnotatedBlock]) {
    if blocks.is_empty() {
        println!("No fenced code blocks found.");
        return;
    }

    for block in blocks {
        let mut header = format!("{} (line {})", block.meta.language, block.start_line);
        if let Some(filename) = &block.meta.filename {
            header = format!("{filename} - {header}");
        }
        if block.meta.primitive {
            header.push_str(" [primitive]");
        }
        println!("{}", header.bold());
        print_spec(&block.highlight);
        println!();
    }
}

fn print_spec(spec: &HighlightSpec) {
    if spec.is_single_line() {
        let line = spec.lines().next().unwrap_or_default();
        if spec.is_highlighted(0) {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
        return;
    }

    let width = spec.line_count().to_string().len();
    for (idx, line) in spec.lines().enumerate() {
        let number = format!("{:>width$}", idx + 1);
        if spec.is_highlighted(idx) {
            println!("{} {} {}", number.yellow(), ">".yellow(), line.yellow());
        } else {
            println!("{} {} {}", number.bright_black(), "|".bright_black(), line);
        }
    }
}
