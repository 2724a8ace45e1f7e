//! Nav command implementation

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use shiori_core::nav::{
    Breadcrumb, NavLink, breadcrumbs, current_path, is_active, is_expanded, neighbors,
    sidebar_items,
};
use shiori_core::{ShioriConfig, TitleMap};
use std::path::Path;

use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavEntry {
    path: String,
    label: String,
    level: usize,
    active: bool,
    expanded: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    site_title: Option<String>,
    current: String,
    breadcrumbs: Vec<Breadcrumb>,
    previous: Option<NavLink>,
    next: Option<NavLink>,
    sidebar: Vec<NavEntry>,
}

/// Execute the nav command.
pub fn execute(
    pathname: &str,
    meta: &Path,
    base: Option<&str>,
    config: &ShioriConfig,
    format: OutputFormat,
) -> Result<()> {
    let titles = TitleMap::load(meta)?;
    let base = base.unwrap_or(config.index.docs_base.as_str());
    let output = build(pathname, base, &titles);

    match format {
        OutputFormat::Text => print_text(&output),
        OutputFormat::Json => print_json(&output)?,
    }
    Ok(())
}

fn build(pathname: &str, base: &str, titles: &TitleMap) -> NavOutput {
    let current = current_path(pathname, base.trim_end_matches('/'));
    let sidebar = sidebar_items(titles)
        .into_iter()
        .map(|item| NavEntry {
            active: is_active(&item, current),
            expanded: is_expanded(&item, current),
            path: item.path,
            label: item.label,
            level: item.level,
        })
        .collect();
    let around = neighbors(pathname, base, titles);

    NavOutput {
        site_title: titles.site_title().map(str::to_string),
        current: current.to_string(),
        breadcrumbs: breadcrumbs(pathname, base, titles),
        previous: around.previous,
        next: around.next,
        sidebar,
    }
}

fn print_text(output: &NavOutput) {
    if let Some(title) = &output.site_title {
        println!("{}", title.bold());
    }

    if !output.breadcrumbs.is_empty() {
        let trail: Vec<&str> = output.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
        println!("{}", trail.join(" > "));
    }
    println!();

    for entry in &output.sidebar {
        let indent = "  ".repeat(entry.level);
        let marker = if entry.expanded && !entry.active { "v" } else { "-" };
        if entry.active {
            println!("{indent}{} {}", "*".green(), entry.label.green().bold());
        } else {
            println!("{indent}{marker} {}", entry.label);
        }
    }

    println!();
    if let Some(previous) = &output.previous {
        println!("{} {} {}", "Previous:".bright_black(), previous.label, previous.url.cyan());
    }
    if let Some(next) = &output.next {
        println!("{} {} {}", "Next:".bright_black(), next.label, next.url.cyan());
    }
}
