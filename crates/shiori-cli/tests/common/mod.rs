#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Empty config file so tests never pick up a developer's settings.
fn empty_config() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    let dir = CONFIG_DIR.get_or_init(|| {
        let dir = tempfile::tempdir().expect("failed to create config dir for tests");
        fs::write(dir.path().join("config.toml"), "").expect("write empty config");
        dir
    });
    dir.path()
}

/// Create a configured `shiori` command suitable for integration tests.
#[allow(dead_code)]
pub fn shiori_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shiori"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("SHIORI_CONFIG", empty_config().join("config.toml"));
    cmd.env_remove("SHIORI_OUTPUT_FORMAT");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write `files` (relative path, contents) under a fresh content root.
#[allow(dead_code)]
pub fn content_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create content root");
    for (relative, contents) in files {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write content file");
    }
    dir
}

/// A small docs site with an introduction, two guide pages and a title map.
#[allow(dead_code)]
pub fn sample_site() -> TempDir {
    content_tree(&[
        (
            "page.mdx",
            "---\ntitle: Welcome\n---\nimport { Callout } from 'shiori'\n\n# Welcome\n\nShiori is a documentation theme.\n",
        ),
        (
            "guide/theming/page.mdx",
            "---\ntitle: Theming\n---\n\nPick colors for dark mode and light mode.\n\n<CodeBlock lang=\"css\">\n:root { --accent: red; }\n</CodeBlock>\n",
        ),
        (
            "guide/search/page.mdx",
            "Search builds an index of every page at build time.\n",
        ),
        (
            "_meta.json",
            r#"{"title": "Shiori", "guide": "Guide", "guide/theming": "Theming", "guide/search": "Search"}"#,
        ),
    ])
}
