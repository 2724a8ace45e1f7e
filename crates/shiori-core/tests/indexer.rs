#![allow(clippy::expect_used, clippy::unwrap_used)]

use shiori_core::indexer::is_import_line;
use shiori_core::{
    DocIndexer, IndexConfig, IndexStore, TitleMap, build_index, load_persisted_index, write_index,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
    fs::write(path, contents).expect("write");
}

fn sample_site() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    write(
        root,
        "page.mdx",
        "---\ntitle: Welcome\n---\nimport { Card } from \"shiori\";\n\n# Welcome\n\nShiori is a docs theme.\n",
    );
    write(
        root,
        "installation/page.mdx",
        "import CodeBlock from 'shiori/codeblock'\n\n## Install\n\n<CodeBlock language=\"bash\">\nnpm install shiori\n</CodeBlock>\n\nThen restart the **dev server**.\n",
    );
    write(
        root,
        "guide/theming.mdx",
        "---\ntitle: Theming Guide\n---\nColors live in `theme.css`. See [the reference](/docs/reference).\n\n<codeblock>\nimport x from 'y'\n</codeblock>\n",
    );
    write(root, "guide/search/page.mdx", "Search uses fuzzy matching.");
    write(root, "notes.md", "not indexed by default");
    dir
}

fn titles() -> TitleMap {
    [
        ("title", "Shiori"),
        ("installation", "Installation"),
        ("guide/search", "Search"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn builds_documents_with_expected_ids_titles_and_urls() {
    let site = sample_site();
    let docs = build_index(site.path(), &titles()).expect("Should build");

    let triples: Vec<_> = docs
        .iter()
        .map(|d| (d.id.as_str(), d.title.as_str(), d.url.as_str()))
        .collect();
    assert_eq!(
        triples,
        vec![
            ("guide/search", "Search", "/docs/guide/search"),
            ("guide/theming", "Theming Guide", "/docs/guide/theming"),
            ("installation", "Installation", "/docs/installation"),
            ("introduction", "Introduction", "/docs"),
        ]
    );
}

#[test]
fn content_has_no_code_blocks_imports_or_tags() {
    let site = sample_site();
    write(
        site.path(),
        "guide/nested.mdx",
        "Intro\n\n- import x from 'y'\n> import z from 'w'\n* <b>import</b> { a } from 'b'\n",
    );
    let docs = build_index(site.path(), &titles()).expect("Should build");

    for doc in &docs {
        let lower = doc.content.to_lowercase();
        assert!(!lower.contains("<codeblock"), "{}: {}", doc.id, doc.content);
        assert!(!lower.contains("</codeblock>"), "{}: {}", doc.id, doc.content);
        assert!(!doc.content.lines().any(is_import_line), "{}", doc.id);
        assert!(!doc.content.contains('<'), "{}", doc.id);
    }

    let install = docs.iter().find(|d| d.id == "installation").expect("doc");
    assert_eq!(install.content, "Install\n\nThen restart the dev server.");

    let theming = docs.iter().find(|d| d.id == "guide/theming").expect("doc");
    assert_eq!(theming.content, "Colors live in theme.css. See the reference.");

    let nested = docs.iter().find(|d| d.id == "guide/nested").expect("doc");
    assert_eq!(nested.content, "Intro");
}

#[test]
fn rebuild_is_byte_identical() {
    let site = sample_site();

    let first = build_index(site.path(), &titles()).expect("first build");
    let first_dir = TempDir::new().expect("temp dir");
    write_index(first_dir.path(), &first).expect("write first");

    let second = build_index(site.path(), &titles()).expect("second build");
    let second_dir = TempDir::new().expect("temp dir");
    write_index(second_dir.path(), &second).expect("write second");

    let a = fs::read(IndexStore::new(first_dir.path()).path()).expect("read");
    let b = fs::read(IndexStore::new(second_dir.path()).path()).expect("read");
    assert_eq!(a, b);
}

#[test]
fn persisted_index_loads_consistently() {
    let site = sample_site();
    assert!(load_persisted_index(site.path()).expect("load").is_none());

    let docs = build_index(site.path(), &titles()).expect("build");
    write_index(site.path(), &docs).expect("write");

    let once = load_persisted_index(site.path()).expect("load").expect("present");
    let twice = load_persisted_index(site.path()).expect("load").expect("present");
    assert_eq!(once, twice);
    assert_eq!(once, docs);
}

#[test]
fn persisted_index_file_is_not_indexed_on_rebuild() {
    let site = sample_site();
    let docs = build_index(site.path(), &titles()).expect("build");
    write_index(site.path(), &docs).expect("write");

    let rebuilt = build_index(site.path(), &titles()).expect("rebuild");
    assert_eq!(rebuilt, docs);
}

#[test]
fn configured_extensions_and_base_apply() {
    let site = sample_site();
    let config = IndexConfig {
        docs_base: "/handbook".to_string(),
        extensions: vec!["mdx".to_string(), "md".to_string()],
        ..IndexConfig::default()
    };
    let docs = DocIndexer::new(&config)
        .expect("indexer")
        .build_index(site.path(), &TitleMap::new())
        .expect("build");

    let notes = docs.iter().find(|d| d.id == "notes").expect("md file indexed");
    assert_eq!(notes.url, "/handbook/notes");
    assert_eq!(notes.title, "notes");
}

#[test]
fn malformed_front_matter_does_not_abort_build() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "broken.mdx", "---\ntitle: [oops\n---\nBody survives.");

    let docs = build_index(dir.path(), &TitleMap::new()).expect("build");
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "broken");
    assert_eq!(docs[0].content, "Body survives.");
}
