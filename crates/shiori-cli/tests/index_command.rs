#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{sample_site, shiori_cmd};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

#[test]
fn index_writes_persisted_index() {
    let site = sample_site();

    let output = shiori_cmd()
        .args(["index", "-f", "json"])
        .arg(site.path())
        .output()
        .expect("run shiori index");
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).expect("json summary");
    assert_eq!(summary["documents"], 3);
    assert_eq!(summary["reused"], false);

    let raw = fs::read_to_string(site.path().join("shiori-search-index.json")).expect("index file");
    let docs: Value = serde_json::from_str(&raw).expect("index json");
    let docs = docs.as_array().expect("array");

    let intro = docs.iter().find(|d| d["id"] == "introduction").expect("introduction");
    assert_eq!(intro["title"], "Introduction");
    assert_eq!(intro["url"], "/docs");

    let search = docs.iter().find(|d| d["id"] == "guide/search").expect("search page");
    assert_eq!(search["title"], "Search");
    assert_eq!(search["url"], "/docs/guide/search");

    assert!(!raw.contains("import {"));
    assert!(!raw.contains("--accent"));
}

#[test]
fn index_reuses_existing_index_until_rebuild() {
    let site = sample_site();
    shiori_cmd().arg("index").arg(site.path()).arg("-f").arg("json").assert().success();

    fs::write(site.path().join("faq.mdx"), "Questions and answers.\n").expect("add page");

    shiori_cmd()
        .arg("index")
        .arg(site.path())
        .args(["-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reused\": true"))
        .stdout(predicate::str::contains("\"documents\": 3"));

    shiori_cmd()
        .arg("index")
        .arg(site.path())
        .args(["--rebuild", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reused\": false"))
        .stdout(predicate::str::contains("\"documents\": 4"));
}

#[test]
fn index_honours_base_override() {
    let site = sample_site();
    shiori_cmd()
        .arg("index")
        .arg(site.path())
        .args(["--base", "/handbook", "-f", "json"])
        .assert()
        .success();

    let raw = fs::read_to_string(site.path().join("shiori-search-index.json")).expect("index file");
    assert!(raw.contains("\"/handbook/guide/theming\""));
}

#[test]
fn index_text_output() {
    let site = sample_site();
    shiori_cmd()
        .arg("index")
        .arg(site.path())
        .args(["-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 3 documents"));
}

#[test]
fn index_missing_root_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    shiori_cmd()
        .arg("index")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn malformed_config_is_reported() {
    let site = sample_site();
    let config = site.path().join("bad.toml");
    fs::write(&config, "[search]\nthreshold = 3.0\n").expect("write config");

    shiori_cmd()
        .arg("--config")
        .arg(&config)
        .arg("index")
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold"));
}
