use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

const DOCUMENT: &str = r#"{{metadata}}
uid: post-1
title:
  en: Hello
  it: Ciao
author:
  name: Jane
  email: jane@example.com
locales: [en, it]
category: news
{{/metadata}}
Shared.
{{content: it}}
Solo italiano.
{{/content}}
{{content: en}}
English only.
{{/content}}
"#;

fn setup() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let doc = tmp.path().join("post.md");
    fs::write(&doc, DOCUMENT).unwrap();
    (tmp, doc)
}

fn lgm(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lgm"));
    cmd.env("XDG_CONFIG_HOME", home);
    cmd
}

#[test]
fn parse_prints_a_table() {
    let (tmp, doc) = setup();
    lgm(tmp.path())
        .arg("parse")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Attribute"))
        .stdout(predicate::str::contains("en: Hello; it: Ciao"))
        .stdout(predicate::str::contains("Jane <jane@example.com>"))
        .stdout(predicate::str::contains("metadata.category"));
}

#[test]
fn parse_narrows_attributes_to_a_locale() {
    let (tmp, doc) = setup();
    lgm(tmp.path())
        .args(["parse", "--locale", "it"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ciao"))
        .stdout(predicate::str::contains("Hello").not());
}

#[test]
fn parse_exports_json() {
    let (tmp, doc) = setup();
    let output = lgm(tmp.path())
        .args(["parse", "--json", "--exclude", "body", "--exclude", "author", "--exclude-empty"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "uid": "post-1",
            "locales": ["en", "it"],
            "title": {"en": "Hello", "it": "Ciao"},
            "metadata": {"category": "news"},
        })
    );
}

#[test]
fn parse_rejects_invalid_metadata() {
    let tmp = tempdir().unwrap();
    let doc = tmp.path().join("bad.md");
    fs::write(&doc, "{{metadata}}\n- a\n- b\n{{/metadata}}\nBody").unwrap();

    lgm(tmp.path())
        .arg("parse")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid metadata"));

    lgm(tmp.path())
        .args(["parse", "--json", "--default-metadata", "title: Fallback"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "Fallback""#));
}

#[test]
fn body_filters_sections() {
    let (tmp, doc) = setup();
    lgm(tmp.path())
        .args(["body", "-l", "it"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solo italiano."))
        .stdout(predicate::str::contains("English only.").not());

    lgm(tmp.path())
        .arg("body")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("English only."))
        .stdout(predicate::str::contains("Solo italiano.").not());
}

#[test]
fn body_reads_stdin() {
    let tmp = tempdir().unwrap();
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("lgm"))
        .env("XDG_CONFIG_HOME", tmp.path())
        .args(["body", "--locale", "it", "-"])
        .write_stdin(DOCUMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains("Solo italiano."));
}

#[test]
fn body_rejects_unavailable_locales() {
    let (tmp, doc) = setup();
    lgm(tmp.path())
        .args(["body", "--locale", "fr"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("content is not available for locales: fr"));
}

#[test]
fn render_runs_the_requested_pipeline() {
    let (tmp, doc) = setup();
    let output = lgm(tmp.path())
        .args(["render", "--locale", "it", "--pipeline", "markdown"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let html = String::from_utf8(output.stdout).unwrap();
    insta::assert_snapshot!(html.trim(), @r"
    <p>Shared.</p>
    <p>Solo italiano.</p>
    ");
}

#[test]
fn render_flags_switch_filters_off() {
    let tmp = tempdir().unwrap();
    let doc = tmp.path().join("emoji.md");
    fs::write(&doc, "# Title :smile:").unwrap();

    lgm(tmp.path())
        .arg("render")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"class="anchor""#))
        .stdout(predicate::str::contains(r#"class="emoji""#));

    let output = lgm(tmp.path())
        .args(["render", "--no-toc", "--no-emoji"])
        .arg(&doc)
        .output()
        .unwrap();
    let html = String::from_utf8(output.stdout).unwrap();
    assert_eq!(html.trim(), "<h1>Title :smile:</h1>");
}

#[test]
fn render_fails_on_unknown_filters() {
    let (tmp, doc) = setup();
    lgm(tmp.path())
        .args(["render", "--pipeline", "markdown,nope"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown filter: nope"));
}

#[test]
fn render_uses_configured_tags() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        "version = 1\nlocale = \"it\"\n[tags]\nmetadata = \"---\"\ncontent = [\"{{lang %ARGS%}}\", \"{{/lang}}\"]\n",
    )
    .unwrap();
    let doc = tmp.path().join("post.md");
    fs::write(&doc, "---\ntitle: T\n---\nUno{{lang it}} due{{/lang}}{{lang en}} two{{/lang}}").unwrap();

    let output = lgm(tmp.path())
        .args(["--config", cfg.to_str().unwrap(), "render", "--pipeline", "markdown"])
        .arg(&doc)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap().trim(), "<p>Uno due</p>");
}
