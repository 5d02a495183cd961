use lingomark_core::config::loader::ConfigLoader;
use lingomark_core::{FilterContext, ParseOptions, Parser, TagPair};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn load_full_config_ok() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
locale = "it"
parsing_engine = "PlainText"

[tags]
metadata = ["---"]
content = "[[%ARGS%]], [[/]]"

[render]
pipeline = ["markdown", ["emoji"]]
options = { asset_root = "/static" }

[logging]
level = "debug"
file = "/tmp/lingomark/lgm.log"
"#;
    write_file(&cfg_path, toml);

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.source.as_deref(), Some(cfg_path.as_path()));
    assert_eq!(rc.config.locale(), "it");
    assert_eq!(rc.config.parsing_engine(), "PlainText");
    assert_eq!(rc.config.rendering_engine(), "html_pipeline");
    assert_eq!(rc.metadata_tags, TagPair::new("---", "---"));
    assert_eq!(rc.content_tags, TagPair::new("[[%ARGS%]]", "[[/]]"));
    assert_eq!(rc.logging.level, "debug");
    assert_eq!(rc.logging.file.as_ref().unwrap().display().to_string(), "/tmp/lingomark/lgm.log");

    let engine = rc.html_pipeline();
    assert_eq!(engine.default_pipeline(), [vec!["markdown".to_string()], vec!["emoji".to_string()]]);
    assert_eq!(engine.default_options()["asset_root"], "/static");
    assert_eq!(engine.default_options()["gfm"], true);
}

#[test]
fn minimal_config_uses_defaults() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("lingomark/config.toml");
    write_file(&cfg_path, "version = 1\n");

    let rc = ConfigLoader::load(Some(&cfg_path)).expect("should load");
    assert_eq!(rc.config.locale(), "en");
    assert_eq!(rc.metadata_tags, TagPair::metadata());
    assert_eq!(rc.content_tags, TagPair::content());
    assert!(rc.pipeline.is_none());
    assert_eq!(rc.logging.level, "info");
    assert!(rc.logging.file.is_none());
}

#[test]
fn configured_tags_drive_parsing() {
    let tmp = tempdir().unwrap();
    let cfg_path = tmp.path().join("config.toml");
    let toml = r#"
version = 1
locale = "it"

[tags]
metadata = "---"
content = ["{{lang %ARGS%}}", "{{/lang}}"]

[render]
pipeline = "markdown"
"#;
    write_file(&cfg_path, toml);
    let rc = ConfigLoader::load(Some(&cfg_path)).unwrap();
    let parser = Parser::from_resolved(&rc);

    let raw = "---\ntitle: Ciao\n---\nUno{{lang it}} due{{/lang}}{{lang en}} two{{/lang}}";
    let content = parser.parse(raw, &rc.parse_options()).unwrap();
    assert_eq!(content.title().as_plain().map(String::as_str), Some("Ciao"));

    let body = parser.body(&content, &[], &rc.parse_options()).unwrap();
    assert_eq!(body, "Uno due");

    let html = parser.render(&content, &rc.render_options(), &FilterContext::new()).unwrap();
    assert_eq!(html.trim(), "<p>Uno due</p>");

    let defaults = parser.body(&content, &["en".to_string()], &ParseOptions::new()).unwrap();
    assert_eq!(defaults, "Uno{{lang it}} due{{/lang}}{{lang en}} two{{/lang}}");
}
