use color_eyre::eyre::{Result, WrapErr};
use lingomark_core::{JsonOptions, Parser};
use std::path::Path;
use tabled::{Table, settings::Style};

use super::output::attribute_rows;
use super::{load_config, read_document};
use crate::ParseArgs;

pub fn run(config: Option<&Path>, args: &ParseArgs) -> Result<()> {
    let cfg = load_config(config)?;
    let parser = Parser::from_resolved(&cfg);

    let mut options = cfg.parse_options();
    options.engine = args.engine.clone();
    if let Some(ref yaml) = args.default_metadata {
        let default = serde_yaml::from_str(yaml).wrap_err("--default-metadata is not valid YAML")?;
        options = options.default_metadata(default);
    }

    let raw = read_document(&args.file)?;
    let content = parser.parse(&raw, &options)?;

    if args.json {
        let json_options = JsonOptions::default()
            .exclude(args.exclude.iter().cloned())
            .exclude_empty(args.exclude_empty);
        println!("{}", serde_json::to_string_pretty(&content.to_json(&json_options))?);
        return Ok(());
    }

    let rows = if args.locale.is_empty() {
        attribute_rows(&content, content.title(), content.summary(), content.tags(), content.more())
    } else {
        let locales = args.locale.as_slice();
        let title = content.get_title(locales)?;
        let summary = content.get_summary(locales)?;
        let tags = content.get_tags(locales)?;
        let more = content.get_more(locales)?;
        attribute_rows(&content, &title, &summary, &tags, &more)
    };

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}
