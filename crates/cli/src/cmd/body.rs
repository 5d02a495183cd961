use color_eyre::eyre::Result;
use lingomark_core::Parser;
use std::path::Path;

use super::{load_config, read_document};
use crate::BodyArgs;

pub fn run(config: Option<&Path>, args: &BodyArgs) -> Result<()> {
    let cfg = load_config(config)?;
    let parser = Parser::from_resolved(&cfg);

    let mut options = cfg.parse_options();
    options.engine = args.engine.clone();

    let raw = read_document(&args.file)?;
    let content = parser.parse(&raw, &options)?;
    let body = parser.body(&content, &args.locale, &options)?;

    println!("{body}");
    Ok(())
}
