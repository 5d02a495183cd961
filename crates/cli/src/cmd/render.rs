use color_eyre::eyre::Result;
use lingomark_core::{FilterContext, Parser, RenderOptions};
use std::path::Path;

use super::{load_config, read_document};
use crate::RenderArgs;

pub fn run(config: Option<&Path>, args: &RenderArgs) -> Result<()> {
    let cfg = load_config(config)?;
    let parser = Parser::from_resolved(&cfg);

    let raw = read_document(&args.file)?;
    let content = parser.parse(&raw, &cfg.parse_options())?;

    let html = parser.render(&content, &render_options(&cfg.render_options(), args), &FilterContext::new())?;
    println!("{}", html.trim_end());
    Ok(())
}

fn render_options(base: &RenderOptions, args: &RenderArgs) -> RenderOptions {
    let mut options = base.clone().locales(args.locale.as_slice());
    if let Some(ref engine) = args.engine {
        options = options.engine(engine.as_str());
    }
    if let Some(ref pipeline) = args.pipeline {
        options = options.pipeline(pipeline.iter().map(String::as_str));
    }

    let switches = [
        ("markdown", args.no_markdown),
        ("toc", args.no_toc),
        ("links", args.no_links),
        ("emoji", args.no_emoji),
        ("image_max_width", args.no_image_max_width),
    ];
    for (name, off) in switches {
        if off {
            options = options.disable(name);
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> RenderArgs {
        RenderArgs {
            file: PathBuf::from("-"),
            locale: vec!["it".into()],
            pipeline: None,
            engine: None,
            no_markdown: false,
            no_toc: true,
            no_links: false,
            no_emoji: true,
            no_image_max_width: false,
        }
    }

    #[test]
    fn flags_become_toggles() {
        let options = render_options(&RenderOptions::new(), &args());
        assert_eq!(options.locales, ["it"]);
        assert!(options.enabled("markdown"));
        assert!(!options.enabled("toc"));
        assert!(!options.enabled("emoji"));
        assert!(options.pipeline.is_none());
    }

    #[test]
    fn explicit_pipeline_is_kept() {
        let args = RenderArgs { pipeline: Some(vec!["markdown".into()]), ..args() };
        let options = render_options(&RenderOptions::new(), &args);
        assert_eq!(options.pipeline.as_deref(), Some(&["markdown".to_string()][..]));
    }
}
