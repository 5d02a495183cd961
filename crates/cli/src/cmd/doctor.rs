use color_eyre::eyre::Result;
use lingomark_core::config::loader::{ConfigLoader, default_config_path};
use lingomark_core::{EngineKind, Parser, ResolvedConfig};
use serde::Serialize;
use std::path::Path;

use crate::{DoctorArgs, logging};

/// What `lgm doctor` reports about a loaded config.
#[derive(Debug, Serialize)]
struct DoctorReport {
    path: String,
    locale: String,
    parsing_engine: String,
    rendering_engine: String,
    metadata_tags: [String; 2],
    content_tags: [String; 2],
    pipeline: Vec<String>,
    parsing_engines: Vec<String>,
    rendering_engines: Vec<String>,
    log_level: String,
}

pub fn run(config: Option<&Path>, args: &DoctorArgs) -> Result<()> {
    let report = match ConfigLoader::load(config) {
        Ok(rc) => {
            logging::init(&rc)?;
            check(&rc)
        }
        Err(e) => Err(e.to_string()),
    };

    match report {
        Ok(report) if args.json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Ok(report) => print_report(&report),
        Err(problem) => {
            println!("FAIL lgm doctor");
            println!("{problem}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            logging::flush();
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Resolves the configured engines and tags, reporting the first problem.
fn check(rc: &ResolvedConfig) -> Result<DoctorReport, String> {
    let parser = Parser::from_resolved(rc);
    parser.create_parsing_engine(None).map_err(|e| e.to_string())?;
    parser.create_rendering_engine(None).map_err(|e| e.to_string())?;
    rc.metadata_tags.compile().map_err(|e| e.to_string())?;
    rc.content_tags.compile().map_err(|e| e.to_string())?;

    let pipeline = rc
        .html_pipeline()
        .default_pipeline()
        .iter()
        .map(|stage| stage.join("/"))
        .collect();

    Ok(DoctorReport {
        path: rc
            .source
            .as_ref()
            .map_or_else(|| "(built-in defaults)".to_string(), |p| p.display().to_string()),
        locale: rc.config.locale().to_string(),
        parsing_engine: rc.config.parsing_engine().to_string(),
        rendering_engine: rc.config.rendering_engine().to_string(),
        metadata_tags: [rc.metadata_tags.start.clone(), rc.metadata_tags.end.clone()],
        content_tags: [rc.content_tags.start.clone(), rc.content_tags.end.clone()],
        pipeline,
        parsing_engines: parser.registry().names(EngineKind::Parsing),
        rendering_engines: parser.registry().names(EngineKind::Rendering),
        log_level: rc.logging.level.clone(),
    })
}

fn print_report(report: &DoctorReport) {
    println!("OK   lgm doctor");
    println!("path: {}", report.path);
    println!("locale: {}", report.locale);
    println!("parsing_engine: {}", report.parsing_engine);
    println!("rendering_engine: {}", report.rendering_engine);
    println!("metadata_tags: {} ... {}", report.metadata_tags[0], report.metadata_tags[1]);
    println!("content_tags:  {} ... {}", report.content_tags[0], report.content_tags[1]);
    println!("pipeline: {}", report.pipeline.join(", "));
    println!("engines.parsing:   {}", report.parsing_engines.join(", "));
    println!("engines.rendering: {}", report.rendering_engines.join(", "));
    println!("logging.level: {}", report.log_level);
}
