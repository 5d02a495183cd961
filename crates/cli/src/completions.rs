//! Static completion scripts and dynamic value completers.
//!
//! Dynamic completion is driven by `COMPLETE=<shell> lgm`; the completers
//! below only need the built-in registries and, for locales, the config file.

use clap::CommandFactory;
use clap_complete::engine::CompletionCandidate;
use clap_complete::{Shell, generate};
use lingomark_core::config::loader::ConfigLoader;
use lingomark_core::rendering::FilterRegistry;
use lingomark_core::{EngineKind, EngineRegistry};
use std::ffi::OsStr;
use std::io;

use crate::Cli;

/// Locales offered even without a config file.
const COMMON_LOCALES: [&str; 8] = ["*", "de", "en", "es", "fr", "it", "ja", "pt"];

pub fn print_script(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "lgm", &mut io::stdout());
}

/// Complete locales: the configured one first, then common codes.
pub fn complete_locales(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");
    let mut names: Vec<String> = Vec::new();

    if let Ok(cfg) = ConfigLoader::load(None) {
        names.push(cfg.config.locale().to_string());
    }
    for locale in COMMON_LOCALES {
        if !names.iter().any(|n| n == locale) {
            names.push(locale.to_string());
        }
    }

    candidates(names, current_str)
}

pub fn complete_parsing_engines(current: &OsStr) -> Vec<CompletionCandidate> {
    let names = EngineRegistry::with_builtins().names(EngineKind::Parsing);
    candidates(names, current.to_str().unwrap_or(""))
}

pub fn complete_rendering_engines(current: &OsStr) -> Vec<CompletionCandidate> {
    let names = EngineRegistry::with_builtins().names(EngineKind::Rendering);
    candidates(names, current.to_str().unwrap_or(""))
}

/// Complete filter names; `current` may already hold earlier comma separated names.
pub fn complete_filters(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");
    let (done, partial) = match current_str.rsplit_once(',') {
        Some((done, partial)) => (format!("{done},"), partial),
        None => (String::new(), current_str),
    };

    FilterRegistry::with_builtins()
        .names()
        .into_iter()
        .filter(|name| name.starts_with(partial))
        .map(|name| CompletionCandidate::new(format!("{done}{name}")))
        .collect()
}

fn candidates(names: Vec<String>, prefix: &str) -> Vec<CompletionCandidate> {
    names.into_iter().filter(|n| n.starts_with(prefix)).map(CompletionCandidate::new).collect()
}
