pub mod body;
pub mod doctor;
pub mod output;
pub mod parse;
pub mod render;

use color_eyre::eyre::{Result, WrapErr};
use lingomark_core::config::loader::ConfigLoader;
use lingomark_core::ResolvedConfig;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

use crate::logging;

/// Loads the config and installs logging from it.
pub fn load_config(path: Option<&Path>) -> Result<ResolvedConfig> {
    let cfg = ConfigLoader::load(path).wrap_err("failed to load config")?;
    logging::init(&cfg)?;
    Ok(cfg)
}

/// Reads a document from `path`, or stdin when it is `-`.
pub fn read_document(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "reading document");
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw).wrap_err("failed to read stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
