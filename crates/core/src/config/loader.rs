use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;
use tracing::debug;

use crate::config::types::{Config, ConfigFile, LoggingConfig, ResolvedConfig};
use crate::scanner::TagPair;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `config_path`, or the default location when `None`.
    ///
    /// A missing default file is not an error: the built-in defaults apply.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            if config_path.is_some() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ResolvedConfig::default());
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        debug!(path = %path.display(), "loaded config file");
        Self::resolve(path, cf)
    }

    fn resolve(path: PathBuf, cf: ConfigFile) -> Result<ResolvedConfig, ConfigError> {
        let mut config = Config::new();
        config.set_locale(cf.locale.as_deref());
        config.set_parsing_engine(cf.parsing_engine.as_deref());
        config.set_rendering_engine(cf.rendering_engine.as_deref());

        let metadata_tags = match &cf.tags.metadata {
            Some(value) => TagPair::from_value(value, TagPair::metadata()),
            None => TagPair::metadata(),
        };
        let content_tags = match &cf.tags.content {
            Some(value) => TagPair::from_value(value, TagPair::content()),
            None => TagPair::content(),
        };

        let logging = match cf.logging.file {
            Some(ref file) => LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            },
            None => cf.logging.clone(),
        };

        Ok(ResolvedConfig {
            source: Some(path),
            config,
            metadata_tags,
            content_tags,
            pipeline: cf.render.pipeline,
            pipeline_options: cf.render.options,
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("lingomark").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("lingomark").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
