//! Runtime defaults and the `config.toml` loader.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path};
pub use types::{
    Config, ConfigFile, DEFAULT_PARSING_ENGINE, DEFAULT_RENDERING_ENGINE, LoggingConfig,
    RenderConfig, ResolvedConfig, TagsConfig,
};
