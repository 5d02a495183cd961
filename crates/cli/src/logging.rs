use color_eyre::eyre::{Result, WrapErr};
use lingomark_core::ResolvedConfig;
use lingomark_core::config::LoggingConfig;
use std::fs::File;
use std::sync::Mutex;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Levels of the stderr and the file layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Levels {
    stderr: LevelFilter,
    file: LevelFilter,
}

impl Levels {
    /// `file_level` falls back to `level`; unknown names give INFO on stderr
    /// and DEBUG in the file.
    fn from_config(logging: &LoggingConfig) -> Self {
        let file = logging.file_level.as_deref().unwrap_or(&logging.level);
        Self {
            stderr: parse_level(&logging.level).unwrap_or(LevelFilter::INFO),
            file: parse_level(file).unwrap_or(LevelFilter::DEBUG),
        }
    }
}

/// Installs the stderr layer and, when `[logging] file` is set, a plain-text
/// file layer. `RUST_LOG` directives apply to both.
pub fn init(cfg: &ResolvedConfig) -> Result<()> {
    let levels = Levels::from_config(&cfg.logging);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(levels.stderr));

    let registry = tracing_subscriber::registry().with(stderr_layer);

    let Some(path) = cfg.logging.file.as_deref() else {
        registry.init();
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut slot) = LOG_GUARD.lock() {
        *slot = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter(levels.file));

    registry.with(file_layer).init();
    Ok(())
}

/// Flushes the file layer. Events logged afterwards are not written.
pub fn flush() {
    if let Ok(mut slot) = LOG_GUARD.lock() {
        slot.take();
    }
}

fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
