//! Error taxonomy shared by every parsing and rendering operation.

use std::fmt;

use thiserror::Error;

/// Which side of the engine registry a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Parsing,
    Rendering,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Parsing => f.write_str("parsing"),
            EngineKind::Rendering => f.write_str("rendering"),
        }
    }
}

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum Error {
    /// A metadata block was present but could not be decoded into a mapping.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// A start or end marker could not be turned into a pattern.
    #[error("invalid tags: {0}")]
    InvalidTags(String),

    /// A date-like field could not be parsed by any known format.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The content is not enabled for any of the requested locales.
    #[error("content is not available for locales: {}", .0.join(", "))]
    UnavailableLocalization(Vec<String>),

    /// No engine is registered under the requested name.
    #[error("unknown {kind} engine: {name}")]
    UnknownEngine { kind: EngineKind, name: String },

    /// An engine operation was invoked that the engine does not provide.
    #[error("{0} is not implemented by this engine")]
    Unimplemented(&'static str),

    /// Anything that went wrong while running the rendering pipeline.
    #[error("rendering failed: {0}")]
    Rendering(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure() {
        let err = Error::UnavailableLocalization(vec!["de".into(), "fr".into()]);
        assert_eq!(err.to_string(), "content is not available for locales: de, fr");

        let err = Error::UnknownEngine { kind: EngineKind::Rendering, name: "pdf".into() };
        assert_eq!(err.to_string(), "unknown rendering engine: pdf");
    }
}
