//! Parsing engines: turn raw documents into [`Content`](crate::Content).

pub mod engine;
pub mod options;
pub mod plain_text;

pub use engine::ParsingEngine;
pub use options::ParseOptions;
pub use plain_text::PlainText;
