//! The content model: a parsed document body with locale-aware attributes.

pub mod author;
pub mod dates;
pub mod json;
pub mod types;
pub mod validation;

pub use author::Author;
pub use dates::{ToUtc, parse_datetime};
pub use json::JsonOptions;
pub use types::{Content, DEFAULT_LOCALE};
pub use validation::{is_email, is_url};
