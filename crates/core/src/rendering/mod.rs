//! Rendering engines: turn a [`Content`](crate::Content) into output markup.

pub mod engine;
pub mod filters;
pub mod options;
pub mod pipeline;

pub use engine::RenderingEngine;
pub use filters::{Filter, FilterContext, FilterError, FilterRegistry};
pub use options::RenderOptions;
pub use pipeline::HtmlPipeline;
