use super::filters::FilterContext;
use super::options::RenderOptions;
use crate::content::Content;
use crate::error::{Error, Result};

/// An output format.
pub trait RenderingEngine: Send + Sync {
    /// The name the engine is registered under.
    fn name(&self) -> &'static str;

    /// Renders the body of `content`. `context` is merged into the options
    /// every rendering step sees.
    fn render(
        &self,
        _content: &Content,
        _options: &RenderOptions,
        _context: &FilterContext,
    ) -> Result<String> {
        Err(Error::Unimplemented("render"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl RenderingEngine for Blank {
        fn name(&self) -> &'static str {
            "blank"
        }
    }

    #[test]
    fn render_is_unimplemented_by_default() {
        let result = Blank.render(&Content::new(), &RenderOptions::default(), &FilterContext::new());
        assert!(matches!(result, Err(Error::Unimplemented("render"))));
    }
}
