use comrak::Options;

use super::{Filter, FilterContext, FilterError};

/// Turns bare `http(s)://`, `www.` and email addresses in markdown text into
/// links. Code spans, code blocks and existing links are left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct Autolink;

impl Filter for Autolink {
    fn name(&self) -> &'static str {
        "autolink"
    }

    fn configure(&self, options: &mut Options<'_>, _context: &FilterContext) -> Result<(), FilterError> {
        options.extension.autolink = true;
        Ok(())
    }
}
