use comrak::Options;

use super::{Filter, FilterContext, FilterError, bool_option};

/// Parses the body as markdown. With the `gfm` option (on by default) the
/// GitHub extensions are enabled: tables, strikethrough, task lists and the
/// tag filter. Bare links are left to [`Autolink`](super::Autolink).
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

impl Filter for Markdown {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn parses_markdown(&self) -> bool {
        true
    }

    fn configure(&self, options: &mut Options<'_>, context: &FilterContext) -> Result<(), FilterError> {
        if bool_option(context, self.name(), "gfm", true)? {
            options.extension.table = true;
            options.extension.strikethrough = true;
            options.extension.tasklist = true;
            options.extension.tagfilter = true;
        }
        Ok(())
    }
}
