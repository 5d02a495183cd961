use comrak::Options;

use super::{Filter, FilterContext, FilterError, str_option};

/// Gives every markdown heading an anchor link named after its text.
///
/// Anchors are lowercase, punctuation is dropped and spaces become dashes.
/// Repeated anchors get a `-1`, `-2`, ... suffix. The `anchor_prefix` option
/// is prepended to every `id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableOfContents;

impl Filter for TableOfContents {
    fn name(&self) -> &'static str {
        "table_of_contents"
    }

    fn configure(&self, options: &mut Options<'_>, context: &FilterContext) -> Result<(), FilterError> {
        let prefix = str_option(context, self.name(), "anchor_prefix", "")?;
        options.extension.header_ids = Some(prefix.to_string());
        Ok(())
    }
}
