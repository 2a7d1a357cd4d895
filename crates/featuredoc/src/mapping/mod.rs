//! Builders that turn parse tree nodes into model values.
//!
//! [`FeatureMapper`] bundles the collaborators every builder needs: the
//! language's keyword sets, the slug normalizer and the tags to hide. It holds
//! only shared references, so one mapper can be reused for any number of
//! documents in the same language.

mod element;
mod step;
mod table;
mod tags;

use featuredoc_patterns::{NameNormalizer, StepKeywords};

use crate::config::TagSet;

pub use tags::visible_tags;

/// Maps parse tree nodes into model values.
#[derive(Clone, Copy)]
pub struct FeatureMapper<'a> {
    keywords: &'a dyn StepKeywords,
    normalizer: &'a dyn NameNormalizer,
    hide_tags: &'a TagSet,
}

impl<'a> FeatureMapper<'a> {
    /// Create a mapper from its collaborators.
    #[must_use]
    pub fn new(
        keywords: &'a dyn StepKeywords,
        normalizer: &'a dyn NameNormalizer,
        hide_tags: &'a TagSet,
    ) -> Self {
        Self {
            keywords,
            normalizer,
            hide_tags,
        }
    }

    /// Tags hidden from visible output.
    #[must_use]
    pub fn hide_tags(&self) -> &'a TagSet {
        self.hide_tags
    }

    /// Visible subset of `tags`.
    #[must_use]
    pub fn visible_tags(&self, tags: &[String]) -> Vec<String> {
        visible_tags(tags, self.hide_tags)
    }
}

impl std::fmt::Debug for FeatureMapper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureMapper")
            .field("hide_tags", &self.hide_tags)
            .finish_non_exhaustive()
    }
}
